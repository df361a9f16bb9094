use sha2::{Digest, Sha256};

/// AES-128 key length in bytes
pub const KEY_SIZE: usize = 16;

/// Fixed-length cipher key derived from a user-supplied secret
#[derive(Clone, PartialEq, Eq)]
pub struct DerivedKey([u8; KEY_SIZE]);

impl DerivedKey {
    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.0
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("DerivedKey(..)")
    }
}

/// Derive a 16-byte key: SHA-256 of the UTF-8 key, truncated.
/// Any length is accepted, including the empty string.
pub fn derive_key(user_key: &str) -> DerivedKey {
    let hash: [u8; 32] = Sha256::digest(user_key.as_bytes()).into();
    let mut key = [0u8; KEY_SIZE];
    key.copy_from_slice(&hash[..KEY_SIZE]);
    DerivedKey(key)
}
