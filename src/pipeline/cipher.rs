use crate::error::{Result, StegError};
use crate::pipeline::kdf::derive_key;
use aes::Aes128;
use cbc::cipher::block_padding::Pkcs7;
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use rand::rngs::OsRng;
use rand::RngCore;
use std::fmt;
use std::str::FromStr;

type Aes128CbcEnc = cbc::Encryptor<Aes128>;
type Aes128CbcDec = cbc::Decryptor<Aes128>;

/// IV length for AES-CBC
pub const IV_SIZE: usize = 16;

/// Separator between the hex IV and the hex ciphertext
pub const ENVELOPE_SEPARATOR: char = ':';

/// IV + ciphertext produced by [`encrypt`]
///
/// Serialized as `hex(iv) ":" hex(ciphertext)` with lowercase hex.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub iv: [u8; IV_SIZE],
    pub ciphertext: Vec<u8>,
}

impl fmt::Display for Envelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}",
            hex::encode(self.iv),
            ENVELOPE_SEPARATOR,
            hex::encode(&self.ciphertext)
        )
    }
}

impl FromStr for Envelope {
    type Err = StegError;

    fn from_str(s: &str) -> Result<Self> {
        let (iv_hex, ciphertext_hex) = s.split_once(ENVELOPE_SEPARATOR).ok_or_else(|| {
            StegError::CipherFormat("missing ':' between IV and ciphertext".into())
        })?;

        let iv_bytes =
            hex::decode(iv_hex).map_err(|_| StegError::IvLength(hex_prefix_len(iv_hex)))?;
        let iv: [u8; IV_SIZE] = iv_bytes
            .as_slice()
            .try_into()
            .map_err(|_| StegError::IvLength(iv_bytes.len()))?;

        let ciphertext = hex::decode(ciphertext_hex)
            .map_err(|e| StegError::CipherFormat(format!("ciphertext is not hex: {}", e)))?;

        Ok(Self { iv, ciphertext })
    }
}

/// Bytes in the leading run of complete hex digit pairs.
/// A malformed IV is reported by how much of it decodes.
fn hex_prefix_len(text: &str) -> usize {
    text.as_bytes()
        .chunks_exact(2)
        .take_while(|pair| pair.iter().all(u8::is_ascii_hexdigit))
        .count()
}

/// Encrypt `plaintext` with AES-128-CBC under a key derived from `user_key`.
/// A fresh IV is drawn from the OS CSPRNG on every call.
pub fn encrypt(plaintext: &str, user_key: &str) -> Envelope {
    let key = derive_key(user_key);

    let mut iv = [0u8; IV_SIZE];
    OsRng.fill_bytes(&mut iv);

    let ciphertext = Aes128CbcEnc::new(key.as_bytes().into(), &iv.into())
        .encrypt_padded_vec_mut::<Pkcs7>(plaintext.as_bytes());

    Envelope { iv, ciphertext }
}

/// Encrypt and serialize to envelope text
pub fn encrypt_message(plaintext: &str, user_key: &str) -> String {
    encrypt(plaintext, user_key).to_string()
}

/// Decrypt a parsed envelope.
///
/// A wrong key usually surfaces as [`StegError::Padding`] or
/// [`StegError::Utf8`]. Neither is an authentication check.
pub fn decrypt(envelope: &Envelope, user_key: &str) -> Result<String> {
    let key = derive_key(user_key);

    let plaintext = Aes128CbcDec::new(key.as_bytes().into(), &envelope.iv.into())
        .decrypt_padded_vec_mut::<Pkcs7>(&envelope.ciphertext)
        .map_err(|_| StegError::Padding)?;

    Ok(String::from_utf8(plaintext)?)
}

/// Parse envelope text and decrypt it
pub fn decrypt_message(envelope_text: &str, user_key: &str) -> Result<String> {
    let envelope: Envelope = envelope_text.parse()?;
    decrypt(&envelope, user_key)
}
