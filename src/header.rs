use crate::error::{Result, StegError};

/// Magic marker at the start of every embedded frame
pub const SIGNATURE: [u8; 4] = *b"STEG";

/// Sanity ceiling for the length field. Not a protocol limit: it keeps
/// garbage bits from being read as an enormous payload size.
pub const MAX_PAYLOAD_LEN: u32 = 100_000;

/// Frame header - stored in the first 64 embedded bits
/// Layout: [signature: 4][payload length, little-endian u32: 4][payload...]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    /// Byte length of the payload that follows the header
    pub length: u32,
}

impl FrameHeader {
    /// Header size: 4 bytes (signature) + 4 bytes (length) = 8 bytes
    pub const SIZE: usize = 8;

    /// Header size in embedded bits
    pub const BITS: usize = Self::SIZE * 8;

    /// Create a header for a payload of `len` bytes
    pub fn new(len: usize) -> Result<Self> {
        let length = u32::try_from(len).map_err(|_| StegError::Length(len as u64))?;
        Self::validate_length(length)?;
        Ok(Self { length })
    }

    /// Serialize header to bytes
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut buf = [0u8; Self::SIZE];
        buf[0..4].copy_from_slice(&SIGNATURE);
        buf[4..8].copy_from_slice(&self.length.to_le_bytes());
        buf
    }

    /// Check the 4 signature bytes read from a carrier
    pub fn verify_signature(bytes: &[u8; 4]) -> Result<()> {
        if *bytes != SIGNATURE {
            return Err(StegError::Format);
        }
        Ok(())
    }

    /// Decode the little-endian length field and apply the sanity ceiling
    pub fn from_length_bytes(bytes: [u8; 4]) -> Result<Self> {
        let length = u32::from_le_bytes(bytes);
        Self::validate_length(length)?;
        Ok(Self { length })
    }

    fn validate_length(length: u32) -> Result<()> {
        if length == 0 || length > MAX_PAYLOAD_LEN {
            return Err(StegError::Length(length as u64));
        }
        Ok(())
    }

    /// Bits occupied by header plus payload
    pub fn frame_bits(&self) -> usize {
        (Self::SIZE + self.length as usize) * 8
    }
}
