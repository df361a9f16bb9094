use thiserror::Error;

#[derive(Error, Debug)]
pub enum StegError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Image too small: need {needed} pixels, but image only has {available}")]
    Capacity { needed: usize, available: usize },

    #[error("Missing STEG signature: not a stego image")]
    Format,

    #[error("Invalid data length: {0}. Must be between 1 and 100000 bytes")]
    Length(u64),

    #[error("Frame truncated: need {needed} bits, but only {available} available")]
    TruncatedFrame { needed: usize, available: usize },

    #[error("Invalid envelope format: {0}")]
    CipherFormat(String),

    #[error("Invalid initialization vector length: {0} bytes, expected 16")]
    IvLength(usize),

    #[error("Invalid block padding after decryption")]
    Padding,

    #[error("Invalid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("Carrier format {0} is lossy or unsupported; use PNG or BMP")]
    LossyCarrier(String),

    #[error("Invalid message: {0}")]
    InvalidMessage(String),
}

impl StegError {
    /// Advice for a person at the keyboard, chosen by error kind.
    ///
    /// Padding and UTF-8 failures are only a probabilistic signal; nothing
    /// here claims the key was verified.
    pub fn kind_hint(&self) -> Option<&'static str> {
        match self {
            Self::Capacity { .. } => Some("use a larger image or a shorter message"),
            Self::Format => Some("this image does not carry a hidden message"),
            Self::Length(_) | Self::TruncatedFrame { .. } => {
                Some("the image may have been modified or re-encoded lossily")
            }
            Self::CipherFormat(_) | Self::IvLength(_) => {
                Some("the hidden data is not a valid envelope; the image may be corrupted")
            }
            Self::Padding | Self::Utf8(_) => {
                Some("wrong key, or the image was modified after hiding")
            }
            Self::LossyCarrier(_) => Some("save the output with a .png extension"),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, StegError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_message_names_both_counts() {
        let err = StegError::Capacity {
            needed: 584,
            available: 100,
        };
        let text = err.to_string();
        assert!(text.contains("584"));
        assert!(text.contains("100"));
    }

    #[test]
    fn test_hints_follow_error_kind() {
        assert_eq!(
            StegError::Padding.kind_hint(),
            Some("wrong key, or the image was modified after hiding")
        );
        assert_eq!(
            StegError::Format.kind_hint(),
            Some("this image does not carry a hidden message")
        );
        assert!(StegError::InvalidMessage("empty".into()).kind_hint().is_none());
    }
}
