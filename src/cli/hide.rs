use crate::carrier::{load_carrier, save_carrier};
use crate::error::{Result, StegError};
use crate::stego::{hide_message, HideReport};
use std::path::Path;

/// Upper bound on message length, in characters
pub const DEFAULT_MAX_MESSAGE_CHARS: usize = 1000;

/// Options for the hide command
#[derive(Debug, Clone)]
pub struct HideOptions {
    pub key: String,
    pub message: String,
    pub max_message_chars: usize,
}

impl Default for HideOptions {
    fn default() -> Self {
        Self {
            key: String::new(),
            message: String::new(),
            max_message_chars: DEFAULT_MAX_MESSAGE_CHARS,
        }
    }
}

/// Reject empty or overlong messages before touching the image
pub fn validate_message(message: &str, max_chars: usize) -> Result<()> {
    if message.is_empty() {
        return Err(StegError::InvalidMessage("message must not be empty".into()));
    }
    let chars = message.chars().count();
    if chars > max_chars {
        return Err(StegError::InvalidMessage(format!(
            "{} characters exceeds the maximum of {}",
            chars, max_chars
        )));
    }
    Ok(())
}

/// Hide a message in `input_path` and write the stego image to `output_path`
pub fn hide_in_image(
    input_path: &Path,
    output_path: &Path,
    options: &HideOptions,
) -> Result<HideReport> {
    validate_message(&options.message, options.max_message_chars)?;

    let mut grid = load_carrier(input_path)?;
    let report = hide_message(&mut grid, &options.message, &options.key)?;
    save_carrier(&grid, output_path)?;

    Ok(report)
}
