use crate::carrier::load_carrier;
use crate::error::Result;
use crate::stego::{reveal_envelope, reveal_message};
use std::path::Path;

/// Options for the reveal command
#[derive(Debug, Clone, Default)]
pub struct RevealOptions {
    pub key: String,
    /// Print the raw envelope instead of decrypting it
    pub envelope_only: bool,
}

/// Recover the hidden message (or envelope) from a stego image
pub fn reveal_from_image(input_path: &Path, options: &RevealOptions) -> Result<String> {
    let grid = load_carrier(input_path)?;

    if options.envelope_only {
        return reveal_envelope(&grid);
    }
    reveal_message(&grid, &options.key)
}
