use crate::error::Result;
use crate::grid::PixelGrid;
use crate::pipeline::{decrypt_message, embed, encrypt_message, extract, Framer, TextFramer};

/// Outcome of hiding a message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HideReport {
    /// UTF-8 length of the serialized envelope (the frame's length field)
    pub envelope_bytes: usize,
    /// Carrier bits written, header included
    pub bits_used: usize,
    /// Carrier bits the grid offers
    pub bits_available: usize,
}

/// Encrypt `message` under `key` and embed it into `grid` in place.
///
/// Flow: encrypt → frame → embed. The grid must be persisted losslessly
/// afterwards or the hidden bits are lost.
pub fn hide_message<G: PixelGrid>(grid: &mut G, message: &str, key: &str) -> Result<HideReport> {
    hide_message_with(&TextFramer, grid, message, key)
}

/// [`hide_message`] with an explicit framing
pub fn hide_message_with<F: Framer, G: PixelGrid>(
    framer: &F,
    grid: &mut G,
    message: &str,
    key: &str,
) -> Result<HideReport> {
    let envelope = encrypt_message(message, key);
    let bits = framer.build(&envelope)?;
    embed(grid, &bits)?;

    let report = HideReport {
        envelope_bytes: envelope.len(),
        bits_used: bits.len(),
        bits_available: grid.pixel_count(),
    };
    log::info!(
        "hid {}-byte envelope using {}/{} carrier bits",
        report.envelope_bytes,
        report.bits_used,
        report.bits_available
    );
    Ok(report)
}

/// Recover the envelope text embedded in `grid` without decrypting it
pub fn reveal_envelope<G: PixelGrid>(grid: &G) -> Result<String> {
    reveal_envelope_with(&TextFramer, grid)
}

/// [`reveal_envelope`] with an explicit framing
pub fn reveal_envelope_with<F: Framer, G: PixelGrid>(framer: &F, grid: &G) -> Result<String> {
    let envelope = framer.parse(extract(grid), grid.pixel_count())?;
    log::debug!("extracted {}-byte envelope", envelope.len());
    Ok(envelope)
}

/// Extract and decrypt the message hidden in `grid`.
///
/// Flow: extract → parse frame → decrypt. A wrong key is detected only on
/// a best-effort basis (padding / UTF-8 failures); there is no MAC.
pub fn reveal_message<G: PixelGrid>(grid: &G, key: &str) -> Result<String> {
    let envelope = reveal_envelope(grid)?;
    decrypt_message(&envelope, key)
}
