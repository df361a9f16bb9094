use crate::grid::PixelGrid;
use crate::header::{FrameHeader, MAX_PAYLOAD_LEN};
use crate::pipeline::cipher::IV_SIZE;
use serde::Serialize;

/// AES block size; PKCS#7 always adds between 1 and 16 bytes
const BLOCK_SIZE: usize = 16;

/// Hex IV + ':' separator
const ENVELOPE_PREFIX: usize = IV_SIZE * 2 + 1;

/// Serialized envelope length for a plaintext of `message_bytes` UTF-8 bytes
pub fn envelope_len(message_bytes: usize) -> usize {
    let ciphertext = (message_bytes / BLOCK_SIZE + 1) * BLOCK_SIZE;
    ENVELOPE_PREFIX + ciphertext * 2
}

/// Carrier bits (= pixels) needed to hide a plaintext of `message_bytes`
pub fn required_bits(message_bytes: usize) -> usize {
    (FrameHeader::SIZE + envelope_len(message_bytes)) * 8
}

/// Summary of how much a carrier can hold
#[derive(Debug, Clone, Serialize)]
pub struct CapacityAnalysis {
    pub width: u32,
    pub height: u32,
    pub available_bits: usize,
    pub header_bits: usize,
    /// Largest envelope that fits, clamped to the length ceiling
    pub max_envelope_bytes: usize,
    /// Largest plaintext (UTF-8 bytes) whose envelope fits; None if nothing fits
    pub max_message_bytes: Option<usize>,
}

/// Analyze the capacity of a pixel grid
pub fn analyze_grid<G: PixelGrid>(grid: &G) -> CapacityAnalysis {
    let available_bits = grid.pixel_count();
    let max_envelope_bytes = (available_bits / 8)
        .saturating_sub(FrameHeader::SIZE)
        .min(MAX_PAYLOAD_LEN as usize);

    CapacityAnalysis {
        width: grid.width(),
        height: grid.height(),
        available_bits,
        header_bits: FrameHeader::BITS,
        max_envelope_bytes,
        max_message_bytes: max_message_bytes(max_envelope_bytes),
    }
}

/// Invert [`envelope_len`]: the envelope holds 2 hex chars per ciphertext
/// byte, and the ciphertext is whole blocks with at least one padding byte.
fn max_message_bytes(max_envelope_bytes: usize) -> Option<usize> {
    let hex_room = max_envelope_bytes.checked_sub(ENVELOPE_PREFIX)?;
    let blocks = hex_room / (BLOCK_SIZE * 2);
    if blocks == 0 {
        return None;
    }
    Some(blocks * BLOCK_SIZE - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbaImage;

    #[test]
    fn test_envelope_len() {
        assert_eq!(envelope_len(0), 65);
        assert_eq!(envelope_len(2), 65);
        assert_eq!(envelope_len(15), 65);
        assert_eq!(envelope_len(16), 97);
    }

    #[test]
    fn test_required_bits_for_short_message() {
        assert_eq!(required_bits(2), 584);
    }

    #[test]
    fn test_tiny_grid_holds_nothing() {
        let analysis = analyze_grid(&RgbaImage::new(10, 10));
        assert_eq!(analysis.available_bits, 100);
        assert_eq!(analysis.max_envelope_bytes, 4);
        assert_eq!(analysis.max_message_bytes, None);
    }

    #[test]
    fn test_exact_fit_grid() {
        // 584 pixels hold exactly one padded block
        let analysis = analyze_grid(&RgbaImage::new(584, 1));
        assert_eq!(analysis.max_envelope_bytes, 65);
        assert_eq!(analysis.max_message_bytes, Some(15));
        assert_eq!(required_bits(15), analysis.available_bits);
        assert!(required_bits(16) > analysis.available_bits);
    }

    #[test]
    fn test_ceiling_clamps_large_grids() {
        let analysis = analyze_grid(&RgbaImage::new(1000, 1000));
        assert_eq!(analysis.max_envelope_bytes, MAX_PAYLOAD_LEN as usize);
        let max = analysis.max_message_bytes.unwrap();
        assert!(envelope_len(max) <= MAX_PAYLOAD_LEN as usize);
        assert!(envelope_len(max + 1) > MAX_PAYLOAD_LEN as usize);
    }
}
