use crate::error::{Result, StegError};
use crate::header::FrameHeader;

/// Builds and parses the embedded frame as a flat bit sequence.
///
/// The pixel codec only sees bits, so alternative framings (e.g. raw
/// envelope bytes instead of hex text) can live behind this trait.
pub trait Framer {
    /// Encode an envelope into the bits to embed
    fn build(&self, envelope: &str) -> Result<Vec<bool>>;

    /// Decode an envelope from a bit source holding `bits_available` bits
    fn parse<I>(&self, bits: I, bits_available: usize) -> Result<String>
    where
        I: Iterator<Item = bool>;
}

/// The text framing: `STEG`, LE u32 byte length, UTF-8 envelope text.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextFramer;

impl Framer for TextFramer {
    fn build(&self, envelope: &str) -> Result<Vec<bool>> {
        let payload = envelope.as_bytes();
        let header = FrameHeader::new(payload.len())?;

        let mut bits = Vec::with_capacity(header.frame_bits());
        push_bytes(&mut bits, &header.to_bytes());
        push_bytes(&mut bits, payload);
        Ok(bits)
    }

    fn parse<I>(&self, bits: I, bits_available: usize) -> Result<String>
    where
        I: Iterator<Item = bool>,
    {
        let mut reader = BitCursor::new(bits, bits_available);

        let mut signature = [0u8; 4];
        reader.read_into(&mut signature, FrameHeader::BITS)?;
        FrameHeader::verify_signature(&signature)?;

        let mut length = [0u8; 4];
        reader.read_into(&mut length, FrameHeader::BITS)?;
        let header = FrameHeader::from_length_bytes(length)?;

        let needed = header.frame_bits();
        if needed > bits_available {
            return Err(StegError::TruncatedFrame {
                needed,
                available: bits_available,
            });
        }

        let mut payload = vec![0u8; header.length as usize];
        reader.read_into(&mut payload, needed)?;

        Ok(String::from_utf8(payload)?)
    }
}

/// Expand bytes into bits, least significant bit first
pub fn push_bytes(bits: &mut Vec<bool>, bytes: &[u8]) {
    for &byte in bytes {
        for j in 0..8 {
            bits.push((byte >> j) & 1 == 1);
        }
    }
}

/// Pulls whole bytes (LSB first) from a bit iterator, counting consumption
struct BitCursor<I> {
    bits: I,
    consumed: usize,
    available: usize,
}

impl<I: Iterator<Item = bool>> BitCursor<I> {
    fn new(bits: I, available: usize) -> Self {
        Self {
            bits,
            consumed: 0,
            available,
        }
    }

    /// Fill `buf`; `needed` is the frame size reported if the source runs dry
    fn read_into(&mut self, buf: &mut [u8], needed: usize) -> Result<()> {
        for byte in buf.iter_mut() {
            *byte = 0;
            for j in 0..8 {
                let bit = self.bits.next().ok_or_else(|| StegError::TruncatedFrame {
                    needed,
                    available: self.available.min(self.consumed),
                })?;
                self.consumed += 1;
                if bit {
                    *byte |= 1 << j;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bytes_to_bits(bytes: &[u8]) -> Vec<bool> {
        let mut bits = Vec::new();
        push_bytes(&mut bits, bytes);
        bits
    }

    #[test]
    fn test_lsb_first_bit_order() {
        // 'S' = 0x53 = 0b0101_0011
        let bits = bytes_to_bits(&[0x53]);
        assert_eq!(bits, vec![true, true, false, false, true, false, true, false]);
    }

    #[test]
    fn test_build_layout() {
        let bits = TextFramer.build("ab:cd").unwrap();
        assert_eq!(bits.len(), (4 + 4 + 5) * 8);

        let mut expected = Vec::new();
        push_bytes(&mut expected, b"STEG");
        push_bytes(&mut expected, &5u32.to_le_bytes());
        push_bytes(&mut expected, b"ab:cd");
        assert_eq!(bits, expected);
    }

    #[test]
    fn test_build_rejects_empty_envelope() {
        assert!(matches!(TextFramer.build(""), Err(StegError::Length(0))));
    }

    #[test]
    fn test_parse_roundtrip() {
        let bits = TextFramer.build("00ff:abcd").unwrap();
        let available = bits.len();
        let text = TextFramer.parse(bits.into_iter(), available).unwrap();
        assert_eq!(text, "00ff:abcd");
    }

    #[test]
    fn test_parse_stops_at_frame_end() {
        let mut bits = TextFramer.build("xyz").unwrap();
        // Trailing carrier bits must be ignored
        bits.extend(std::iter::repeat(true).take(500));
        let available = bits.len();
        assert_eq!(TextFramer.parse(bits.into_iter(), available).unwrap(), "xyz");
    }

    #[test]
    fn test_signature_gate() {
        let mut bits = bytes_to_bits(b"STEH");
        push_bytes(&mut bits, &3u32.to_le_bytes());
        push_bytes(&mut bits, b"abc");
        let available = bits.len();
        assert!(matches!(
            TextFramer.parse(bits.into_iter(), available),
            Err(StegError::Format)
        ));
    }

    #[test]
    fn test_zero_length() {
        let mut bits = bytes_to_bits(b"STEG");
        push_bytes(&mut bits, &0u32.to_le_bytes());
        bits.extend(std::iter::repeat(false).take(64));
        let available = bits.len();
        assert!(matches!(
            TextFramer.parse(bits.into_iter(), available),
            Err(StegError::Length(0))
        ));
    }

    #[test]
    fn test_length_ceiling_with_room_to_spare() {
        let mut bits = bytes_to_bits(b"STEG");
        push_bytes(&mut bits, &100_001u32.to_le_bytes());
        let available = (8 + 100_001) * 8 + 1024;
        let source = bits.into_iter().chain(std::iter::repeat(false));
        assert!(matches!(
            TextFramer.parse(source.take(available), available),
            Err(StegError::Length(100_001))
        ));
    }

    #[test]
    fn test_truncated_payload() {
        let bits = TextFramer.build("abcdef").unwrap();
        let short: Vec<bool> = bits[..bits.len() - 8].to_vec();
        let available = short.len();
        match TextFramer.parse(short.into_iter(), available) {
            Err(StegError::TruncatedFrame { needed, available: got }) => {
                assert_eq!(needed, (8 + 6) * 8);
                assert_eq!(got, (8 + 5) * 8);
            }
            other => panic!("expected truncation, got {:?}", other),
        }
    }

    #[test]
    fn test_truncated_before_signature() {
        let bits = bytes_to_bits(b"ST");
        let available = bits.len();
        assert!(matches!(
            TextFramer.parse(bits.into_iter(), available),
            Err(StegError::TruncatedFrame { .. })
        ));
    }

    #[test]
    fn test_source_shorter_than_announced() {
        // Caller overstates availability; the iterator still runs dry
        let bits = TextFramer.build("abcdef").unwrap();
        let short: Vec<bool> = bits[..80].to_vec();
        assert!(matches!(
            TextFramer.parse(short.into_iter(), 10_000),
            Err(StegError::TruncatedFrame { .. })
        ));
    }

    #[test]
    fn test_invalid_utf8_payload() {
        let mut bits = bytes_to_bits(b"STEG");
        push_bytes(&mut bits, &2u32.to_le_bytes());
        push_bytes(&mut bits, &[0xC3, 0x28]);
        let available = bits.len();
        assert!(matches!(
            TextFramer.parse(bits.into_iter(), available),
            Err(StegError::Utf8(_))
        ));
    }
}
