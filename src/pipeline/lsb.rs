use crate::error::{Result, StegError};
use crate::grid::{coords, PixelGrid, RED};
use std::iter::FusedIterator;

/// Writes one bit per pixel into the red-channel LSB, in row-major order
pub struct BitWriter<'a, G: PixelGrid> {
    grid: &'a mut G,
    width: u32,
    cursor: usize,
    capacity: usize,
}

impl<'a, G: PixelGrid> BitWriter<'a, G> {
    pub fn new(grid: &'a mut G) -> Self {
        let width = grid.width();
        let capacity = grid.pixel_count();
        Self {
            grid,
            width,
            cursor: 0,
            capacity,
        }
    }

    /// Bits written so far
    pub fn position(&self) -> usize {
        self.cursor
    }

    pub fn remaining(&self) -> usize {
        self.capacity - self.cursor
    }

    pub fn write_bit(&mut self, bit: bool) -> Result<()> {
        if self.cursor >= self.capacity {
            return Err(StegError::Capacity {
                needed: self.cursor + 1,
                available: self.capacity,
            });
        }

        let (x, y) = coords(self.cursor, self.width);
        let mut pixel = self.grid.pixel(x, y);
        pixel.0[RED] = (pixel.0[RED] & 0xFE) | bit as u8;
        self.grid.set_pixel(x, y, pixel);

        self.cursor += 1;
        Ok(())
    }
}

/// Embed `bits` into the grid in place.
///
/// Fails before touching any pixel when the grid is too small. Green,
/// blue, alpha and every pixel past the last bit are left as they were.
pub fn embed<G: PixelGrid>(grid: &mut G, bits: &[bool]) -> Result<()> {
    let available = grid.pixel_count();
    if bits.len() > available {
        return Err(StegError::Capacity {
            needed: bits.len(),
            available,
        });
    }

    let mut writer = BitWriter::new(grid);
    for &bit in bits {
        writer.write_bit(bit)?;
    }

    log::debug!(
        "embedded {} bits, {} pixels untouched",
        writer.position(),
        writer.remaining()
    );
    Ok(())
}

/// Red-channel LSBs of a grid, one per pixel, row-major.
///
/// Single pass: re-reading means calling [`extract`] again.
pub struct RedLsbBits<'a, G: PixelGrid> {
    grid: &'a G,
    width: u32,
    index: usize,
    len: usize,
}

impl<G: PixelGrid> Iterator for RedLsbBits<'_, G> {
    type Item = bool;

    fn next(&mut self) -> Option<bool> {
        if self.index >= self.len {
            return None;
        }
        let (x, y) = coords(self.index, self.width);
        self.index += 1;
        Some(self.grid.pixel(x, y).0[RED] & 1 == 1)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.len - self.index;
        (left, Some(left))
    }
}

impl<G: PixelGrid> ExactSizeIterator for RedLsbBits<'_, G> {}

impl<G: PixelGrid> FusedIterator for RedLsbBits<'_, G> {}

/// Lazily read the carrier bits of `grid`, bounded by its pixel count
pub fn extract<G: PixelGrid>(grid: &G) -> RedLsbBits<'_, G> {
    RedLsbBits {
        grid,
        width: grid.width(),
        index: 0,
        len: grid.pixel_count(),
    }
}
