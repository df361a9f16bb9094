//! Pixel access used by the LSB codec.
//!
//! The codec never touches image files; it works against anything that
//! can report its dimensions and read/write RGBA samples.

use image::{Rgba, RgbaImage};

/// Index of the carrier channel within an RGBA sample
pub const RED: usize = 0;

/// A mutable grid of RGBA pixels
pub trait PixelGrid {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Read the pixel at `(x, y)`
    fn pixel(&self, x: u32, y: u32) -> Rgba<u8>;

    /// Overwrite the pixel at `(x, y)`
    fn set_pixel(&mut self, x: u32, y: u32, pixel: Rgba<u8>);

    /// Number of pixels, which is also the bit capacity of the codec
    fn pixel_count(&self) -> usize {
        self.width() as usize * self.height() as usize
    }
}

impl PixelGrid for RgbaImage {
    fn width(&self) -> u32 {
        self.dimensions().0
    }

    fn height(&self) -> u32 {
        self.dimensions().1
    }

    fn pixel(&self, x: u32, y: u32) -> Rgba<u8> {
        *self.get_pixel(x, y)
    }

    fn set_pixel(&mut self, x: u32, y: u32, pixel: Rgba<u8>) {
        self.put_pixel(x, y, pixel);
    }
}

/// Row-major coordinates of pixel `index`
pub fn coords(index: usize, width: u32) -> (u32, u32) {
    let width = width as usize;
    ((index % width) as u32, (index / width) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_major_coords() {
        assert_eq!(coords(0, 10), (0, 0));
        assert_eq!(coords(9, 10), (9, 0));
        assert_eq!(coords(10, 10), (0, 1));
        assert_eq!(coords(37, 10), (7, 3));
    }

    #[test]
    fn test_rgba_image_grid() {
        let mut img = RgbaImage::new(4, 3);
        assert_eq!(PixelGrid::width(&img), 4);
        assert_eq!(PixelGrid::height(&img), 3);
        assert_eq!(img.pixel_count(), 12);

        img.set_pixel(2, 1, Rgba([9, 8, 7, 6]));
        assert_eq!(img.pixel(2, 1), Rgba([9, 8, 7, 6]));
        assert_eq!(img.pixel(0, 0), Rgba([0, 0, 0, 0]));
    }
}
