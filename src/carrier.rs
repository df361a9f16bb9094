//! Loading and persisting carrier images.
//!
//! Any format the `image` crate can decode is accepted as a cover image,
//! but stego output is written only through lossless, channel-exact
//! encoders. A JPEG re-encode would destroy the red-channel LSBs.

use crate::error::{Result, StegError};
use image::{ImageFormat, RgbaImage};
use std::io::Cursor;
use std::path::{Path, PathBuf};

/// Output formats that keep every channel byte-for-byte
pub const LOSSLESS_FORMATS: &[ImageFormat] = &[ImageFormat::Png, ImageFormat::Bmp];

/// Load an image file as an RGBA pixel grid
pub fn load_carrier(path: &Path) -> Result<RgbaImage> {
    let image = image::open(path)?.to_rgba8();
    let (width, height) = image.dimensions();
    log::debug!("loaded carrier {} ({}x{})", path.display(), width, height);
    Ok(image)
}

/// Decode an in-memory image (e.g. an upload) as an RGBA pixel grid
pub fn decode_carrier(bytes: &[u8]) -> Result<RgbaImage> {
    Ok(image::load_from_memory(bytes)?.to_rgba8())
}

/// Pick the output format from the file extension, refusing lossy ones
pub fn output_format(path: &Path) -> Result<ImageFormat> {
    let format = ImageFormat::from_path(path).map_err(|_| {
        StegError::LossyCarrier(
            path.extension()
                .map(|ext| ext.to_string_lossy().into_owned())
                .unwrap_or_else(|| "<none>".into()),
        )
    })?;

    if !LOSSLESS_FORMATS.contains(&format) {
        return Err(StegError::LossyCarrier(format!("{:?}", format)));
    }
    Ok(format)
}

/// Write a stego grid to `path` using a lossless encoder
pub fn save_carrier(image: &RgbaImage, path: &Path) -> Result<()> {
    let format = output_format(path)?;
    image.save_with_format(path, format)?;
    log::debug!("wrote {:?} carrier to {}", format, path.display());
    Ok(())
}

/// Encode a stego grid as PNG bytes for serving without touching disk
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

/// Default output next to the input: `photo.jpg` -> `photo.stego.png`
pub fn default_output_path(input: &Path) -> PathBuf {
    input.with_extension("stego.png")
}
