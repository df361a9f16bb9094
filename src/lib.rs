//! lsbvault - AES-encrypted messages hidden in image LSBs
//!
//! A message is encrypted with AES-128-CBC under a key derived from a
//! passphrase, wrapped in a small frame, and written one bit per pixel into
//! the least significant bit of the red channel. Only lossless carriers
//! (PNG, BMP) survive the round trip.
//!
//! ## Pipeline
//!
//! ```text
//! hide:   message + key → Encrypt → Envelope → Frame → bits → Embed → grid
//! reveal: grid → Extract → bits → Parse frame → Envelope → Decrypt → message
//! ```
//!
//! - **KDF**: first 16 bytes of SHA-256(key)
//! - **Encrypt**: AES-128-CBC, PKCS#7, random IV; envelope text `hex(iv):hex(ct)`
//! - **Frame**: `STEG` signature, little-endian u32 length, envelope bytes
//! - **Embed**: LSB-first bits, row-major pixels, red channel only
//!
//! Wrong keys are detected only probabilistically (padding / UTF-8
//! failures). The envelope carries no authentication tag.
//!
//! ## Example
//!
//! ```no_run
//! use lsbvault::carrier::{load_carrier, save_carrier};
//! use lsbvault::stego::{hide_message, reveal_message};
//! use std::path::Path;
//!
//! let mut grid = load_carrier(Path::new("cover.png")).unwrap();
//! hide_message(&mut grid, "meet at noon", "passphrase").unwrap();
//! save_carrier(&grid, Path::new("stego.png")).unwrap();
//!
//! let grid = load_carrier(Path::new("stego.png")).unwrap();
//! assert_eq!(reveal_message(&grid, "passphrase").unwrap(), "meet at noon");
//! ```

pub mod capacity;
pub mod carrier;
pub mod cli;
pub mod error;
pub mod grid;
pub mod header;
pub mod pipeline;
pub mod stego;

pub use error::{Result, StegError};
pub use grid::PixelGrid;
pub use header::FrameHeader;
pub use stego::{hide_message, reveal_message, HideReport};
