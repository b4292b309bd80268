//! Image decoding for litecompress.
//!
//! This module provides functionality for:
//! - Decoding JPEG, PNG and WebP bytes into an in-memory pixel buffer
//! - Detecting the container format from magic bytes
//!
//! # Examples
//!
//! ```ignore
//! use litecompress_core::decode::decode_image;
//!
//! let bytes = std::fs::read("photo.jpg").unwrap();
//! let image = decode_image(&bytes).unwrap();
//! println!("Decoded {}x{} image", image.width, image.height);
//! ```

mod reader;
mod types;

pub use reader::{decode_image, sniff_format};
pub use types::{DecodeError, DecodedImage, PixelLayout};
