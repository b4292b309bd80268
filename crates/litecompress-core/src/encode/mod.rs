//! Image encoding for litecompress.
//!
//! This module provides functionality for:
//! - Encoding to JPEG with a configurable quality
//! - Encoding to WebP, lossy with `lossy-webp` (the default) and lossless without
//! - Encoding to lossless PNG
//!
//! All encoders work on a [`DecodedImage`] and return the encoded bytes, so
//! the caller can measure the output before deciding to keep it.
//!
//! # Examples
//!
//! ```ignore
//! use litecompress_core::decode::DecodedImage;
//! use litecompress_core::encode::{encode_image, OutputFormat};
//!
//! let image = DecodedImage::rgb(100, 100, vec![128u8; 100 * 100 * 3]);
//! let bytes = encode_image(&image, OutputFormat::Jpeg, 80).unwrap();
//! println!("Encoded {} bytes", bytes.len());
//! ```

mod format;
mod jpeg;
mod lossless;
mod lossy;

use thiserror::Error;

use crate::decode::DecodedImage;

pub use format::OutputFormat;
pub use jpeg::encode_jpeg;
pub use lossless::{encode_png, encode_webp_lossless};
pub use lossy::encode_webp;

/// Errors that can occur during encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes, got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The underlying encoder failed
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),
}

/// Encode an image in the given format.
///
/// `quality` only affects lossy formats (see [`OutputFormat::is_lossy`]).
pub fn encode_image(
    image: &DecodedImage,
    format: OutputFormat,
    quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    match format {
        OutputFormat::Jpeg => encode_jpeg(image, quality),
        OutputFormat::Png => encode_png(image),
        OutputFormat::WebP => encode_webp(image, quality),
    }
}

pub(crate) fn validate_image(image: &DecodedImage) -> Result<(), EncodeError> {
    if image.width == 0 || image.height == 0 {
        return Err(EncodeError::InvalidDimensions {
            width: image.width,
            height: image.height,
        });
    }

    let expected = image.expected_byte_size();
    if image.pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: image.pixels.len(),
        });
    }
    Ok(())
}


// ============================================================================
// Property-Based Tests
// ============================================================================
