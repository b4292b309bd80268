//! Quality-driven WebP encoding.
//!
//! With the `lossy-webp` feature the encoder is libwebp (through the `webp`
//! crate) in lossy mode. libwebp does not build for wasm32, so without the
//! feature WebP falls back to the `image` crate's lossless encoder and the
//! quality hint is ignored.

use super::EncodeError;
use crate::decode::DecodedImage;

/// Encode a decoded image to WebP bytes, keeping alpha.
///
/// `quality` (0-100) trades size against fidelity when `lossy-webp` is enabled.
#[cfg(feature = "lossy-webp")]
pub fn encode_webp(image: &DecodedImage, quality: u8) -> Result<Vec<u8>, EncodeError> {
    use crate::decode::PixelLayout;

    super::validate_image(image)?;

    let encoder = match image.layout {
        PixelLayout::Rgb8 => ::webp::Encoder::from_rgb(&image.pixels, image.width, image.height),
        PixelLayout::Rgba8 => ::webp::Encoder::from_rgba(&image.pixels, image.width, image.height),
    };
    let encoded = encoder
        .encode_simple(false, quality.min(100) as f32)
        .map_err(|e| EncodeError::EncodingFailed(format!("WebP: {e:?}")))?;

    Ok(encoded.to_vec())
}

/// Encode a decoded image to lossless WebP bytes; `quality` is ignored.
#[cfg(not(feature = "lossy-webp"))]
pub fn encode_webp(image: &DecodedImage, _quality: u8) -> Result<Vec<u8>, EncodeError> {
    super::encode_webp_lossless(image)
}
