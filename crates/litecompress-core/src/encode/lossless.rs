//! Lossless PNG and WebP encoding through the `image` crate.

use image::codecs::png::PngEncoder;
use image::codecs::webp::WebPEncoder;
use image::{ExtendedColorType, ImageEncoder};
use std::io::Cursor;

use super::{validate_image, EncodeError};
use crate::decode::{DecodedImage, PixelLayout};

fn color_type(layout: PixelLayout) -> ExtendedColorType {
    match layout {
        PixelLayout::Rgb8 => ExtendedColorType::Rgb8,
        PixelLayout::Rgba8 => ExtendedColorType::Rgba8,
    }
}

/// Encode a decoded image to PNG bytes, keeping alpha.
pub fn encode_png(image: &DecodedImage) -> Result<Vec<u8>, EncodeError> {
    validate_image(image)?;

    let mut buffer = Cursor::new(Vec::new());
    PngEncoder::new(&mut buffer)
        .write_image(&image.pixels, image.width, image.height, color_type(image.layout))
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}

/// Encode a decoded image to lossless WebP bytes, keeping alpha.
pub fn encode_webp_lossless(image: &DecodedImage) -> Result<Vec<u8>, EncodeError> {
    validate_image(image)?;

    let mut buffer = Cursor::new(Vec::new());
    WebPEncoder::new_lossless(&mut buffer)
        .write_image(&image.pixels, image.width, image.height, color_type(image.layout))
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}
