//! JPEG encoding.
//!
//! This module provides JPEG encoding using the `image` crate's JPEG encoder.

use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;
use std::io::Cursor;

use super::{validate_image, EncodeError};
use crate::decode::{DecodedImage, PixelLayout};

/// Encode a decoded image to JPEG bytes.
///
/// # Arguments
///
/// * `image` - The image to encode. An alpha channel is composited onto
///   black, since JPEG cannot carry one.
/// * `quality` - JPEG quality (0-100). The encoder's floor is 1, so 0 is
///   encoded as 1.
///
/// # Quality Guidelines
///
/// * 90-100: High quality, suitable for archival or further editing
/// * 70-90: Good quality, recommended for most uses (default: 80)
/// * Below 60: Low quality, visible artifacts
pub fn encode_jpeg(image: &DecodedImage, quality: u8) -> Result<Vec<u8>, EncodeError> {
    validate_image(image)?;

    let quality = quality.clamp(1, 100);

    let rgb;
    let pixels: &[u8] = match image.layout {
        PixelLayout::Rgb8 => &image.pixels,
        PixelLayout::Rgba8 => {
            rgb = flatten_onto_black(&image.pixels);
            &rgb
        }
    };

    let mut buffer = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut buffer, quality);

    encoder
        .write_image(pixels, image.width, image.height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}

/// Premultiply every RGBA pixel by its alpha and drop the alpha byte.
///
/// Fully transparent pixels come out black whatever colour they hide.
fn flatten_onto_black(rgba: &[u8]) -> Vec<u8> {
    let mut rgb = Vec::with_capacity(rgba.len() / 4 * 3);
    for px in rgba.chunks_exact(4) {
        let alpha = px[3] as u32;
        for &c in &px[..3] {
            rgb.push(((c as u32 * alpha + 127) / 255) as u8);
        }
    }
    rgb
}
