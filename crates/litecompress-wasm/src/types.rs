//! WASM-compatible wrapper types for image data.
//!
//! This module provides JavaScript-friendly types that wrap the core litecompress
//! types, handling the conversion between Rust and JavaScript data representations.

use litecompress_core::decode::{DecodedImage, PixelLayout};
use litecompress_core::OutputFormat;
use wasm_bindgen::prelude::*;

/// A decoded image wrapper for JavaScript.
///
/// # Memory Management
///
/// The pixel data is stored in WASM memory. When you call `pixels()`, a copy is made
/// to JavaScript memory as a `Uint8Array`.
///
/// The `free()` method can be called to explicitly release WASM memory, but this is
/// optional as wasm-bindgen's finalizer will handle cleanup automatically.
#[wasm_bindgen]
pub struct JsDecodedImage {
    width: u32,
    height: u32,
    has_alpha: bool,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsDecodedImage {
    /// Create an RGB image from dimensions and pixel data (3 bytes per pixel, row-major).
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> JsDecodedImage {
        JsDecodedImage {
            width,
            height,
            has_alpha: false,
            pixels,
        }
    }

    /// Create an RGBA image from dimensions and pixel data (4 bytes per pixel, row-major).
    pub fn with_alpha(width: u32, height: u32, pixels: Vec<u8>) -> JsDecodedImage {
        JsDecodedImage {
            width,
            height,
            has_alpha: true,
            pixels,
        }
    }

    /// Get the image width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the image height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// True when pixels are RGBA rather than RGB
    #[wasm_bindgen(getter)]
    pub fn has_alpha(&self) -> bool {
        self.has_alpha
    }

    /// Get the number of bytes in the pixel buffer
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Returns pixel data as Uint8Array.
    ///
    /// Note: This creates a copy of the pixel data.
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }

    /// Explicitly free WASM memory.
    pub fn free(self) {
        // Dropping self releases the memory
    }
}

impl JsDecodedImage {
    pub(crate) fn from_decoded(img: DecodedImage) -> Self {
        Self {
            width: img.width,
            height: img.height,
            has_alpha: img.layout.has_alpha(),
            pixels: img.pixels,
        }
    }

    /// Convert back to a core DecodedImage. Clones the pixel data.
    pub(crate) fn to_decoded(&self) -> DecodedImage {
        DecodedImage {
            width: self.width,
            height: self.height,
            layout: if self.has_alpha {
                PixelLayout::Rgba8
            } else {
                PixelLayout::Rgb8
            },
            pixels: self.pixels.clone(),
        }
    }
}

/// Convert a u8 format code to the core OutputFormat enum.
///
/// Values:
/// - 0 = JPEG (lossy, uses quality)
/// - 1 = PNG (lossless)
/// - 2 = WebP (lossless)
///
/// Any other value defaults to JPEG.
pub(crate) fn format_from_u8(value: u8) -> OutputFormat {
    OutputFormat::from(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_js_decoded_image_creation() {
        let img = JsDecodedImage::new(100, 50, vec![0u8; 100 * 50 * 3]);
        assert_eq!(img.width(), 100);
        assert_eq!(img.height(), 50);
        assert!(!img.has_alpha());
        assert_eq!(img.byte_length(), 15000);
    }

    #[test]
    fn test_from_decoded_keeps_alpha() {
        let decoded = DecodedImage::new(2, 1, PixelLayout::Rgba8, vec![9u8; 8]);
        let js_img = JsDecodedImage::from_decoded(decoded);
        assert!(js_img.has_alpha());
        assert_eq!(js_img.pixels(), vec![9u8; 8]);
    }

    #[test]
    fn test_to_decoded_round_trip() {
        let js_img = JsDecodedImage::with_alpha(50, 25, vec![128u8; 50 * 25 * 4]);
        let decoded = js_img.to_decoded();
        assert_eq!(decoded.width, 50);
        assert_eq!(decoded.height, 25);
        assert_eq!(decoded.layout, PixelLayout::Rgba8);
        assert_eq!(decoded.pixels.len(), 5000);
    }

    #[test]
    fn test_format_from_u8() {
        assert_eq!(format_from_u8(0), OutputFormat::Jpeg);
        assert_eq!(format_from_u8(1), OutputFormat::Png);
        assert_eq!(format_from_u8(2), OutputFormat::WebP);
        assert_eq!(format_from_u8(255), OutputFormat::Jpeg);
    }
}
