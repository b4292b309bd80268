//! Image encoding WASM bindings.
//!
//! Lets the page save whatever image a compression returned, in any of the
//! supported formats.
//!
//! ```typescript
//! const image = result.image();
//! const jpeg = encode_image(image, 0, 90);
//! await writable.write(new Blob([jpeg], { type: 'image/jpeg' }));
//! ```

use crate::types::{format_from_u8, JsDecodedImage};
use litecompress_core::encode;
use wasm_bindgen::prelude::*;

/// Encode an image to bytes.
///
/// # Arguments
///
/// * `image` - The image to encode
/// * `format` - 0 = JPEG, 1 = PNG, 2 = WebP
/// * `quality` - 0-100, only used for JPEG
///
/// # Errors
///
/// Returns an error if the pixel buffer doesn't match the dimensions, or a
/// dimension is zero.
#[wasm_bindgen]
pub fn encode_image(image: &JsDecodedImage, format: u8, quality: u8) -> Result<Vec<u8>, JsValue> {
    encode::encode_image(&image.to_decoded(), format_from_u8(format), quality)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Tests for encode bindings.
///
/// Functions returning `Result<T, JsValue>` only work on wasm32 targets, so
/// host tests exercise the same path through the core encoder.
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_from_js_image_creates_valid_jpeg() {
        let img = JsDecodedImage::new(10, 10, vec![128u8; 10 * 10 * 3]);
        let jpeg =
            encode::encode_image(&img.to_decoded(), format_from_u8(0), 90).unwrap();
        assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn test_encode_from_js_image_with_alpha_as_png() {
        let img = JsDecodedImage::with_alpha(3, 3, vec![7u8; 3 * 3 * 4]);
        let png = encode::encode_image(&img.to_decoded(), format_from_u8(1), 0).unwrap();
        assert_eq!(&png[1..4], b"PNG");
    }
}

/// WASM-specific tests that require JsValue.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_encode_image_webp() {
        let img = JsDecodedImage::new(8, 8, vec![50u8; 8 * 8 * 3]);
        let webp = encode_image(&img, 2, 80).unwrap();
        assert_eq!(&webp[0..4], b"RIFF");
    }

    #[wasm_bindgen_test]
    fn test_encode_image_invalid_dimensions() {
        let img = JsDecodedImage::new(0, 10, vec![]);
        assert!(encode_image(&img, 0, 80).is_err());
    }
}
