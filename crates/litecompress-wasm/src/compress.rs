//! Compression WASM bindings.
//!
//! # Functions
//!
//! - [`compress_bytes`] - Compress an encoded image (e.g. a picked file's bytes)
//! - [`compress_image`] - Compress an image that is already decoded
//!
//! Both run synchronously on the calling thread; call them from a Web Worker
//! to keep the UI responsive.
//!
//! # Example
//!
//! ```typescript
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const result = compress_bytes(bytes, new JsCompressConfig(1024, 80, 0));
//! if (result.success) {
//!   console.log(`${result.original_size} -> ${result.compressed_size}`);
//! } else {
//!   console.error(result.error_message);
//! }
//! ```

use crate::config::JsCompressConfig;
use crate::types::JsDecodedImage;
use litecompress_core::{CompressResult, ImageCompressor};
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// Outcome of one compression call.
#[wasm_bindgen]
pub struct JsCompressResult {
    inner: CompressResult,
}

/// Plain-object view of a result, without pixels.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ResultSummary<'a> {
    success: bool,
    was_compressed: bool,
    original_size: u64,
    compressed_size: u64,
    error_message: Option<&'a str>,
}

#[wasm_bindgen]
impl JsCompressResult {
    #[wasm_bindgen(getter)]
    pub fn success(&self) -> bool {
        self.inner.is_success()
    }

    #[wasm_bindgen(getter)]
    pub fn was_compressed(&self) -> bool {
        self.inner.was_compressed()
    }

    /// Original size in bytes
    #[wasm_bindgen(getter)]
    pub fn original_size(&self) -> f64 {
        self.inner.original_size() as f64
    }

    /// Compressed size in bytes (equals original_size when nothing was kept)
    #[wasm_bindgen(getter)]
    pub fn compressed_size(&self) -> f64 {
        self.inner.compressed_size() as f64
    }

    #[wasm_bindgen(getter)]
    pub fn error_message(&self) -> Option<String> {
        self.inner.error_message().map(str::to_string)
    }

    /// The resulting image, or undefined when the call failed. Copies the pixels.
    pub fn image(&self) -> Option<JsDecodedImage> {
        self.inner.image().cloned().map(JsDecodedImage::from_decoded)
    }

    /// Sizes and message as a plain object `{ success, wasCompressed, originalSize, ... }`
    pub fn to_object(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.summary()).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

impl JsCompressResult {
    fn new(inner: CompressResult) -> Self {
        if let Some(message) = inner.error_message() {
            console_warn(message);
        }
        Self { inner }
    }

    fn summary(&self) -> ResultSummary<'_> {
        ResultSummary {
            success: self.inner.is_success(),
            was_compressed: self.inner.was_compressed(),
            original_size: self.inner.original_size(),
            compressed_size: self.inner.compressed_size(),
            error_message: self.inner.error_message(),
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn console_warn(message: &str) {
    web_sys::console::warn_1(&JsValue::from_str(message));
}

#[cfg(not(target_arch = "wasm32"))]
fn console_warn(_message: &str) {}

/// Compress encoded image bytes (JPEG, PNG or WebP).
///
/// The byte length is taken as the original size. Never throws: failures are
/// reported through `success` and `error_message`.
#[wasm_bindgen]
pub fn compress_bytes(bytes: &[u8], config: &JsCompressConfig) -> JsCompressResult {
    JsCompressResult::new(ImageCompressor::new(*config.inner()).compress_bytes(bytes))
}

/// Compress an already-decoded image.
///
/// Pass the size of the file the image came from as `original_size`. With 0
/// the size is estimated by a JPEG encode at quality 100, which is only an
/// approximation.
#[wasm_bindgen]
pub fn compress_image(
    image: &JsDecodedImage,
    original_size: f64,
    config: &JsCompressConfig,
) -> JsCompressResult {
    let known = (original_size > 0.0).then_some(original_size as u64);
    JsCompressResult::new(ImageCompressor::new(*config.inner()).compress_image(image.to_decoded(), known))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageFormat, RgbImage};
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbImage::from_fn(width, height, |x, y| {
            image::Rgb([(x * 7 + y * 13) as u8, (x * y) as u8, (x ^ y) as u8])
        });
        let mut buffer = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(img)
            .write_to(&mut buffer, ImageFormat::Png)
            .unwrap();
        buffer.into_inner()
    }

    #[test]
    fn test_compress_bytes_within_threshold() {
        let bytes = png_bytes(8, 8);
        let config = JsCompressConfig::try_new(1024, 80, 0).unwrap();
        let result = compress_bytes(&bytes, &config);

        assert!(result.success());
        assert!(!result.was_compressed());
        assert_eq!(result.original_size(), bytes.len() as f64);
        assert_eq!(result.compressed_size(), result.original_size());
        let image = result.image().unwrap();
        assert_eq!((image.width(), image.height()), (8, 8));
    }

    #[test]
    fn test_compress_bytes_garbage() {
        let config = JsCompressConfig::try_new(1024, 80, 0).unwrap();
        let result = compress_bytes(b"garbage", &config);

        assert!(!result.success());
        assert!(result.image().is_none());
        assert_eq!(
            result.error_message().as_deref(),
            Some("Failed to load original bitmap")
        );
    }

    #[test]
    fn test_compress_image_known_size() {
        let image = JsDecodedImage::new(4, 4, vec![200u8; 4 * 4 * 3]);
        let config = JsCompressConfig::try_new(1024, 80, 0).unwrap();
        let result = compress_image(&image, 2048.0, &config);

        assert!(result.success());
        assert_eq!(result.original_size(), 2048.0);
        assert_eq!(result.image().unwrap().pixels(), vec![200u8; 48]);
    }

    #[test]
    fn test_summary_fields() {
        let config = JsCompressConfig::try_new(1024, 80, 0).unwrap();
        let result = compress_bytes(b"garbage", &config);
        let summary = result.summary();
        assert!(!summary.success);
        assert_eq!(summary.original_size, 0);
        assert_eq!(summary.error_message, Some("Failed to load original bitmap"));
    }
}
