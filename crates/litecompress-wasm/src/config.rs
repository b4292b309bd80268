//! Compression configuration WASM bindings.

use crate::types::format_from_u8;
use litecompress_core::{CompressConfig, ConfigError};
use wasm_bindgen::prelude::*;

/// Compression settings for JavaScript.
///
/// ```typescript
/// const config = new JsCompressConfig(1024, 80, 0); // 1 MB, quality 80, JPEG
/// const same = JsCompressConfig.from_object({ maxSizeKb: 1024, quality: 80, format: "jpeg" });
/// ```
#[wasm_bindgen]
#[derive(Debug, Clone, Default)]
pub struct JsCompressConfig {
    inner: CompressConfig,
}

#[wasm_bindgen]
impl JsCompressConfig {
    /// Create a config; fails if quality is outside 0-100.
    ///
    /// `format`: 0 = JPEG, 1 = PNG, 2 = WebP.
    #[wasm_bindgen(constructor)]
    pub fn new(max_size_kb: u32, quality: i32, format: u8) -> Result<JsCompressConfig, JsValue> {
        Self::try_new(max_size_kb, quality, format).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Build from a plain object `{ maxSizeKb?, quality?, format? }`; missing keys take defaults.
    pub fn from_object(value: JsValue) -> Result<JsCompressConfig, JsValue> {
        let inner: CompressConfig =
            serde_wasm_bindgen::from_value(value).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self { inner })
    }

    /// Serialize to a plain object
    pub fn to_object(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen(getter)]
    pub fn max_size_kb(&self) -> f64 {
        self.inner.max_size_kb() as f64
    }

    #[wasm_bindgen(getter)]
    pub fn quality(&self) -> u8 {
        self.inner.quality()
    }

    /// MIME type of the configured output format
    #[wasm_bindgen(getter)]
    pub fn mime_type(&self) -> String {
        self.inner.format().mime_type().to_string()
    }
}

impl JsCompressConfig {
    pub(crate) fn try_new(max_size_kb: u32, quality: i32, format: u8) -> Result<Self, ConfigError> {
        let inner = CompressConfig::new(max_size_kb as u64, quality, format_from_u8(format))?;
        Ok(Self { inner })
    }

    pub(crate) fn inner(&self) -> &CompressConfig {
        &self.inner
    }
}
