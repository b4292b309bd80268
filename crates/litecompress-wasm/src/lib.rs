//! litecompress WASM - WebAssembly bindings for litecompress
//!
//! This crate exposes the synchronous litecompress engine to JavaScript/TypeScript.
//!
//! # Module Structure
//!
//! - `config` - Validated compression settings
//! - `compress` - Compression entry points and the result wrapper
//! - `encode` - Saving a result image in a chosen format
//! - `types` - WASM-compatible wrapper types for image data
//!
//! # Usage
//!
//! ```typescript
//! import init, { compress_bytes, JsCompressConfig } from '@litecompress/wasm';
//!
//! await init();
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const result = compress_bytes(bytes, new JsCompressConfig(1024, 80, 0));
//! console.log(result.to_object());
//! ```

use wasm_bindgen::prelude::*;

mod compress;
mod config;
mod encode;
mod types;

// Re-export public types
pub use compress::{compress_bytes, compress_image, JsCompressResult};
pub use config::JsCompressConfig;
pub use encode::encode_image;
pub use types::JsDecodedImage;

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
