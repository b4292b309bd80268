//! litecompress core - threshold-driven image compression
//!
//! This crate decides whether an image needs compressing, re-encodes it when
//! it is over the configured size threshold, and falls back to the original
//! image whenever re-encoding fails or does not help.
//!
//! # Module Structure
//!
//! - `config` - Validated, immutable compression settings
//! - `compressor` - The decision engine and its input forms
//! - `codec` - The decode/encode seam the engine is written against
//! - `decode` / `encode` - `image`-crate backed pixel pipeline
//! - `result` - The per-call outcome
//! - `callback` / `dispatch` - Background compression with callback delivery
//!
//! # Examples
//!
//! ```ignore
//! use litecompress_core::{CompressConfig, ImageCompressor, OutputFormat};
//!
//! let config = CompressConfig::builder()
//!     .max_size_kb(500)
//!     .quality(75)
//!     .format(OutputFormat::Jpeg)
//!     .build()?;
//! let result = ImageCompressor::new(config).compress("photo.png");
//! if result.was_compressed() {
//!     println!("{} -> {} bytes", result.original_size(), result.compressed_size());
//! }
//! ```

pub mod callback;
pub mod codec;
pub mod compressor;
pub mod config;
pub mod decode;
#[cfg(feature = "async")]
mod dispatch;
pub mod encode;
pub mod error;
pub mod result;

pub use callback::CompressCallback;
pub use codec::{ImageCodec, StandardCodec};
pub use compressor::{CompressInput, ImageCompressor};
pub use config::{CompressConfig, CompressConfigBuilder, ConfigError};
pub use decode::{DecodedImage, PixelLayout};
pub use encode::OutputFormat;
pub use error::CompressError;
pub use result::CompressResult;
