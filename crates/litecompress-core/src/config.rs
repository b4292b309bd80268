//! Compression configuration.
//!
//! A [`CompressConfig`] is validated once when built and is immutable
//! afterwards. Deserialisation goes through the same validation as the
//! builder, so a config loaded from JSON can never carry an out-of-range
//! quality.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::encode::OutputFormat;

/// Default size threshold in kilobytes.
pub const DEFAULT_MAX_SIZE_KB: u64 = 1024;

/// Default encoder quality.
pub const DEFAULT_QUALITY: u8 = 80;

/// Quality used when estimating the size of an image that arrived already decoded.
pub const ESTIMATE_QUALITY: u8 = 100;

/// Configuration validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Quality must be between 0 and 100, got {0}")]
    QualityOutOfRange(i32),
}

/// Immutable compression settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CompressConfigBuilder", into = "CompressConfigBuilder")]
pub struct CompressConfig {
    max_size_kb: u64,
    quality: u8,
    format: OutputFormat,
}

impl Default for CompressConfig {
    fn default() -> Self {
        Self {
            max_size_kb: DEFAULT_MAX_SIZE_KB,
            quality: DEFAULT_QUALITY,
            format: OutputFormat::default(),
        }
    }
}

impl CompressConfig {
    /// Build a validated config in one call.
    pub fn new(max_size_kb: u64, quality: i32, format: OutputFormat) -> Result<Self, ConfigError> {
        Self::builder()
            .max_size_kb(max_size_kb)
            .quality(quality)
            .format(format)
            .build()
    }

    /// Start from the defaults (1024 KB, quality 80, JPEG).
    pub fn builder() -> CompressConfigBuilder {
        CompressConfigBuilder::default()
    }

    /// Size threshold in kilobytes; inputs at or below it are left alone.
    pub fn max_size_kb(&self) -> u64 {
        self.max_size_kb
    }

    /// Encoder quality in [0, 100].
    pub fn quality(&self) -> u8 {
        self.quality
    }

    /// Target encoding.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Threshold expressed in bytes.
    pub fn threshold_bytes(&self) -> u64 {
        self.max_size_kb.saturating_mul(1024)
    }

    /// Returns true if an input of `size_bytes` is small enough to skip compression.
    ///
    /// Sizes are compared in whole kilobytes, truncating, so anything below
    /// `(max_size_kb + 1) * 1024` bytes is within the threshold.
    pub fn within_threshold(&self, size_bytes: u64) -> bool {
        size_bytes / 1024 <= self.max_size_kb
    }
}

/// Builder for [`CompressConfig`]. Validation happens in [`build`](Self::build).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CompressConfigBuilder {
    max_size_kb: u64,
    quality: i32,
    format: OutputFormat,
}

impl Default for CompressConfigBuilder {
    fn default() -> Self {
        Self {
            max_size_kb: DEFAULT_MAX_SIZE_KB,
            quality: DEFAULT_QUALITY as i32,
            format: OutputFormat::default(),
        }
    }
}

impl CompressConfigBuilder {
    pub fn max_size_kb(mut self, max_size_kb: u64) -> Self {
        self.max_size_kb = max_size_kb;
        self
    }

    pub fn quality(mut self, quality: i32) -> Self {
        self.quality = quality;
        self
    }

    pub fn format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn build(self) -> Result<CompressConfig, ConfigError> {
        let quality = u8::try_from(self.quality)
            .ok()
            .filter(|q| *q <= 100)
            .ok_or(ConfigError::QualityOutOfRange(self.quality))?;

        Ok(CompressConfig {
            max_size_kb: self.max_size_kb,
            quality,
            format: self.format,
        })
    }
}

impl TryFrom<CompressConfigBuilder> for CompressConfig {
    type Error = ConfigError;

    fn try_from(builder: CompressConfigBuilder) -> Result<Self, Self::Error> {
        builder.build()
    }
}

impl From<CompressConfig> for CompressConfigBuilder {
    fn from(config: CompressConfig) -> Self {
        Self {
            max_size_kb: config.max_size_kb,
            quality: config.quality as i32,
            format: config.format,
        }
    }
}
