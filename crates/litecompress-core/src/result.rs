//! Compression outcome.

use crate::decode::DecodedImage;

/// Message attached when re-encoding did not shrink the image.
pub const MSG_LARGER_THAN_ORIGINAL: &str = "Compressed image is larger than original, return original";
/// Message attached when the re-encoded bytes could not be decoded again.
pub const MSG_REDECODE_FAILED: &str = "Failed to decode compressed image, return original";
/// Message for a source that could not be decoded.
pub const MSG_LOAD_FAILED: &str = "Failed to load original bitmap";
/// Message for a path that does not exist.
pub const MSG_FILE_MISSING: &str = "File does not exist";
/// Message for an already-decoded image without pixels.
pub const MSG_EMPTY_IMAGE: &str = "Original image is empty";

/// The outcome of one compression call.
///
/// Constructed only through the named constructors below, which keep the
/// size/flag invariants:
/// - `was_compressed` implies `compressed_size < original_size` and the image
///   is the decode of the re-encoded bytes;
/// - otherwise the image (if any) is the untouched input and both sizes match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressResult {
    success: bool,
    image: Option<DecodedImage>,
    error_message: Option<String>,
    original_size: u64,
    compressed_size: u64,
    was_compressed: bool,
}

impl CompressResult {
    /// No usable image was ever obtained.
    pub(crate) fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            image: None,
            error_message: Some(message.into()),
            original_size: 0,
            compressed_size: 0,
            was_compressed: false,
        }
    }

    /// Input was within the threshold and returned as-is.
    pub(crate) fn unchanged(image: DecodedImage, original_size: u64) -> Self {
        Self {
            success: true,
            image: Some(image),
            error_message: None,
            original_size,
            compressed_size: original_size,
            was_compressed: false,
        }
    }

    /// Compression was attempted but the original is returned, with the reason.
    pub(crate) fn fallback(
        image: DecodedImage,
        original_size: u64,
        message: impl Into<String>,
    ) -> Self {
        Self {
            success: true,
            image: Some(image),
            error_message: Some(message.into()),
            original_size,
            compressed_size: original_size,
            was_compressed: false,
        }
    }

    /// Re-encoding produced a smaller, decodable image.
    pub(crate) fn compressed(image: DecodedImage, original_size: u64, compressed_size: u64) -> Self {
        debug_assert!(compressed_size < original_size);
        Self {
            success: true,
            image: Some(image),
            error_message: None,
            original_size,
            compressed_size,
            was_compressed: true,
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    /// The resulting image; `None` only when the call failed.
    pub fn image(&self) -> Option<&DecodedImage> {
        self.image.as_ref()
    }

    /// Take ownership of the resulting image.
    pub fn into_image(self) -> Option<DecodedImage> {
        self.image
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Size of the input in bytes (estimated for already-decoded images).
    pub fn original_size(&self) -> u64 {
        self.original_size
    }

    pub fn compressed_size(&self) -> u64 {
        self.compressed_size
    }

    pub fn was_compressed(&self) -> bool {
        self.was_compressed
    }

    pub fn saved_bytes(&self) -> u64 {
        self.original_size.saturating_sub(self.compressed_size)
    }

    /// Percentage of the original size saved, 0.0 when the original size is unknown.
    pub fn compression_ratio(&self) -> f64 {
        if self.original_size == 0 {
            return 0.0;
        }
        self.saved_bytes() as f64 * 100.0 / self.original_size as f64
    }
}
