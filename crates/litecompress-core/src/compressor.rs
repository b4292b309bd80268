//! The compression decision engine.
//!
//! Every call resolves its input to a decoded image and an original size,
//! short-circuits when the input is already within the configured threshold,
//! and otherwise re-encodes once. The re-encoded image is only kept when it is
//! strictly smaller and decodes again; in every other case the original image
//! comes back with an explanatory message.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::codec::{ImageCodec, StandardCodec};
use crate::config::{CompressConfig, ESTIMATE_QUALITY};
use crate::decode::DecodedImage;
use crate::encode::OutputFormat;
use crate::error::{CompressError, PipelineResult};
use crate::result::{
    CompressResult, MSG_EMPTY_IMAGE, MSG_FILE_MISSING, MSG_LARGER_THAN_ORIGINAL, MSG_LOAD_FAILED,
    MSG_REDECODE_FAILED,
};

/// What to compress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompressInput {
    /// An encoded image on disk.
    Path(PathBuf),
    /// Encoded image bytes.
    Bytes(Vec<u8>),
    /// An image that is already decoded.
    ///
    /// When `original_size` is `None` (or zero) the size is estimated, see
    /// [`ImageCompressor::compress_image`].
    Image {
        image: DecodedImage,
        original_size: Option<u64>,
    },
}

impl From<PathBuf> for CompressInput {
    fn from(path: PathBuf) -> Self {
        CompressInput::Path(path)
    }
}

impl From<&Path> for CompressInput {
    fn from(path: &Path) -> Self {
        CompressInput::Path(path.to_path_buf())
    }
}

impl From<&str> for CompressInput {
    fn from(path: &str) -> Self {
        CompressInput::Path(PathBuf::from(path))
    }
}

impl From<String> for CompressInput {
    fn from(path: String) -> Self {
        CompressInput::Path(PathBuf::from(path))
    }
}

impl From<Vec<u8>> for CompressInput {
    fn from(bytes: Vec<u8>) -> Self {
        CompressInput::Bytes(bytes)
    }
}

impl From<&[u8]> for CompressInput {
    fn from(bytes: &[u8]) -> Self {
        CompressInput::Bytes(bytes.to_vec())
    }
}

impl From<DecodedImage> for CompressInput {
    fn from(image: DecodedImage) -> Self {
        CompressInput::Image {
            image,
            original_size: None,
        }
    }
}

/// Compresses images against one immutable [`CompressConfig`].
///
/// Stateless between calls; cloning yields an independent snapshot.
#[derive(Debug, Clone, Default)]
pub struct ImageCompressor<C = StandardCodec> {
    config: CompressConfig,
    codec: C,
}

impl ImageCompressor<StandardCodec> {
    /// Compressor backed by the `image` crate.
    pub fn new(config: CompressConfig) -> Self {
        Self::with_codec(config, StandardCodec)
    }
}

impl<C: ImageCodec> ImageCompressor<C> {
    pub fn with_codec(config: CompressConfig, codec: C) -> Self {
        Self { config, codec }
    }

    pub fn config(&self) -> &CompressConfig {
        &self.config
    }

    pub fn codec(&self) -> &C {
        &self.codec
    }

    /// Compress any supported input, blocking the calling thread.
    ///
    /// Never panics on bad input and never returns an error: failures are
    /// folded into the returned [`CompressResult`]. A panic raised by the codec
    /// itself is not caught here and unwinds to the caller; `compress_async`
    /// reports the same panic through `on_error` instead.
    pub fn compress(&self, input: impl Into<CompressInput>) -> CompressResult {
        match input.into() {
            CompressInput::Path(path) => self.compress_path(path),
            CompressInput::Bytes(bytes) => self.compress_bytes(&bytes),
            CompressInput::Image {
                image,
                original_size,
            } => self.compress_image(image, original_size),
        }
    }

    /// Compress the image stored at `path`. The file length is the original size.
    pub fn compress_path(&self, path: impl AsRef<Path>) -> CompressResult {
        let path = path.as_ref();
        match self.load_file(path) {
            Ok((image, original_size)) => self.decide(image, original_size),
            Err(CompressError::MissingInput(path)) => {
                warn!("Compression input missing: {}", path.display());
                CompressResult::failure(MSG_FILE_MISSING)
            }
            Err(CompressError::Decode(e)) => {
                warn!("Failed to decode {}: {}", path.display(), e);
                CompressResult::failure(MSG_LOAD_FAILED)
            }
            Err(e) => {
                warn!("Failed to read {}: {}", path.display(), e);
                CompressResult::failure(format!("Compression failed: {e}"))
            }
        }
    }

    /// Compress encoded image bytes. The byte length is the original size.
    pub fn compress_bytes(&self, bytes: &[u8]) -> CompressResult {
        let original_size = bytes.len() as u64;
        match self.codec.decode(bytes) {
            Ok(image) => self.decide(image, original_size),
            Err(e) => {
                warn!("Failed to decode {} input bytes: {}", original_size, e);
                CompressResult::failure(MSG_LOAD_FAILED)
            }
        }
    }

    /// Compress an already-decoded image.
    ///
    /// `original_size` should be the byte size of the encoding the image came
    /// from. When it is `None` or zero, the size is estimated by encoding the
    /// image once as JPEG at quality 100. That estimate is a heuristic, not the
    /// true size of any file, and it costs one extra encode.
    pub fn compress_image(&self, image: DecodedImage, original_size: Option<u64>) -> CompressResult {
        if image.is_empty() {
            warn!("Refusing to compress an empty image");
            return CompressResult::failure(MSG_EMPTY_IMAGE);
        }

        let original_size = match original_size.filter(|size| *size > 0) {
            Some(size) => size,
            None => match self.estimate_size(&image) {
                Ok(size) => size,
                Err(e) => {
                    warn!("Size estimation failed: {}", e);
                    return CompressResult::fallback(
                        image,
                        0,
                        format!("Compression error: {e}, return original"),
                    );
                }
            },
        };

        self.decide(image, original_size)
    }

    fn load_file(&self, path: &Path) -> PipelineResult<(DecodedImage, u64)> {
        if !path.exists() {
            return Err(CompressError::MissingInput(path.to_path_buf()));
        }

        let original_size = fs::metadata(path)?.len();
        let bytes = fs::read(path)?;
        let image = self.codec.decode(&bytes)?;
        debug!("Loaded {} ({} bytes)", path.display(), original_size);

        Ok((image, original_size))
    }

    fn estimate_size(&self, image: &DecodedImage) -> PipelineResult<u64> {
        let encoded = self
            .codec
            .encode(image, OutputFormat::Jpeg, ESTIMATE_QUALITY)?;
        debug!(
            "Estimated original size of {}x{} image at {} bytes",
            image.width,
            image.height,
            encoded.len()
        );
        Ok(encoded.len() as u64)
    }

    /// The decision procedure proper, once an image and its size are known.
    fn decide(&self, image: DecodedImage, original_size: u64) -> CompressResult {
        if self.config.within_threshold(original_size) {
            debug!(
                "{} KB is within the {} KB threshold, skipping compression",
                original_size / 1024,
                self.config.max_size_kb()
            );
            return CompressResult::unchanged(image, original_size);
        }

        let format = self.config.format();
        let quality = self.config.quality();
        let encoded = match self.codec.encode(&image, format, quality) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("Encoding as {:?} failed, returning original: {}", format, e);
                return CompressResult::fallback(
                    image,
                    original_size,
                    format!("Compression error: {e}, return original"),
                );
            }
        };

        let compressed_size = encoded.len() as u64;
        debug!(
            "Re-encoded as {:?} at quality {}: {} -> {} bytes",
            format, quality, original_size, compressed_size
        );

        if compressed_size >= original_size {
            warn!(
                "Re-encoded output ({} bytes) is not smaller than original ({} bytes)",
                compressed_size, original_size
            );
            return CompressResult::fallback(image, original_size, MSG_LARGER_THAN_ORIGINAL);
        }

        match self.codec.decode(&encoded) {
            Ok(compressed) => {
                info!(
                    "Compressed {} -> {} bytes ({:.1}% saved)",
                    original_size,
                    compressed_size,
                    (original_size - compressed_size) as f64 * 100.0 / original_size as f64
                );
                CompressResult::compressed(compressed, original_size, compressed_size)
            }
            Err(e) => {
                warn!("Re-encoded output failed to decode: {}", e);
                CompressResult::fallback(image, original_size, MSG_REDECODE_FAILED)
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::decode::DecodeError;
    use crate::encode::EncodeError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// First byte of every buffer the scripted codec encodes.
    pub const ENCODED_MARKER: u8 = 0xEE;

    pub fn source_image() -> DecodedImage {
        DecodedImage::rgb(2, 2, vec![10u8; 12])
    }

    pub fn recompressed_image() -> DecodedImage {
        DecodedImage::rgb(2, 2, vec![20u8; 12])
    }

    /// Codec with scripted sizes and failures.
    ///
    /// Source bytes decode to [`source_image`]; encoded bytes (marked with
    /// [`ENCODED_MARKER`]) decode to [`recompressed_image`].
    #[derive(Debug, Default)]
    pub struct ScriptedCodec {
        pub encoded_len: usize,
        pub fail_source_decode: bool,
        pub fail_encode: bool,
        pub fail_redecode: bool,
        pub encode_calls: AtomicUsize,
        pub encode_args: Mutex<Vec<(OutputFormat, u8)>>,
    }

    impl ScriptedCodec {
        pub fn producing(encoded_len: usize) -> Self {
            Self {
                encoded_len,
                ..Default::default()
            }
        }

        pub fn encode_count(&self) -> usize {
            self.encode_calls.load(Ordering::SeqCst)
        }
    }

    impl ImageCodec for ScriptedCodec {
        fn decode(&self, bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
            if bytes.first() == Some(&ENCODED_MARKER) {
                if self.fail_redecode {
                    return Err(DecodeError::CorruptedFile("scripted".to_string()));
                }
                return Ok(recompressed_image());
            }
            if self.fail_source_decode {
                return Err(DecodeError::InvalidFormat);
            }
            Ok(source_image())
        }

        fn encode(
            &self,
            _image: &DecodedImage,
            format: OutputFormat,
            quality: u8,
        ) -> Result<Vec<u8>, EncodeError> {
            self.encode_calls.fetch_add(1, Ordering::SeqCst);
            self.encode_args.lock().unwrap().push((format, quality));
            if self.fail_encode {
                return Err(EncodeError::EncodingFailed("scripted".to_string()));
            }
            let mut bytes = vec![0u8; self.encoded_len.max(1)];
            bytes[0] = ENCODED_MARKER;
            Ok(bytes)
        }
    }

    /// Codec that panics on every call.
    #[derive(Debug, Clone, Copy)]
    pub struct PanickingCodec;

    impl ImageCodec for PanickingCodec {
        fn decode(&self, _bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
            panic!("codec blew up");
        }

        fn encode(
            &self,
            _image: &DecodedImage,
            _format: OutputFormat,
            _quality: u8,
        ) -> Result<Vec<u8>, EncodeError> {
            panic!("codec blew up");
        }
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
