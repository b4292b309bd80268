//! The codec seam between the compressor and the pixel-level encoders.

use crate::decode::{self, DecodeError, DecodedImage};
use crate::encode::{self, EncodeError, OutputFormat};

/// Decode and encode capability the compressor is written against.
///
/// [`StandardCodec`] covers real images; tests plug in scripted codecs to
/// drive specific size outcomes.
///
/// Implementations report failures through the returned errors and must not
/// panic: the synchronous compressor does not catch unwinds.
pub trait ImageCodec: Send + Sync {
    /// Decode encoded bytes into pixels.
    fn decode(&self, bytes: &[u8]) -> Result<DecodedImage, DecodeError>;

    /// Encode pixels in `format`. `quality` is a hint in [0, 100].
    fn encode(
        &self,
        image: &DecodedImage,
        format: OutputFormat,
        quality: u8,
    ) -> Result<Vec<u8>, EncodeError>;
}

/// Codec backed by the `image` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardCodec;

impl ImageCodec for StandardCodec {
    fn decode(&self, bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
        decode::decode_image(bytes)
    }

    fn encode(
        &self,
        image: &DecodedImage,
        format: OutputFormat,
        quality: u8,
    ) -> Result<Vec<u8>, EncodeError> {
        encode::encode_image(image, format, quality)
    }
}

impl<C: ImageCodec + ?Sized> ImageCodec for &C {
    fn decode(&self, bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
        (**self).decode(bytes)
    }

    fn encode(
        &self,
        image: &DecodedImage,
        format: OutputFormat,
        quality: u8,
    ) -> Result<Vec<u8>, EncodeError> {
        (**self).encode(image, format, quality)
    }
}

impl<C: ImageCodec + ?Sized> ImageCodec for std::sync::Arc<C> {
    fn decode(&self, bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
        (**self).decode(bytes)
    }

    fn encode(
        &self,
        image: &DecodedImage,
        format: OutputFormat,
        quality: u8,
    ) -> Result<Vec<u8>, EncodeError> {
        (**self).encode(image, format, quality)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_standard_codec_round_trip_png() {
        let codec = StandardCodec;
        let img = DecodedImage::rgb(3, 2, (0..18).collect());
        let bytes = codec.encode(&img, OutputFormat::Png, 80).unwrap();
        assert_eq!(codec.decode(&bytes).unwrap(), img);
    }

    #[test]
    fn test_shared_codec_delegates() {
        let codec: Arc<dyn ImageCodec> = Arc::new(StandardCodec);
        let img = DecodedImage::rgb(2, 2, vec![50u8; 12]);
        let bytes = codec.encode(&img, OutputFormat::Jpeg, 90).unwrap();
        assert_eq!(&bytes[0..2], &[0xFF, 0xD8]);
        assert!(codec.decode(b"not an image").is_err());
    }
}
