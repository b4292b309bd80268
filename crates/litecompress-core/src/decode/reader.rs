//! Container-sniffing image decoding.

use std::io::Cursor;

use image::ImageReader;

use super::{DecodeError, DecodedImage};

/// Decode an encoded image (JPEG, PNG or WebP) from bytes.
///
/// The container format is detected from the leading magic bytes, never from
/// a file name. Alpha is preserved when the source carries it.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the bytes do not start with a known
/// image signature.
/// Returns `DecodeError::CorruptedFile` if the container is recognized but the
/// payload cannot be decoded.
pub fn decode_image(bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
    let format = sniff_format(bytes).ok_or(DecodeError::InvalidFormat)?;

    let img = ImageReader::with_format(Cursor::new(bytes), format)
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    let decoded = DecodedImage::from_dynamic(img);
    if decoded.is_empty() {
        return Err(DecodeError::CorruptedFile("image has no pixels".to_string()));
    }
    Ok(decoded)
}

/// Detect the container format of encoded bytes without decoding them.
pub fn sniff_format(bytes: &[u8]) -> Option<image::ImageFormat> {
    image::guess_format(bytes).ok()
}
