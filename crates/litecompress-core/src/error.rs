//! Error types for the compression pipeline.
//!
//! These never escape [`ImageCompressor::compress`](crate::ImageCompressor::compress):
//! every error is classified once and folded into a [`CompressResult`](crate::CompressResult).

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::decode::DecodeError;
use crate::encode::EncodeError;

/// Failures that can occur while resolving, encoding or re-decoding an image.
#[derive(Debug, Error)]
pub enum CompressError {
    /// The input path does not exist
    #[error("File does not exist: {0}")]
    MissingInput(PathBuf),

    /// The codec could not produce an image
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    /// The encoder failed
    #[error("Encode error: {0}")]
    Encode(#[from] EncodeError),

    /// File IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Convenience result type for pipeline steps.
pub type PipelineResult<T> = Result<T, CompressError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CompressError::MissingInput(PathBuf::from("/nope.jpg"));
        assert_eq!(err.to_string(), "File does not exist: /nope.jpg");

        let err: CompressError = DecodeError::InvalidFormat.into();
        assert_eq!(err.to_string(), "Decode error: Invalid or unsupported image format");

        let err: CompressError = io::Error::new(io::ErrorKind::UnexpectedEof, "short read").into();
        assert_eq!(err.to_string(), "IO error: short read");
    }
}
