//! Target encodings.

use serde::{Deserialize, Serialize};

/// Output format for re-encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Lossy JPEG; honours the quality setting.
    #[default]
    Jpeg,
    /// Lossless PNG; quality is ignored.
    Png,
    /// WebP; lossy and quality-driven with the `lossy-webp` feature,
    /// lossless otherwise.
    #[serde(rename = "webp")]
    WebP,
}

impl OutputFormat {
    /// Returns true if the encoder uses the quality hint.
    pub fn is_lossy(self) -> bool {
        match self {
            OutputFormat::Jpeg => true,
            OutputFormat::Png => false,
            OutputFormat::WebP => cfg!(feature = "lossy-webp"),
        }
    }

    /// Conventional file extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "jpg",
            OutputFormat::Png => "png",
            OutputFormat::WebP => "webp",
        }
    }

    /// MIME type of the encoded output.
    pub fn mime_type(self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "image/jpeg",
            OutputFormat::Png => "image/png",
            OutputFormat::WebP => "image/webp",
        }
    }

    /// The matching `image` crate format.
    pub fn to_image_format(self) -> image::ImageFormat {
        match self {
            OutputFormat::Jpeg => image::ImageFormat::Jpeg,
            OutputFormat::Png => image::ImageFormat::Png,
            OutputFormat::WebP => image::ImageFormat::WebP,
        }
    }
}

impl From<u8> for OutputFormat {
    /// 0 = Jpeg, 1 = Png, 2 = WebP. Unknown values fall back to Jpeg.
    fn from(value: u8) -> Self {
        match value {
            1 => OutputFormat::Png,
            2 => OutputFormat::WebP,
            _ => OutputFormat::Jpeg,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_metadata() {
        assert_eq!(OutputFormat::Jpeg.extension(), "jpg");
        assert_eq!(OutputFormat::WebP.mime_type(), "image/webp");
        assert!(OutputFormat::Jpeg.is_lossy());
        assert!(!OutputFormat::Png.is_lossy());
        assert_eq!(OutputFormat::WebP.is_lossy(), cfg!(feature = "lossy-webp"));
        assert_eq!(OutputFormat::Png.to_image_format(), image::ImageFormat::Png);
    }

    #[test]
    fn test_output_format_from_u8() {
        assert_eq!(OutputFormat::from(0), OutputFormat::Jpeg);
        assert_eq!(OutputFormat::from(1), OutputFormat::Png);
        assert_eq!(OutputFormat::from(2), OutputFormat::WebP);
        assert_eq!(OutputFormat::from(9), OutputFormat::Jpeg);
    }

    #[test]
    fn test_output_format_serde_names() {
        assert_eq!(serde_json::to_string(&OutputFormat::WebP).unwrap(), "\"webp\"");
        let parsed: OutputFormat = serde_json::from_str("\"png\"").unwrap();
        assert_eq!(parsed, OutputFormat::Png);
    }
}
