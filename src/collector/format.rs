//! # Image Format Module
//!
//! This module defines the [`ImageFormat`] enum, which represents the file type of
//! an image as announced by the server through its `Content-Type` header.
//!
//! Only the formats listed here are accepted. Anything else (including a missing
//! header) makes the download fail before a single byte is written to disk.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use super::error::DownloadError;

/// Allowed image types and the extension the saved file gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    GIF,
    /// Covers both `image/jpeg` and the legacy progressive `image/pjpeg`.
    JPG,
    PNG,
    SVG,
    TIFF,
    ICO,
    WBMP,
    WEBP,
}

impl ImageFormat {
    /// Looks up the format for a raw `Content-Type` header value.
    ///
    /// Parameters such as `; charset=binary` and letter case are ignored.
    ///
    /// ```
    /// # use dermis_collector::ImageFormat;
    /// assert_eq!(ImageFormat::from_content_type("image/jpeg"), Some(ImageFormat::JPG));
    /// assert_eq!(ImageFormat::from_content_type("IMAGE/PNG; charset=binary"), Some(ImageFormat::PNG));
    /// assert_eq!(ImageFormat::from_content_type("text/html"), None);
    /// ```
    pub fn from_content_type(value: &str) -> Option<Self> {
        value.parse().ok()
    }

    /// File extension used when saving, without the leading dot.
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::GIF => "gif",
            Self::JPG => "jpg",
            Self::PNG => "png",
            Self::SVG => "svg",
            Self::TIFF => "tiff",
            Self::ICO => "ico",
            Self::WBMP => "wbmp",
            Self::WEBP => "webp",
        }
    }
}

impl FromStr for ImageFormat {
    type Err = DownloadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mime = s.split(';').next().unwrap_or_default().trim();

        match mime.to_lowercase().as_str() {
            "image/gif" => Ok(Self::GIF),
            "image/jpeg" | "image/pjpeg" => Ok(Self::JPG),
            "image/png" => Ok(Self::PNG),
            "image/svg+xml" => Ok(Self::SVG),
            "image/tiff" => Ok(Self::TIFF),
            "image/vnd.microsoft.icon" => Ok(Self::ICO),
            "image/vnd.wap.wbmp" => Ok(Self::WBMP),
            "image/webp" => Ok(Self::WEBP),
            _ => Err(DownloadError::UnknownMimeType {
                message: s.to_string(),
            }),
        }
    }
}

impl Display for ImageFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}
