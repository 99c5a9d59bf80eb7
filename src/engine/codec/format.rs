//! Container format tags and detection.

use std::path::Path;

/// Supported image container formats.
///
/// The numeric codes are stable and shared with binding layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    /// Binary netpbm (P5 grayscale / P6 RGB), 8- or 16-bit.
    Ppm,
    /// suckless farbfeld, always 16-bit RGBA.
    Farbfeld,
    Tiff,
}

impl ImageFormat {
    /// Detect a format from its leading magic bytes.
    pub fn detect(data: &[u8]) -> Option<Self> {
        match data {
            [b'P', b'5' | b'6', b' ' | b'\t' | b'\n' | b'\r', ..] => Some(ImageFormat::Ppm),
            [b'f', b'a', b'r', b'b', b'f', b'e', b'l', b'd', ..] => Some(ImageFormat::Farbfeld),
            [b'I', b'I', 42, 0, ..] | [b'M', b'M', 0, 42, ..] => Some(ImageFormat::Tiff),
            _ => None,
        }
    }

    /// Guess a format from a file extension, case-insensitive.
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "ppm" | "pgm" => Some(ImageFormat::Ppm),
            "ff" => Some(ImageFormat::Farbfeld),
            "tif" | "tiff" => Some(ImageFormat::Tiff),
            _ => None,
        }
    }

    /// Stable integer code exchanged with binding layers.
    pub const fn code(self) -> u32 {
        match self {
            ImageFormat::Ppm => 1,
            ImageFormat::Farbfeld => 2,
            ImageFormat::Tiff => 3,
        }
    }

    pub const fn from_code(code: u32) -> Option<Self> {
        match code {
            1 => Some(ImageFormat::Ppm),
            2 => Some(ImageFormat::Farbfeld),
            3 => Some(ImageFormat::Tiff),
            _ => None,
        }
    }
}
