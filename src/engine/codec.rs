//! Decode container formats into pixel buffers and encode them back.
//!
//! Each format is a small codec implementing the [`ImageReader`] /
//! [`ImageWriter`] seams; `decode`/`encode` pick one by detected or
//! requested format.

pub mod farbfeld;
pub mod format;
pub mod ppm;
pub mod reader;
pub mod tiff;
pub mod writer;

#[cfg(test)]
mod tests;

pub use farbfeld::FarbfeldCodec;
pub use format::ImageFormat;
pub use ppm::PpmCodec;
pub use reader::{DecodedImage, ImageReader};
pub use tiff::TiffCodec;
pub use writer::ImageWriter;

use crate::engine::buffer::PixelBuffer;
use crate::engine::common::error::{EngineError, Result};

fn reader_for(format: ImageFormat) -> &'static dyn ImageReader {
    match format {
        ImageFormat::Ppm => &PpmCodec,
        ImageFormat::Farbfeld => &FarbfeldCodec,
        ImageFormat::Tiff => &TiffCodec,
    }
}

fn writer_for(format: ImageFormat) -> &'static dyn ImageWriter {
    match format {
        ImageFormat::Ppm => &PpmCodec,
        ImageFormat::Farbfeld => &FarbfeldCodec,
        ImageFormat::Tiff => &TiffCodec,
    }
}

/// Decode a byte slice, detecting the container by its magic bytes.
pub fn decode(data: &[u8]) -> Result<DecodedImage> {
    let format = ImageFormat::detect(data).ok_or_else(|| {
        EngineError::UnsupportedFormat("unrecognized container signature".into())
    })?;
    decode_as(data, format)
}

/// Decode a byte slice as a specific format.
pub fn decode_as(data: &[u8], format: ImageFormat) -> Result<DecodedImage> {
    reader_for(format).read_image(data)
}

/// Serialize a pixel buffer into the requested container format.
pub fn encode(buffer: &PixelBuffer, format: ImageFormat) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    writer_for(format).write_image(buffer, &mut bytes)?;
    Ok(bytes)
}
