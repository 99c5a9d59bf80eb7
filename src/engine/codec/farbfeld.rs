//! suckless farbfeld codec: `farbfeld` magic, big-endian u32 dimensions,
//! then 16-bit big-endian RGBA samples.

use std::io::Write;

use tracing::debug;

use crate::engine::buffer::samples::try_vec;
use crate::engine::buffer::{ColorSpace, PixelBuffer, SampleBuffer};
use crate::engine::codec::reader::{DecodedImage, ImageReader};
use crate::engine::codec::writer::ImageWriter;
use crate::engine::common::error::{EngineError, Result};

const MAGIC: &[u8; 8] = b"farbfeld";
const HEADER_LEN: usize = 16;

pub struct FarbfeldCodec;

impl ImageReader for FarbfeldCodec {
    fn read_image(&self, data: &[u8]) -> Result<DecodedImage> {
        if data.len() < HEADER_LEN || &data[..8] != MAGIC {
            return Err(EngineError::CorruptData("missing farbfeld header".into()));
        }
        let width = u32::from_be_bytes(data[8..12].try_into().unwrap()) as usize;
        let height = u32::from_be_bytes(data[12..16].try_into().unwrap()) as usize;
        debug!(width, height, "decoding farbfeld");

        let sample_count = width
            .checked_mul(height)
            .and_then(|pixels| pixels.checked_mul(4))
            .filter(|_| width > 0 && height > 0)
            .ok_or_else(|| {
                EngineError::CorruptData(format!("bad farbfeld dimensions {width}x{height}"))
            })?;
        let raster = data
            .get(HEADER_LEN..)
            .filter(|raster| raster.len() >= sample_count * 2)
            .ok_or_else(|| EngineError::CorruptData("farbfeld raster truncated".into()))?;

        let mut samples = try_vec::<u16>(sample_count)?;
        for (sample, bytes) in samples.iter_mut().zip(raster.chunks_exact(2)) {
            *sample = u16::from_be_bytes([bytes[0], bytes[1]]);
        }

        Ok(DecodedImage::bare(PixelBuffer::from_samples(
            width,
            height,
            ColorSpace::Rgba,
            SampleBuffer::U16(samples),
        )?))
    }
}

impl ImageWriter for FarbfeldCodec {
    fn write_image(&self, buffer: &PixelBuffer, output: &mut dyn Write) -> Result<()> {
        let SampleBuffer::U16(data) = buffer.samples() else {
            return Err(EngineError::UnsupportedFormat(format!(
                "farbfeld requires 16-bit samples, image is {:?}",
                buffer.depth()
            )));
        };
        if buffer.color_space() != ColorSpace::Rgba {
            return Err(EngineError::UnsupportedFormat(format!(
                "farbfeld requires Rgba, image is {:?}",
                buffer.color_space()
            )));
        }
        if buffer.width() > u32::MAX as usize || buffer.height() > u32::MAX as usize {
            return Err(EngineError::EncodeError(
                "image dimensions exceed farbfeld's 32-bit fields".into(),
            ));
        }

        output.write_all(MAGIC)?;
        output.write_all(&(buffer.width() as u32).to_be_bytes())?;
        output.write_all(&(buffer.height() as u32).to_be_bytes())?;
        for sample in data {
            output.write_all(&sample.to_be_bytes())?;
        }
        Ok(())
    }
}
