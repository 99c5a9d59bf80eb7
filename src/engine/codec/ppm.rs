//! Binary netpbm codec (P5 grayscale, P6 RGB).
//!
//! Sample values are stored big-endian at 16 bits, per the netpbm spec.
//! Only maxval 255 and 65535 are accepted; anything else would need
//! rescaling on load.

use std::io::Write;

use tracing::debug;

use crate::engine::buffer::samples::try_vec;
use crate::engine::buffer::{BitDepth, ColorSpace, PixelBuffer, SampleBuffer};
use crate::engine::codec::reader::{DecodedImage, ImageReader};
use crate::engine::codec::writer::ImageWriter;
use crate::engine::common::error::{EngineError, Result};

pub struct PpmCodec;

impl ImageReader for PpmCodec {
    fn read_image(&self, data: &[u8]) -> Result<DecodedImage> {
        let mut pos = 0;
        let magic = next_token(data, &mut pos)?;
        let color = match magic {
            b"P5" => ColorSpace::Luma,
            b"P6" => ColorSpace::Rgb,
            other => {
                return Err(EngineError::UnsupportedFormat(format!(
                    "netpbm magic {:?}",
                    String::from_utf8_lossy(other)
                )))
            }
        };

        let width = parse_number(next_token(data, &mut pos)?)?;
        let height = parse_number(next_token(data, &mut pos)?)?;
        let maxval = parse_number(next_token(data, &mut pos)?)?;
        // Exactly one whitespace byte separates the header from the raster.
        pos += 1;

        let depth = match maxval {
            255 => BitDepth::Eight,
            65535 => BitDepth::Sixteen,
            other => {
                return Err(EngineError::UnsupportedFormat(format!(
                    "netpbm maxval {other}"
                )))
            }
        };
        debug!(width, height, ?depth, ?color, "decoding netpbm");

        let sample_count = width
            .checked_mul(height)
            .and_then(|pixels| pixels.checked_mul(color.channels()))
            .filter(|_| width > 0 && height > 0)
            .ok_or_else(|| {
                EngineError::CorruptData(format!("bad netpbm dimensions {width}x{height}"))
            })?;
        let raster = data
            .get(pos..)
            .filter(|raster| raster.len() >= sample_count * depth.bytes_per_sample())
            .ok_or_else(|| EngineError::CorruptData("netpbm raster truncated".into()))?;

        let samples = match depth {
            BitDepth::Eight => {
                let mut samples = try_vec::<u8>(sample_count)?;
                samples.copy_from_slice(&raster[..sample_count]);
                SampleBuffer::U8(samples)
            }
            BitDepth::Sixteen => {
                let mut samples = try_vec::<u16>(sample_count)?;
                for (sample, bytes) in samples.iter_mut().zip(raster.chunks_exact(2)) {
                    *sample = u16::from_be_bytes([bytes[0], bytes[1]]);
                }
                SampleBuffer::U16(samples)
            }
            BitDepth::Float32 => unreachable!("netpbm is integer-only"),
        };

        Ok(DecodedImage::bare(PixelBuffer::from_samples(
            width, height, color, samples,
        )?))
    }
}

impl ImageWriter for PpmCodec {
    fn write_image(&self, buffer: &PixelBuffer, output: &mut dyn Write) -> Result<()> {
        let magic = match buffer.color_space() {
            ColorSpace::Luma => "P5",
            ColorSpace::Rgb => "P6",
            other => {
                return Err(EngineError::UnsupportedFormat(format!(
                    "netpbm cannot store {other:?}; convert to Luma or Rgb first"
                )))
            }
        };
        let maxval = match buffer.depth() {
            BitDepth::Eight => 255u32,
            BitDepth::Sixteen => 65535,
            BitDepth::Float32 => {
                return Err(EngineError::UnsupportedFormat(
                    "netpbm cannot store float samples; convert depth first".into(),
                ))
            }
        };

        write!(
            output,
            "{magic}\n{} {}\n{maxval}\n",
            buffer.width(),
            buffer.height()
        )?;
        match buffer.samples() {
            SampleBuffer::U8(data) => output.write_all(data)?,
            SampleBuffer::U16(data) => {
                for sample in data {
                    output.write_all(&sample.to_be_bytes())?;
                }
            }
            SampleBuffer::F32(_) => unreachable!("rejected above"),
        }
        Ok(())
    }
}

/// Skip whitespace and `#` comments, then return the next header token.
fn next_token<'a>(data: &'a [u8], pos: &mut usize) -> Result<&'a [u8]> {
    loop {
        match data.get(*pos) {
            Some(b) if b.is_ascii_whitespace() => *pos += 1,
            Some(b'#') => {
                while !matches!(data.get(*pos), None | Some(b'\n')) {
                    *pos += 1;
                }
            }
            Some(_) => break,
            None => return Err(EngineError::CorruptData("netpbm header truncated".into())),
        }
    }
    let start = *pos;
    while data.get(*pos).is_some_and(|b| !b.is_ascii_whitespace()) {
        *pos += 1;
    }
    Ok(&data[start..*pos])
}

fn parse_number(token: &[u8]) -> Result<usize> {
    std::str::from_utf8(token)
        .ok()
        .and_then(|t| t.parse().ok())
        .ok_or_else(|| {
            EngineError::CorruptData(format!(
                "bad netpbm header field {:?}",
                String::from_utf8_lossy(token)
            ))
        })
}
