//! Bit-depth conversion.
//!
//! 8 <-> 16 bit uses the exact factor 257 (0xFF maps to 0xFFFF), inverted
//! with round-to-nearest so an 8->16->8 round trip is lossless. Integer
//! <-> float normalizes over [0, 1]; float back to integer rounds to
//! nearest and clamps.

use tracing::debug;

use crate::engine::buffer::samples::try_vec;
use crate::engine::buffer::{BitDepth, PixelBuffer, SampleBuffer};
use crate::engine::common::error::Result;
use crate::engine::ops::ImageOp;

pub struct ConvertDepth {
    target: BitDepth,
}

impl ConvertDepth {
    pub fn new(target: BitDepth) -> Self {
        Self { target }
    }
}

impl ImageOp for ConvertDepth {
    fn name(&self) -> &'static str {
        "convert_depth"
    }

    fn apply(&self, buffer: &mut PixelBuffer) -> Result<()> {
        let from = buffer.depth();
        if from == self.target {
            return Ok(());
        }
        let samples = match (buffer.samples(), self.target) {
            (SampleBuffer::U8(data), BitDepth::Sixteen) => {
                SampleBuffer::U16(map_into(data, |v| v as u16 * 257)?)
            }
            (SampleBuffer::U8(data), BitDepth::Float32) => {
                SampleBuffer::F32(map_into(data, |v| v as f32 / 255.0)?)
            }
            (SampleBuffer::U16(data), BitDepth::Eight) => {
                SampleBuffer::U8(map_into(data, |v| ((v as u32 + 128) / 257) as u8)?)
            }
            (SampleBuffer::U16(data), BitDepth::Float32) => {
                SampleBuffer::F32(map_into(data, |v| v as f32 / 65535.0)?)
            }
            (SampleBuffer::F32(data), BitDepth::Eight) => {
                SampleBuffer::U8(map_into(data, |v| (v.clamp(0.0, 1.0) * 255.0).round() as u8)?)
            }
            (SampleBuffer::F32(data), BitDepth::Sixteen) => {
                SampleBuffer::U16(map_into(data, |v| {
                    (v.clamp(0.0, 1.0) * 65535.0).round() as u16
                })?)
            }
            // Same depth was handled above.
            _ => unreachable!("depth conversion pair already filtered"),
        };
        debug!(?from, to = ?self.target, "converted bit depth");
        buffer.samples = samples;
        Ok(())
    }
}

fn map_into<S: Copy, D: Copy + Default>(src: &[S], f: impl Fn(S) -> D) -> Result<Vec<D>> {
    let mut dst = try_vec::<D>(src.len())?;
    for (d, s) in dst.iter_mut().zip(src) {
        *d = f(*s);
    }
    Ok(dst)
}
