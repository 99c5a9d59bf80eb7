//! Color space conversion.
//!
//! Each defined pair remaps the interleaved channel layout; converting to
//! the current space is a no-op, so repeated conversions are idempotent.
//! Luma extraction uses BT.601 weights; YCbCr is full-range BT.601.

use tracing::debug;

use crate::engine::buffer::samples::{try_vec, Sample};
use crate::engine::buffer::{ColorSpace, PixelBuffer, SampleBuffer};
use crate::engine::common::error::{EngineError, Result};
use crate::engine::ops::ImageOp;

const LUMA_WEIGHTS: [f32; 3] = [0.299, 0.587, 0.114];

pub struct ConvertColorSpace {
    target: ColorSpace,
}

impl ConvertColorSpace {
    pub fn new(target: ColorSpace) -> Self {
        Self { target }
    }
}

impl ImageOp for ConvertColorSpace {
    fn name(&self) -> &'static str {
        "convert_color_space"
    }

    fn apply(&self, buffer: &mut PixelBuffer) -> Result<()> {
        let from = buffer.color_space();
        if from == self.target {
            return Ok(());
        }
        let pixels = buffer.width() * buffer.height();
        let samples = match buffer.samples() {
            SampleBuffer::U8(data) => {
                SampleBuffer::U8(convert_samples(data, from, self.target, pixels)?)
            }
            SampleBuffer::U16(data) => {
                SampleBuffer::U16(convert_samples(data, from, self.target, pixels)?)
            }
            SampleBuffer::F32(data) => {
                SampleBuffer::F32(convert_samples(data, from, self.target, pixels)?)
            }
        };
        debug!(?from, to = ?self.target, "converted color space");
        buffer.samples = samples;
        buffer.color = self.target;
        Ok(())
    }
}

fn convert_samples<T: Sample>(
    src: &[T],
    from: ColorSpace,
    to: ColorSpace,
    pixels: usize,
) -> Result<Vec<T>> {
    let mut dst = try_vec::<T>(pixels * to.channels())?;
    let opaque = T::from_f32(T::MAX);
    let src_pixels = src.chunks_exact(from.channels());
    let dst_pixels = dst.chunks_exact_mut(to.channels());

    use ColorSpace::*;
    match (from, to) {
        (Luma, LumaA) => {
            for (s, d) in src_pixels.zip(dst_pixels) {
                d[0] = s[0];
                d[1] = opaque;
            }
        }
        (Luma, Rgb) | (Luma, Rgba) => {
            for (s, d) in src_pixels.zip(dst_pixels) {
                d[0] = s[0];
                d[1] = s[0];
                d[2] = s[0];
                if to.has_alpha() {
                    d[3] = opaque;
                }
            }
        }
        (LumaA, Luma) => {
            for (s, d) in src_pixels.zip(dst_pixels) {
                d[0] = s[0];
            }
        }
        (LumaA, Rgba) => {
            for (s, d) in src_pixels.zip(dst_pixels) {
                d[0] = s[0];
                d[1] = s[0];
                d[2] = s[0];
                d[3] = s[1];
            }
        }
        (Rgb, Rgba) => {
            for (s, d) in src_pixels.zip(dst_pixels) {
                d[..3].copy_from_slice(s);
                d[3] = opaque;
            }
        }
        // Alpha is dropped, not composited.
        (Rgba, Rgb) => {
            for (s, d) in src_pixels.zip(dst_pixels) {
                d.copy_from_slice(&s[..3]);
            }
        }
        (Rgb, Luma) | (Rgba, Luma) | (Rgb, LumaA) | (Rgba, LumaA) => {
            for (s, d) in src_pixels.zip(dst_pixels) {
                d[0] = weighted_luma(s);
                if to.has_alpha() {
                    d[1] = if from.has_alpha() { s[3] } else { opaque };
                }
            }
        }
        (Rgb, YCbCr) => {
            for (s, d) in src_pixels.zip(dst_pixels) {
                let r = s[0].to_f32() / T::MAX;
                let g = s[1].to_f32() / T::MAX;
                let b = s[2].to_f32() / T::MAX;
                let y = LUMA_WEIGHTS[0] * r + LUMA_WEIGHTS[1] * g + LUMA_WEIGHTS[2] * b;
                d[0] = T::from_f32(y * T::MAX);
                d[1] = T::from_f32(((b - y) / 1.772 + 0.5) * T::MAX);
                d[2] = T::from_f32(((r - y) / 1.402 + 0.5) * T::MAX);
            }
        }
        (YCbCr, Rgb) => {
            for (s, d) in src_pixels.zip(dst_pixels) {
                let y = s[0].to_f32() / T::MAX;
                let cb = s[1].to_f32() / T::MAX - 0.5;
                let cr = s[2].to_f32() / T::MAX - 0.5;
                let r = y + 1.402 * cr;
                let b = y + 1.772 * cb;
                let g = (y - LUMA_WEIGHTS[0] * r - LUMA_WEIGHTS[2] * b) / LUMA_WEIGHTS[1];
                d[0] = T::from_f32(r * T::MAX);
                d[1] = T::from_f32(g * T::MAX);
                d[2] = T::from_f32(b * T::MAX);
            }
        }
        _ => return Err(EngineError::UnsupportedConversion { from, to }),
    }
    Ok(dst)
}

fn weighted_luma<T: Sample>(pixel: &[T]) -> T {
    T::from_f32(
        LUMA_WEIGHTS[0] * pixel[0].to_f32()
            + LUMA_WEIGHTS[1] * pixel[1].to_f32()
            + LUMA_WEIGHTS[2] * pixel[2].to_f32(),
    )
}
