//! Geometric reorderings: crop, mirror and axis swap.

use tracing::debug;

use crate::engine::buffer::samples::try_vec;
use crate::engine::buffer::{PixelBuffer, SampleBuffer};
use crate::engine::common::error::{EngineError, Result};
use crate::engine::ops::ImageOp;

/// Extract a sub-region, replacing the buffer with a fresh one at the new
/// dimensions.
pub struct Crop {
    width: usize,
    height: usize,
    x: usize,
    y: usize,
}

impl Crop {
    pub fn new(new_width: usize, new_height: usize, x: usize, y: usize) -> Self {
        Self {
            width: new_width,
            height: new_height,
            x,
            y,
        }
    }
}

impl ImageOp for Crop {
    fn name(&self) -> &'static str {
        "crop"
    }

    fn apply(&self, buffer: &mut PixelBuffer) -> Result<()> {
        buffer.check_region(self.x, self.y, self.width, self.height)?;

        let channels = buffer.channels();
        let src_width = buffer.width();
        let samples = match buffer.samples() {
            SampleBuffer::U8(data) => SampleBuffer::U8(self.copy_region(data, src_width, channels)?),
            SampleBuffer::U16(data) => {
                SampleBuffer::U16(self.copy_region(data, src_width, channels)?)
            }
            SampleBuffer::F32(data) => {
                SampleBuffer::F32(self.copy_region(data, src_width, channels)?)
            }
        };

        debug!(
            from_width = buffer.width(),
            from_height = buffer.height(),
            to_width = self.width,
            to_height = self.height,
            "cropped image"
        );
        buffer.samples = samples;
        buffer.width = self.width;
        buffer.height = self.height;
        Ok(())
    }
}

impl Crop {
    fn copy_region<T: Copy + Default>(
        &self,
        src: &[T],
        src_width: usize,
        channels: usize,
    ) -> Result<Vec<T>> {
        let row_len = self.width * channels;
        let mut dst = try_vec(self.height * row_len)?;
        for row in 0..self.height {
            let src_start = ((self.y + row) * src_width + self.x) * channels;
            let dst_start = row * row_len;
            dst[dst_start..dst_start + row_len]
                .copy_from_slice(&src[src_start..src_start + row_len]);
        }
        Ok(dst)
    }
}

/// Mirror about the horizontal axis (first row becomes last).
pub struct Flip;

impl ImageOp for Flip {
    fn name(&self) -> &'static str {
        "flip"
    }

    fn apply(&self, buffer: &mut PixelBuffer) -> Result<()> {
        let row_len = buffer.width() * buffer.channels();
        let height = buffer.height();
        match buffer.samples_mut() {
            SampleBuffer::U8(data) => reverse_rows(data, row_len, height),
            SampleBuffer::U16(data) => reverse_rows(data, row_len, height),
            SampleBuffer::F32(data) => reverse_rows(data, row_len, height),
        }
        Ok(())
    }
}

fn reverse_rows<T>(data: &mut [T], row_len: usize, height: usize) {
    let mut top = 0;
    let mut bottom = height - 1;
    while top < bottom {
        let (upper, lower) = data.split_at_mut(bottom * row_len);
        upper[top * row_len..(top + 1) * row_len].swap_with_slice(&mut lower[..row_len]);
        top += 1;
        bottom -= 1;
    }
}

/// Mirror about the vertical axis (first pixel of each row becomes last).
pub struct Flop;

impl ImageOp for Flop {
    fn name(&self) -> &'static str {
        "flop"
    }

    fn apply(&self, buffer: &mut PixelBuffer) -> Result<()> {
        let width = buffer.width();
        let channels = buffer.channels();
        match buffer.samples_mut() {
            SampleBuffer::U8(data) => reverse_pixels(data, width, channels),
            SampleBuffer::U16(data) => reverse_pixels(data, width, channels),
            SampleBuffer::F32(data) => reverse_pixels(data, width, channels),
        }
        Ok(())
    }
}

fn reverse_pixels<T>(data: &mut [T], width: usize, channels: usize) {
    for row in data.chunks_mut(width * channels) {
        let mut left = 0;
        let mut right = width - 1;
        while left < right {
            for c in 0..channels {
                row.swap(left * channels + c, right * channels + c);
            }
            left += 1;
            right -= 1;
        }
    }
}

/// Swap row and column axes; width and height trade places.
pub struct Transpose;

impl ImageOp for Transpose {
    fn name(&self) -> &'static str {
        "transpose"
    }

    fn apply(&self, buffer: &mut PixelBuffer) -> Result<()> {
        let width = buffer.width();
        let height = buffer.height();
        let channels = buffer.channels();
        let samples = match buffer.samples() {
            SampleBuffer::U8(data) => {
                SampleBuffer::U8(transpose_samples(data, width, height, channels)?)
            }
            SampleBuffer::U16(data) => {
                SampleBuffer::U16(transpose_samples(data, width, height, channels)?)
            }
            SampleBuffer::F32(data) => {
                SampleBuffer::F32(transpose_samples(data, width, height, channels)?)
            }
        };
        buffer.samples = samples;
        buffer.width = height;
        buffer.height = width;
        Ok(())
    }
}

fn transpose_samples<T: Copy + Default>(
    src: &[T],
    width: usize,
    height: usize,
    channels: usize,
) -> Result<Vec<T>> {
    let mut dst = try_vec(src.len())?;
    for y in 0..height {
        for x in 0..width {
            let from = (y * width + x) * channels;
            let to = (x * height + y) * channels;
            dst[to..to + channels].copy_from_slice(&src[from..from + channels]);
        }
    }
    Ok(dst)
}

/// Quarter-turn rotation. Reserved at the boundary but not yet wired up;
/// callers get an explicit error instead of a silent no-op.
pub struct Rotate90;

impl ImageOp for Rotate90 {
    fn name(&self) -> &'static str {
        "rotate90"
    }

    fn apply(&self, _buffer: &mut PixelBuffer) -> Result<()> {
        Err(EngineError::NotImplemented("rotate90"))
    }
}
