//! 3x3 gradient-magnitude edge detectors.
//!
//! Convolves a fixed kernel pair with border clamping and writes
//! `sqrt(gx^2 + gy^2)` back into the same buffer, clamped to the sample
//! range. Alpha channels are passed through unchanged.

use crate::engine::buffer::samples::{try_vec, Sample};
use crate::engine::buffer::{PixelBuffer, SampleBuffer};
use crate::engine::common::error::Result;
use crate::engine::ops::ImageOp;

type Kernel3 = [[f32; 3]; 3];

const SOBEL_KERNEL_X: Kernel3 = [[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]];
const SOBEL_KERNEL_Y: Kernel3 = [[-1.0, -2.0, -1.0], [0.0, 0.0, 0.0], [1.0, 2.0, 1.0]];

const SCHARR_KERNEL_X: Kernel3 = [[-3.0, 0.0, 3.0], [-10.0, 0.0, 10.0], [-3.0, 0.0, 3.0]];
const SCHARR_KERNEL_Y: Kernel3 = [[-3.0, -10.0, -3.0], [0.0, 0.0, 0.0], [3.0, 10.0, 3.0]];

pub struct Sobel;

impl ImageOp for Sobel {
    fn name(&self) -> &'static str {
        "sobel"
    }

    fn apply(&self, buffer: &mut PixelBuffer) -> Result<()> {
        gradient_magnitude(buffer, &SOBEL_KERNEL_X, &SOBEL_KERNEL_Y)
    }
}

pub struct Scharr;

impl ImageOp for Scharr {
    fn name(&self) -> &'static str {
        "scharr"
    }

    fn apply(&self, buffer: &mut PixelBuffer) -> Result<()> {
        gradient_magnitude(buffer, &SCHARR_KERNEL_X, &SCHARR_KERNEL_Y)
    }
}

fn gradient_magnitude(buffer: &mut PixelBuffer, kx: &Kernel3, ky: &Kernel3) -> Result<()> {
    let (width, height, channels) = (buffer.width(), buffer.height(), buffer.channels());
    // Gradients are meaningless for alpha; keep it as-is.
    let gradient_channels = if buffer.color_space().has_alpha() {
        channels - 1
    } else {
        channels
    };
    match buffer.samples_mut() {
        SampleBuffer::U8(data) => {
            run_kernels(data, width, height, channels, gradient_channels, kx, ky)
        }
        SampleBuffer::U16(data) => {
            run_kernels(data, width, height, channels, gradient_channels, kx, ky)
        }
        SampleBuffer::F32(data) => {
            run_kernels(data, width, height, channels, gradient_channels, kx, ky)
        }
    }
}

fn run_kernels<T: Sample>(
    data: &mut [T],
    width: usize,
    height: usize,
    channels: usize,
    gradient_channels: usize,
    kx: &Kernel3,
    ky: &Kernel3,
) -> Result<()> {
    let mut src = try_vec::<T>(data.len())?;
    src.copy_from_slice(data);

    for y in 0..height {
        let ys = [y.saturating_sub(1), y, (y + 1).min(height - 1)];
        for x in 0..width {
            let xs = [x.saturating_sub(1), x, (x + 1).min(width - 1)];
            for c in 0..gradient_channels {
                let mut gx = 0.0;
                let mut gy = 0.0;
                for (row, yy) in ys.iter().enumerate() {
                    for (col, xx) in xs.iter().enumerate() {
                        let value = src[(yy * width + xx) * channels + c].to_f32();
                        gx += value * kx[row][col];
                        gy += value * ky[row][col];
                    }
                }
                data[(y * width + x) * channels + c] = T::from_f32((gx * gx + gy * gy).sqrt());
            }
        }
    }
    Ok(())
}
