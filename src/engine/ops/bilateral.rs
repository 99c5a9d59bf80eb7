//! Edge-preserving bilateral smoothing.

use tracing::debug;

use crate::engine::buffer::samples::{try_vec, Sample};
use crate::engine::buffer::{PixelBuffer, SampleBuffer};
use crate::engine::common::error::{EngineError, Result};
use crate::engine::ops::ImageOp;

/// Smooths while preserving edges by weighting each neighbor with the
/// product of a spatial gaussian (`sigma_space`, pixels) and an intensity
/// gaussian (`sigma_color`, native sample units).
///
/// `diameter` is the full window width and must be odd and >= 1.
pub struct BilateralFilter {
    diameter: i32,
    sigma_space: f32,
    sigma_color: f32,
}

impl BilateralFilter {
    pub fn new(diameter: i32, sigma_space: f32, sigma_color: f32) -> Self {
        Self {
            diameter,
            sigma_space,
            sigma_color,
        }
    }
}

impl ImageOp for BilateralFilter {
    fn name(&self) -> &'static str {
        "bilateral_filter"
    }

    fn apply(&self, buffer: &mut PixelBuffer) -> Result<()> {
        if self.diameter < 1 || self.diameter % 2 == 0 {
            return Err(EngineError::InvalidParameter(format!(
                "bilateral diameter must be odd and >= 1, got {}",
                self.diameter
            )));
        }
        if !(self.sigma_space > 0.0) || !(self.sigma_color > 0.0) {
            return Err(EngineError::InvalidParameter(format!(
                "bilateral sigmas must be positive, got space={} color={}",
                self.sigma_space, self.sigma_color
            )));
        }

        let radius = (self.diameter / 2) as usize;
        let spatial = spatial_kernel(radius, self.sigma_space);
        let inv_color = 1.0 / (2.0 * self.sigma_color * self.sigma_color);
        let (width, height, channels) = (buffer.width(), buffer.height(), buffer.channels());
        debug!(diameter = self.diameter, "bilateral filter");
        match buffer.samples_mut() {
            SampleBuffer::U8(data) => {
                filter_samples(data, width, height, channels, radius, &spatial, inv_color)
            }
            SampleBuffer::U16(data) => {
                filter_samples(data, width, height, channels, radius, &spatial, inv_color)
            }
            SampleBuffer::F32(data) => {
                filter_samples(data, width, height, channels, radius, &spatial, inv_color)
            }
        }
    }
}

fn spatial_kernel(radius: usize, sigma_space: f32) -> Vec<f32> {
    let side = 2 * radius + 1;
    let denom = 2.0 * sigma_space * sigma_space;
    let mut kernel = Vec::with_capacity(side * side);
    for dy in -(radius as isize)..=(radius as isize) {
        for dx in -(radius as isize)..=(radius as isize) {
            kernel.push((-((dy * dy + dx * dx) as f32) / denom).exp());
        }
    }
    kernel
}

fn filter_samples<T: Sample>(
    data: &mut [T],
    width: usize,
    height: usize,
    channels: usize,
    radius: usize,
    spatial: &[f32],
    inv_color: f32,
) -> Result<()> {
    let mut src = try_vec::<T>(data.len())?;
    src.copy_from_slice(data);

    let side = 2 * radius + 1;
    for y in 0..height {
        for x in 0..width {
            for c in 0..channels {
                let center = src[(y * width + x) * channels + c].to_f32();
                let mut acc = 0.0;
                let mut weight_sum = 0.0;
                for dy in 0..side {
                    let yy =
                        (y as isize + dy as isize - radius as isize).clamp(0, height as isize - 1);
                    for dx in 0..side {
                        let xx =
                            (x as isize + dx as isize - radius as isize).clamp(0, width as isize - 1);
                        let value = src[(yy as usize * width + xx as usize) * channels + c].to_f32();
                        let delta = value - center;
                        let weight =
                            spatial[dy * side + dx] * (-(delta * delta) * inv_color).exp();
                        acc += value * weight;
                        weight_sum += weight;
                    }
                }
                data[(y * width + x) * channels + c] = T::from_f32(acc / weight_sum);
            }
        }
    }
    Ok(())
}
