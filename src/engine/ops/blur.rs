//! Windowed smoothing filters: box, gaussian and median.
//!
//! All three use an effective window of `2 * radius + 1` samples per axis
//! (always odd) and edge-clamped extension at the borders; radius 0 is a
//! no-op.

use std::cmp::Ordering;

use tracing::debug;

use crate::engine::buffer::samples::{try_vec, Sample};
use crate::engine::buffer::{PixelBuffer, SampleBuffer};
use crate::engine::common::error::Result;
use crate::engine::ops::ImageOp;

/// Uniform-weight smoothing, separable moving average.
pub struct BoxBlur {
    radius: usize,
}

impl BoxBlur {
    pub fn new(radius: usize) -> Self {
        Self { radius }
    }
}

impl ImageOp for BoxBlur {
    fn name(&self) -> &'static str {
        "box_blur"
    }

    fn apply(&self, buffer: &mut PixelBuffer) -> Result<()> {
        if self.radius == 0 {
            return Ok(());
        }
        let (width, height, channels) = (buffer.width(), buffer.height(), buffer.channels());
        let radius = self.radius;
        debug!(radius, "box blur");
        match buffer.samples_mut() {
            SampleBuffer::U8(data) => box_blur_samples(data, width, height, channels, radius),
            SampleBuffer::U16(data) => box_blur_samples(data, width, height, channels, radius),
            SampleBuffer::F32(data) => box_blur_samples(data, width, height, channels, radius),
        }
    }
}

fn box_blur_samples<T: Sample>(
    data: &mut [T],
    width: usize,
    height: usize,
    channels: usize,
    radius: usize,
) -> Result<()> {
    let mut scratch = try_vec::<T>(data.len())?;
    for y in 0..height {
        for c in 0..channels {
            box_line(data, &mut scratch, y * width * channels + c, width, channels, radius);
        }
    }
    for x in 0..width {
        for c in 0..channels {
            box_line(
                &scratch,
                data,
                x * channels + c,
                height,
                width * channels,
                radius,
            );
        }
    }
    Ok(())
}

/// Moving average along one line of samples spaced `stride` apart, reading
/// past the ends as the nearest edge sample.
fn box_line<T: Sample>(
    src: &[T],
    dst: &mut [T],
    base: usize,
    len: usize,
    stride: usize,
    radius: usize,
) {
    let norm = 1.0 / (2 * radius + 1) as f32;
    let sample = |i: isize| -> f32 {
        let clamped = i.clamp(0, len as isize - 1) as usize;
        src[base + clamped * stride].to_f32()
    };
    let mut sum = 0.0;
    for k in -(radius as isize)..=(radius as isize) {
        sum += sample(k);
    }
    for i in 0..len {
        dst[base + i * stride] = T::from_f32(sum * norm);
        sum += sample(i as isize + radius as isize + 1) - sample(i as isize - (radius as isize));
    }
}

/// Gaussian smoothing, separable convolution with a normalized kernel of
/// `2 * radius + 1` taps (sigma = radius / 2).
pub struct GaussianBlur {
    radius: usize,
}

impl GaussianBlur {
    pub fn new(radius: usize) -> Self {
        Self { radius }
    }
}

impl ImageOp for GaussianBlur {
    fn name(&self) -> &'static str {
        "gaussian_blur"
    }

    fn apply(&self, buffer: &mut PixelBuffer) -> Result<()> {
        if self.radius == 0 {
            return Ok(());
        }
        let (width, height, channels) = (buffer.width(), buffer.height(), buffer.channels());
        let taps = gaussian_kernel(self.radius);
        debug!(radius = self.radius, "gaussian blur");
        match buffer.samples_mut() {
            SampleBuffer::U8(data) => gaussian_samples(data, width, height, channels, &taps),
            SampleBuffer::U16(data) => gaussian_samples(data, width, height, channels, &taps),
            SampleBuffer::F32(data) => gaussian_samples(data, width, height, channels, &taps),
        }
    }
}

fn gaussian_kernel(radius: usize) -> Vec<f32> {
    let sigma = radius as f32 / 2.0;
    let denom = 2.0 * sigma * sigma;
    let mut taps: Vec<f32> = (-(radius as isize)..=radius as isize)
        .map(|i| (-((i * i) as f32) / denom).exp())
        .collect();
    let total: f32 = taps.iter().sum();
    for tap in &mut taps {
        *tap /= total;
    }
    taps
}

fn gaussian_samples<T: Sample>(
    data: &mut [T],
    width: usize,
    height: usize,
    channels: usize,
    taps: &[f32],
) -> Result<()> {
    let mut scratch = try_vec::<T>(data.len())?;
    for y in 0..height {
        for c in 0..channels {
            convolve_line(data, &mut scratch, y * width * channels + c, width, channels, taps);
        }
    }
    for x in 0..width {
        for c in 0..channels {
            convolve_line(
                &scratch,
                data,
                x * channels + c,
                height,
                width * channels,
                taps,
            );
        }
    }
    Ok(())
}

fn convolve_line<T: Sample>(
    src: &[T],
    dst: &mut [T],
    base: usize,
    len: usize,
    stride: usize,
    taps: &[f32],
) {
    let radius = (taps.len() / 2) as isize;
    for i in 0..len {
        let mut acc = 0.0;
        for (k, tap) in taps.iter().enumerate() {
            let j = (i as isize + k as isize - radius).clamp(0, len as isize - 1) as usize;
            acc += src[base + j * stride].to_f32() * tap;
        }
        dst[base + i * stride] = T::from_f32(acc);
    }
}

/// Order-statistic filter: each sample becomes the median of its
/// `(2 * radius + 1)^2` neighborhood, per channel.
pub struct MedianBlur {
    radius: usize,
}

impl MedianBlur {
    pub fn new(radius: usize) -> Self {
        Self { radius }
    }
}

impl ImageOp for MedianBlur {
    fn name(&self) -> &'static str {
        "median_blur"
    }

    fn apply(&self, buffer: &mut PixelBuffer) -> Result<()> {
        if self.radius == 0 {
            return Ok(());
        }
        let (width, height, channels) = (buffer.width(), buffer.height(), buffer.channels());
        let radius = self.radius;
        debug!(radius, "median blur");
        match buffer.samples_mut() {
            SampleBuffer::U8(data) => median_samples(data, width, height, channels, radius),
            SampleBuffer::U16(data) => median_samples(data, width, height, channels, radius),
            SampleBuffer::F32(data) => median_samples(data, width, height, channels, radius),
        }
    }
}

fn median_samples<T: Sample>(
    data: &mut [T],
    width: usize,
    height: usize,
    channels: usize,
    radius: usize,
) -> Result<()> {
    let mut src = try_vec::<T>(data.len())?;
    src.copy_from_slice(data);

    let span = -(radius as isize)..=(radius as isize);
    let mut window = Vec::with_capacity((2 * radius + 1) * (2 * radius + 1));
    for y in 0..height {
        for x in 0..width {
            for c in 0..channels {
                window.clear();
                for dy in span.clone() {
                    let yy = (y as isize + dy).clamp(0, height as isize - 1) as usize;
                    for dx in span.clone() {
                        let xx = (x as isize + dx).clamp(0, width as isize - 1) as usize;
                        window.push(src[(yy * width + xx) * channels + c]);
                    }
                }
                window.sort_unstable_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
                data[(y * width + x) * channels + c] = window[window.len() / 2];
            }
        }
    }
    Ok(())
}
