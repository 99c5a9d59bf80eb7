//! Owned row-major, channel-interleaved pixel storage.

use tracing::trace;

use crate::engine::buffer::samples::SampleBuffer;
use crate::engine::buffer::types::{BitDepth, ColorSpace};
use crate::engine::common::error::{EngineError, Result};

/// Raw sample storage together with its dimensions, depth and color space.
///
/// Invariant: `samples.len() == width * height * color.channels()` after
/// every successful operation. Operations that change layout build a
/// replacement buffer and swap it in; a failed operation leaves the previous
/// buffer untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    pub(crate) width: usize,
    pub(crate) height: usize,
    pub(crate) color: ColorSpace,
    pub(crate) samples: SampleBuffer,
}

impl PixelBuffer {
    /// Wrap existing samples, validating the layout invariant.
    pub fn from_samples(
        width: usize,
        height: usize,
        color: ColorSpace,
        samples: SampleBuffer,
    ) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(EngineError::InvalidParameter(format!(
                "zero-sized image: {width}x{height}"
            )));
        }
        let expected = width * height * color.channels();
        if samples.len() != expected {
            return Err(EngineError::InvalidParameter(format!(
                "sample count {} does not match {width}x{height} {color:?} (expected {expected})",
                samples.len()
            )));
        }
        Ok(Self {
            width,
            height,
            color,
            samples,
        })
    }

    /// Zero-filled buffer of the given geometry.
    pub fn allocate(
        width: usize,
        height: usize,
        depth: BitDepth,
        color: ColorSpace,
    ) -> Result<Self> {
        let len = width * height * color.channels();
        trace!(width, height, ?depth, ?color, "allocating pixel buffer");
        Self::from_samples(width, height, color, SampleBuffer::filled(depth, len)?)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn depth(&self) -> BitDepth {
        self.samples.depth()
    }

    pub fn color_space(&self) -> ColorSpace {
        self.color
    }

    /// Interleaved channels per pixel.
    pub fn channels(&self) -> usize {
        self.color.channels()
    }

    pub fn samples(&self) -> &SampleBuffer {
        &self.samples
    }

    pub(crate) fn samples_mut(&mut self) -> &mut SampleBuffer {
        &mut self.samples
    }

    /// Serialized size of the samples in bytes, without container overhead.
    pub fn byte_len(&self) -> usize {
        self.samples.byte_len()
    }

    /// Validate that `width x height + x + y` lies inside this buffer.
    pub fn check_region(&self, x: usize, y: usize, width: usize, height: usize) -> Result<()> {
        let fits = width > 0
            && height > 0
            && x.checked_add(width).is_some_and(|right| right <= self.width)
            && y.checked_add(height).is_some_and(|bottom| bottom <= self.height);
        if fits {
            Ok(())
        } else {
            Err(EngineError::OutOfBounds {
                x,
                y,
                width,
                height,
                image_width: self.width,
                image_height: self.height,
            })
        }
    }
}
