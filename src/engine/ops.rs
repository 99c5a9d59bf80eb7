//! In-place image transforms.
//!
//! Every transform is a small struct implementing [`ImageOp`]; parameter
//! validation happens before any sample is touched, so a failed `apply`
//! leaves the buffer exactly as it was.

pub mod bilateral;
pub mod blur;
pub mod edge;
pub mod hsl;
pub mod orientation;
pub mod tone;

#[cfg(test)]
mod tests;

pub use bilateral::BilateralFilter;
pub use blur::{BoxBlur, GaussianBlur, MedianBlur};
pub use edge::{Scharr, Sobel};
pub use hsl::HslAdjust;
pub use orientation::{Crop, Flip, Flop, Rotate90, Transpose};
pub use tone::{Brighten, Contrast, Exposure, Gamma, StretchContrast};

use crate::engine::buffer::PixelBuffer;
use crate::engine::common::error::Result;

/// A single in-place transform over a pixel buffer.
pub trait ImageOp {
    /// Short name used in logs and error reports.
    fn name(&self) -> &'static str;

    /// Validate parameters against the buffer, then mutate it.
    fn apply(&self, buffer: &mut PixelBuffer) -> Result<()>;
}
