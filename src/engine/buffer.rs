//! Pixel storage: depth/color-space tags, sample vectors and the owned
//! row-major buffer every operation works against.

pub mod pixels;
pub mod samples;
pub mod types;


pub use pixels::PixelBuffer;
pub use samples::SampleBuffer;
pub use types::{BitDepth, ColorSpace};
