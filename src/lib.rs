//! rasterkit: an in-process image engine.
//!
//! Decode PPM/Farbfeld/TIFF into an owned pixel buffer, chain in-place
//! transforms over it, inspect it, and serialize it back out to a
//! container format or straight into caller-owned memory.

pub mod engine;
pub mod logger;

pub use engine::{
    BitDepth, ColorSpace, EngineError, Image, ImageFormat, PixelBuffer, Result, SampleBuffer,
};
