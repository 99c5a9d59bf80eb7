use thiserror::Error;

use crate::engine::buffer::types::ColorSpace;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("no image loaded")]
    NotLoaded,

    #[error("image was already released")]
    UseAfterRelease,

    #[error("region {width}x{height}+{x}+{y} exceeds image bounds {image_width}x{image_height}")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
        image_width: usize,
        image_height: usize,
    },

    #[error("failed to allocate {0} bytes of sample storage")]
    OutOfMemory(usize),

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("invalid range: lower bound {lower} must be below upper bound {upper}")]
    InvalidRange { lower: f32, upper: f32 },

    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("corrupt image data: {0}")]
    CorruptData(String),

    #[error("operation is not defined for color space {0:?}")]
    UnsupportedColorSpace(ColorSpace),

    #[error("no conversion defined from {from:?} to {to:?}")]
    UnsupportedConversion { from: ColorSpace, to: ColorSpace },

    #[error("output region too small: need {needed} bytes, got {available}")]
    BufferTooSmall { needed: usize, available: usize },

    #[error("failed to encode image: {0}")]
    EncodeError(String),

    #[error("operation {0} is not implemented")]
    NotImplemented(&'static str),

    #[error("i/o error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
