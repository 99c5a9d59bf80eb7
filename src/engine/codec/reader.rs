use std::collections::BTreeMap;

use crate::engine::buffer::PixelBuffer;
use crate::engine::common::error::Result;

/// Decoded pixel data plus whatever key/value metadata the container
/// carried.
pub struct DecodedImage {
    pub buffer: PixelBuffer,
    pub metadata: BTreeMap<String, String>,
}

impl DecodedImage {
    pub fn bare(buffer: PixelBuffer) -> Self {
        Self {
            buffer,
            metadata: BTreeMap::new(),
        }
    }
}

pub trait ImageReader {
    fn read_image(&self, data: &[u8]) -> Result<DecodedImage>;
}
