use std::io::Write;

use crate::engine::buffer::PixelBuffer;
use crate::engine::common::error::Result;

pub trait ImageWriter {
    fn write_image(&self, buffer: &PixelBuffer, output: &mut dyn Write) -> Result<()>;
}
