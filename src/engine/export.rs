//! Hand finalized pixel bytes to caller-owned memory without an
//! intermediate copy.

use crate::engine::common::error::{EngineError, Result};
use crate::engine::image::Image;

impl Image {
    /// Exact byte count [`Image::write_to`] will produce for the current
    /// depth and color space, with no container overhead.
    pub fn required_output_size(&self) -> Result<usize> {
        Ok(self.buffer()?.byte_len())
    }

    /// Write the raw interleaved samples into `region`, multi-byte samples
    /// little-endian.
    ///
    /// All-or-nothing: if the region is shorter than
    /// [`Image::required_output_size`] nothing is written and
    /// `BufferTooSmall` is returned.
    pub fn write_to(&self, region: &mut [u8]) -> Result<()> {
        let buffer = self.buffer()?;
        let needed = buffer.byte_len();
        if region.len() < needed {
            return Err(EngineError::BufferTooSmall {
                needed,
                available: region.len(),
            });
        }
        buffer.samples().write_le(&mut region[..needed]);
        Ok(())
    }
}
