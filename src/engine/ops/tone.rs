//! Per-sample tone curves: brightness, contrast, exposure, gamma and
//! contrast stretching.

use crate::engine::buffer::PixelBuffer;
use crate::engine::common::error::{EngineError, Result};
use crate::engine::ops::ImageOp;

/// Add a constant (in native sample units) to every sample, clamped to the
/// depth's valid range.
pub struct Brighten {
    by: f32,
}

impl Brighten {
    pub fn new(by: f32) -> Self {
        Self { by }
    }
}

impl ImageOp for Brighten {
    fn name(&self) -> &'static str {
        "brighten"
    }

    fn apply(&self, buffer: &mut PixelBuffer) -> Result<()> {
        let by = self.by;
        buffer.samples_mut().map_in_place(|v| v + by);
        Ok(())
    }
}

/// Linear remap about the depth midpoint. The midpoint is a fixed point of
/// the curve; positive values push samples away from it.
///
/// The strength parameter follows the 8-bit convention, useful range
/// roughly -255..255.
pub struct Contrast {
    value: f32,
}

impl Contrast {
    pub fn new(value: f32) -> Self {
        Self { value }
    }
}

impl ImageOp for Contrast {
    fn name(&self) -> &'static str {
        "contrast"
    }

    fn apply(&self, buffer: &mut PixelBuffer) -> Result<()> {
        let factor = (259.0 * (self.value + 255.0)) / (255.0 * (259.0 - self.value));
        let mid = buffer.depth().mid_value();
        buffer.samples_mut().map_in_place(|v| (v - mid) * factor + mid);
        Ok(())
    }
}

/// Exposure compensation in stops: `out = (in - black_point) * 2^exposure`.
pub struct Exposure {
    exposure: f32,
    black_point: f32,
}

impl Exposure {
    pub fn new(exposure: f32, black_point: f32) -> Self {
        Self {
            exposure,
            black_point,
        }
    }
}

impl ImageOp for Exposure {
    fn name(&self) -> &'static str {
        "exposure"
    }

    fn apply(&self, buffer: &mut PixelBuffer) -> Result<()> {
        let scale = 2f32.powf(self.exposure);
        let black = self.black_point;
        buffer.samples_mut().map_in_place(|v| (v - black) * scale);
        Ok(())
    }
}

/// Power-law tone curve `out = max * (in / max)^(1 / gamma)`.
pub struct Gamma {
    gamma: f32,
}

impl Gamma {
    pub fn new(gamma: f32) -> Self {
        Self { gamma }
    }
}

impl ImageOp for Gamma {
    fn name(&self) -> &'static str {
        "gamma"
    }

    fn apply(&self, buffer: &mut PixelBuffer) -> Result<()> {
        if !(self.gamma > 0.0) {
            return Err(EngineError::InvalidParameter(format!(
                "gamma must be positive, got {}",
                self.gamma
            )));
        }
        let max = buffer.depth().max_value();
        let inverse = 1.0 / self.gamma;
        buffer
            .samples_mut()
            .map_in_place(|v| (v / max).powf(inverse) * max);
        Ok(())
    }
}

/// Map the intensity band `[lower, higher]` onto the full sample range.
pub struct StretchContrast {
    lower: f32,
    higher: f32,
}

impl StretchContrast {
    pub fn new(lower: f32, higher: f32) -> Self {
        Self { lower, higher }
    }
}

impl ImageOp for StretchContrast {
    fn name(&self) -> &'static str {
        "stretch_contrast"
    }

    fn apply(&self, buffer: &mut PixelBuffer) -> Result<()> {
        if !(self.lower < self.higher) {
            return Err(EngineError::InvalidRange {
                lower: self.lower,
                upper: self.higher,
            });
        }
        let scale = buffer.depth().max_value() / (self.higher - self.lower);
        let lower = self.lower;
        buffer.samples_mut().map_in_place(|v| (v - lower) * scale);
        Ok(())
    }
}
