//! Bit depth and color space tags for pixel storage.

/// Storage width of a single sample.
///
/// The numeric codes are stable and shared with binding layers; they must not
/// be reordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BitDepth {
    /// One byte per sample, range 0..=255.
    Eight,
    /// Two bytes per sample, range 0..=65535.
    Sixteen,
    /// Four bytes per sample, normalized range 0.0..=1.0.
    Float32,
}

impl BitDepth {
    /// Size in bytes of one sample at this depth.
    pub const fn bytes_per_sample(self) -> usize {
        match self {
            BitDepth::Eight => 1,
            BitDepth::Sixteen => 2,
            BitDepth::Float32 => 4,
        }
    }

    /// Largest representable sample value as f32 (1.0 for float storage).
    pub const fn max_value(self) -> f32 {
        match self {
            BitDepth::Eight => 255.0,
            BitDepth::Sixteen => 65535.0,
            BitDepth::Float32 => 1.0,
        }
    }

    /// Midpoint of the value range, the fixed point of contrast remaps.
    pub const fn mid_value(self) -> f32 {
        match self {
            BitDepth::Eight => 128.0,
            BitDepth::Sixteen => 32768.0,
            BitDepth::Float32 => 0.5,
        }
    }

    /// Stable integer code exchanged with binding layers.
    pub const fn code(self) -> u32 {
        match self {
            BitDepth::Eight => 1,
            BitDepth::Sixteen => 2,
            BitDepth::Float32 => 3,
        }
    }

    pub const fn from_code(code: u32) -> Option<Self> {
        match code {
            1 => Some(BitDepth::Eight),
            2 => Some(BitDepth::Sixteen),
            3 => Some(BitDepth::Float32),
            _ => None,
        }
    }
}

/// Channel layout and semantics of a pixel.
///
/// Samples are interleaved in the order given by [`ColorSpace::channel_names`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorSpace {
    /// Single luminance channel.
    Luma,
    /// Luminance plus alpha.
    LumaA,
    Rgb,
    Rgba,
    /// Full-range BT.601 luma/chroma.
    YCbCr,
}

impl ColorSpace {
    /// Number of interleaved channels per pixel.
    pub const fn channels(self) -> usize {
        match self {
            ColorSpace::Luma => 1,
            ColorSpace::LumaA => 2,
            ColorSpace::Rgb | ColorSpace::YCbCr => 3,
            ColorSpace::Rgba => 4,
        }
    }

    /// Per-channel names, in sample order. Used as histogram keys.
    pub const fn channel_names(self) -> &'static [&'static str] {
        match self {
            ColorSpace::Luma => &["luma"],
            ColorSpace::LumaA => &["luma", "alpha"],
            ColorSpace::Rgb => &["red", "green", "blue"],
            ColorSpace::Rgba => &["red", "green", "blue", "alpha"],
            ColorSpace::YCbCr => &["y", "cb", "cr"],
        }
    }

    pub const fn has_alpha(self) -> bool {
        matches!(self, ColorSpace::LumaA | ColorSpace::Rgba)
    }

    /// Whether the leading channels are red/green/blue.
    pub const fn is_rgb_family(self) -> bool {
        matches!(self, ColorSpace::Rgb | ColorSpace::Rgba)
    }

    /// Stable integer code exchanged with binding layers.
    pub const fn code(self) -> u32 {
        match self {
            ColorSpace::Rgb => 1,
            ColorSpace::Rgba => 2,
            ColorSpace::YCbCr => 3,
            ColorSpace::Luma => 4,
            ColorSpace::LumaA => 5,
        }
    }

    pub const fn from_code(code: u32) -> Option<Self> {
        match code {
            1 => Some(ColorSpace::Rgb),
            2 => Some(ColorSpace::Rgba),
            3 => Some(ColorSpace::YCbCr),
            4 => Some(ColorSpace::Luma),
            5 => Some(ColorSpace::LumaA),
            _ => None,
        }
    }
}
