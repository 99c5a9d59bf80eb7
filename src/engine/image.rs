//! The central image handle: decode, chained in-place operations,
//! analysis and encode.

use std::collections::BTreeMap;
use std::path::Path;

use tracing::{debug, info, instrument};

use crate::engine::analysis::channel_histogram;
use crate::engine::buffer::{BitDepth, ColorSpace, PixelBuffer};
use crate::engine::codec::{self, ImageFormat};
use crate::engine::common::error::{EngineError, Result};
use crate::engine::convert::{ConvertColorSpace, ConvertDepth};
use crate::engine::ops::{
    BilateralFilter, BoxBlur, Brighten, Contrast, Crop, Exposure, Flip, Flop, Gamma, GaussianBlur,
    HslAdjust, ImageOp, MedianBlur, Rotate90, Scharr, Sobel, StretchContrast, Transpose,
};

/// Lifecycle of an image handle. `Released` is terminal: the storage is
/// gone and every later call is a caller error.
#[derive(Debug, Clone)]
enum State {
    Empty,
    Loaded(PixelBuffer),
    Released,
}

/// An owned image: pixel buffer, metadata and lifecycle state.
///
/// Created empty or via decode; every transform mutates it in place and a
/// failed operation leaves it untouched. `Clone` is a deep copy sharing no
/// storage. Dropping releases storage; [`Image::release`] does so early
/// and deterministically for callers that manage handles explicitly.
///
/// A single `Image` is not synchronized; callers serialize access to one
/// handle. Distinct images share nothing and can be used from different
/// threads freely.
#[derive(Debug, Clone)]
pub struct Image {
    state: State,
    metadata: BTreeMap<String, String>,
}

impl Default for Image {
    fn default() -> Self {
        Self::new()
    }
}

impl Image {
    /// An empty handle; every operation fails with `NotLoaded` until an
    /// image is loaded into it.
    pub fn new() -> Self {
        Self {
            state: State::Empty,
            metadata: BTreeMap::new(),
        }
    }

    /// Wrap an already-built pixel buffer.
    pub fn from_buffer(buffer: PixelBuffer) -> Self {
        Self {
            state: State::Loaded(buffer),
            metadata: BTreeMap::new(),
        }
    }

    /// Decode an image file, detecting the format from its content with
    /// the file extension as fallback.
    #[instrument(skip(path))]
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path)?;
        let format = ImageFormat::detect(&data)
            .or_else(|| ImageFormat::from_path(path))
            .ok_or_else(|| EngineError::UnsupportedFormat(path.display().to_string()))?;
        let mut image = Self::new();
        image.load_decoded(codec::decode_as(&data, format)?);
        info!(
            path = %path.display(),
            width = image.width(),
            height = image.height(),
            "image loaded"
        );
        Ok(image)
    }

    /// Decode an in-memory byte sequence.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let mut image = Self::new();
        image.load_decoded(codec::decode(data)?);
        Ok(image)
    }

    /// Decode a file into this handle, replacing any previous content.
    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        if matches!(self.state, State::Released) {
            return Err(EngineError::UseAfterRelease);
        }
        *self = Self::open(path)?;
        Ok(())
    }

    fn load_decoded(&mut self, decoded: codec::DecodedImage) {
        self.state = State::Loaded(decoded.buffer);
        self.metadata = decoded.metadata;
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.state, State::Loaded(_))
    }

    /// Width in pixels; 0 before any successful load.
    pub fn width(&self) -> usize {
        self.buffer().map(PixelBuffer::width).unwrap_or(0)
    }

    /// Height in pixels; 0 before any successful load.
    pub fn height(&self) -> usize {
        self.buffer().map(PixelBuffer::height).unwrap_or(0)
    }

    pub fn depth(&self) -> Option<BitDepth> {
        self.buffer().map(PixelBuffer::depth).ok()
    }

    pub fn color_space(&self) -> Option<ColorSpace> {
        self.buffer().map(PixelBuffer::color_space).ok()
    }

    pub fn buffer(&self) -> Result<&PixelBuffer> {
        match &self.state {
            State::Loaded(buffer) => Ok(buffer),
            State::Empty => Err(EngineError::NotLoaded),
            State::Released => Err(EngineError::UseAfterRelease),
        }
    }

    fn buffer_mut(&mut self) -> Result<&mut PixelBuffer> {
        match &mut self.state {
            State::Loaded(buffer) => Ok(buffer),
            State::Empty => Err(EngineError::NotLoaded),
            State::Released => Err(EngineError::UseAfterRelease),
        }
    }

    /// Run one in-place operation against the loaded buffer.
    pub fn apply(&mut self, op: &dyn ImageOp) -> Result<()> {
        let buffer = self.buffer_mut()?;
        debug!(op = op.name(), "applying operation");
        op.apply(buffer)
    }

    pub fn crop(&mut self, new_width: usize, new_height: usize, x: usize, y: usize) -> Result<()> {
        self.apply(&Crop::new(new_width, new_height, x, y))
    }

    pub fn flip(&mut self) -> Result<()> {
        self.apply(&Flip)
    }

    pub fn flop(&mut self) -> Result<()> {
        self.apply(&Flop)
    }

    pub fn transpose(&mut self) -> Result<()> {
        self.apply(&Transpose)
    }

    pub fn rotate90(&mut self) -> Result<()> {
        self.apply(&Rotate90)
    }

    pub fn brighten(&mut self, by: f32) -> Result<()> {
        self.apply(&Brighten::new(by))
    }

    pub fn contrast(&mut self, value: f32) -> Result<()> {
        self.apply(&Contrast::new(value))
    }

    pub fn exposure(&mut self, exposure: f32, black_point: f32) -> Result<()> {
        self.apply(&Exposure::new(exposure, black_point))
    }

    pub fn gamma(&mut self, gamma: f32) -> Result<()> {
        self.apply(&Gamma::new(gamma))
    }

    pub fn stretch_contrast(&mut self, lower: f32, higher: f32) -> Result<()> {
        self.apply(&StretchContrast::new(lower, higher))
    }

    pub fn hsl_adjust(&mut self, hue: f32, saturation: f32, lightness: f32) -> Result<()> {
        self.apply(&HslAdjust::new(hue, saturation, lightness))
    }

    pub fn box_blur(&mut self, radius: usize) -> Result<()> {
        self.apply(&BoxBlur::new(radius))
    }

    pub fn gaussian_blur(&mut self, radius: usize) -> Result<()> {
        self.apply(&GaussianBlur::new(radius))
    }

    pub fn median_blur(&mut self, radius: usize) -> Result<()> {
        self.apply(&MedianBlur::new(radius))
    }

    pub fn bilateral_filter(
        &mut self,
        diameter: i32,
        sigma_space: f32,
        sigma_color: f32,
    ) -> Result<()> {
        self.apply(&BilateralFilter::new(diameter, sigma_space, sigma_color))
    }

    pub fn sobel(&mut self) -> Result<()> {
        self.apply(&Sobel)
    }

    pub fn scharr(&mut self) -> Result<()> {
        self.apply(&Scharr)
    }

    pub fn convert_color_space(&mut self, target: ColorSpace) -> Result<()> {
        self.apply(&ConvertColorSpace::new(target))
    }

    pub fn convert_depth(&mut self, target: BitDepth) -> Result<()> {
        self.apply(&ConvertDepth::new(target))
    }

    /// Per-channel bucket counts; see [`channel_histogram`].
    pub fn histogram(&self) -> Result<BTreeMap<String, Vec<u64>>> {
        Ok(channel_histogram(self.buffer()?))
    }

    /// Key/value metadata captured at decode time; empty if the source
    /// carried none.
    pub fn metadata(&self) -> Result<BTreeMap<String, String>> {
        self.buffer()?;
        Ok(self.metadata.clone())
    }

    /// Serialize into the requested container format.
    pub fn encode(&self, format: ImageFormat) -> Result<Vec<u8>> {
        codec::encode(self.buffer()?, format)
    }

    /// Encode to a file, picking the format from the extension.
    #[instrument(skip(self, path))]
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let format = ImageFormat::from_path(path)
            .ok_or_else(|| EngineError::UnsupportedFormat(path.display().to_string()))?;
        self.save_with_format(path, format)
    }

    /// Encode to a file in an explicit format.
    pub fn save_with_format<P: AsRef<Path>>(&self, path: P, format: ImageFormat) -> Result<()> {
        let bytes = self.encode(format)?;
        std::fs::write(path.as_ref(), bytes)?;
        info!(path = %path.as_ref().display(), ?format, "image saved");
        Ok(())
    }

    /// Free the sample storage now instead of at drop. The handle becomes
    /// unusable; a second `release` (or any other call) is a caller error.
    pub fn release(&mut self) -> Result<()> {
        if matches!(self.state, State::Released) {
            return Err(EngineError::UseAfterRelease);
        }
        self.state = State::Released;
        self.metadata = BTreeMap::new();
        Ok(())
    }
}
