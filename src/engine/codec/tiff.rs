//! TIFF codec built on the `tiff` crate.
//!
//! Decoding accepts baseline gray/RGB images at 8/16-bit and float32 and
//! captures the common ASCII description tags as image metadata. Encoding
//! covers Luma/Rgb/Rgba layouts; LumaA and float Rgba have no matching
//! encoder color type, so callers convert first.

use std::io::{Cursor, Write};

use tiff::decoder::{Decoder, DecodingResult};
use tiff::encoder::{colortype, TiffEncoder};
use tiff::tags::Tag;
use tiff::ColorType;
use tracing::debug;

use crate::engine::buffer::{ColorSpace, PixelBuffer, SampleBuffer};
use crate::engine::codec::reader::{DecodedImage, ImageReader};
use crate::engine::codec::writer::ImageWriter;
use crate::engine::common::error::{EngineError, Result};

/// ASCII tags worth surfacing as metadata, with the keys callers see.
const METADATA_TAGS: [(Tag, &str); 7] = [
    (Tag::ImageDescription, "description"),
    (Tag::Make, "make"),
    (Tag::Model, "model"),
    (Tag::Software, "software"),
    (Tag::DateTime, "datetime"),
    (Tag::Artist, "artist"),
    (Tag::Copyright, "copyright"),
];

pub struct TiffCodec;

impl ImageReader for TiffCodec {
    fn read_image(&self, data: &[u8]) -> Result<DecodedImage> {
        let mut decoder = Decoder::new(Cursor::new(data))
            .map_err(|e| EngineError::CorruptData(e.to_string()))?;

        let color = match decoder
            .colortype()
            .map_err(|e| EngineError::CorruptData(e.to_string()))?
        {
            ColorType::Gray(_) => ColorSpace::Luma,
            ColorType::GrayA(_) => ColorSpace::LumaA,
            ColorType::RGB(_) => ColorSpace::Rgb,
            ColorType::RGBA(_) => ColorSpace::Rgba,
            other => {
                return Err(EngineError::UnsupportedFormat(format!(
                    "TIFF color type {other:?}"
                )))
            }
        };
        let (width, height) = decoder
            .dimensions()
            .map_err(|e| EngineError::CorruptData(e.to_string()))?;
        debug!(width, height, ?color, "decoding TIFF");

        let samples = match decoder
            .read_image()
            .map_err(|e| EngineError::CorruptData(e.to_string()))?
        {
            DecodingResult::U8(data) => SampleBuffer::U8(data),
            DecodingResult::U16(data) => SampleBuffer::U16(data),
            DecodingResult::F32(data) => SampleBuffer::F32(data),
            _ => {
                return Err(EngineError::UnsupportedFormat(
                    "TIFF sample depth beyond 8/16-bit integer or float32".into(),
                ))
            }
        };

        let mut decoded = DecodedImage::bare(PixelBuffer::from_samples(
            width as usize,
            height as usize,
            color,
            samples,
        )?);
        for (tag, key) in METADATA_TAGS {
            if let Ok(Some(value)) = decoder.find_tag(tag) {
                if let Ok(text) = value.into_string() {
                    decoded.metadata.insert(key.to_string(), text);
                }
            }
        }
        Ok(decoded)
    }
}

impl ImageWriter for TiffCodec {
    fn write_image(&self, buffer: &PixelBuffer, output: &mut dyn Write) -> Result<()> {
        debug!(
            width = buffer.width(),
            height = buffer.height(),
            "encoding TIFF"
        );
        let mut bytes = Vec::new();
        let encoder = TiffEncoder::new(Cursor::new(&mut bytes))
            .map_err(|e| EngineError::EncodeError(e.to_string()))?;

        let width = buffer.width() as u32;
        let height = buffer.height() as u32;
        match (buffer.color_space(), buffer.samples()) {
            (ColorSpace::Luma, SampleBuffer::U8(data)) => {
                write_typed::<colortype::Gray8>(encoder, width, height, data)?
            }
            (ColorSpace::Luma, SampleBuffer::U16(data)) => {
                write_typed::<colortype::Gray16>(encoder, width, height, data)?
            }
            (ColorSpace::Luma, SampleBuffer::F32(data)) => {
                write_typed::<colortype::Gray32Float>(encoder, width, height, data)?
            }
            (ColorSpace::Rgb, SampleBuffer::U8(data)) => {
                write_typed::<colortype::RGB8>(encoder, width, height, data)?
            }
            (ColorSpace::Rgb, SampleBuffer::U16(data)) => {
                write_typed::<colortype::RGB16>(encoder, width, height, data)?
            }
            (ColorSpace::Rgb, SampleBuffer::F32(data)) => {
                write_typed::<colortype::RGB32Float>(encoder, width, height, data)?
            }
            (ColorSpace::Rgba, SampleBuffer::U8(data)) => {
                write_typed::<colortype::RGBA8>(encoder, width, height, data)?
            }
            (ColorSpace::Rgba, SampleBuffer::U16(data)) => {
                write_typed::<colortype::RGBA16>(encoder, width, height, data)?
            }
            (color, samples) => {
                return Err(EngineError::UnsupportedFormat(format!(
                    "TIFF encoder has no layout for {color:?} at {:?}; convert first",
                    samples.depth()
                )))
            }
        }

        output.write_all(&bytes)?;
        Ok(())
    }
}

fn write_typed<C>(
    mut encoder: TiffEncoder<Cursor<&mut Vec<u8>>>,
    width: u32,
    height: u32,
    data: &[C::Inner],
) -> Result<()>
where
    C: colortype::ColorType,
    [C::Inner]: tiff::encoder::TiffValue,
{
    encoder
        .write_image::<C>(width, height, data)
        .map_err(|e| EngineError::EncodeError(e.to_string()))
}
