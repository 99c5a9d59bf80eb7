use crate::engine::buffer::{BitDepth, ColorSpace, PixelBuffer, SampleBuffer};
use crate::engine::codec::{self, ImageFormat};
use crate::engine::common::error::EngineError;

fn rgb_gradient(width: usize, height: usize) -> PixelBuffer {
    let mut samples = Vec::new();
    for y in 0..height {
        for x in 0..width {
            samples.push((x * 17 % 256) as u8);
            samples.push((y * 31 % 256) as u8);
            samples.push(((x + y) * 7 % 256) as u8);
        }
    }
    PixelBuffer::from_samples(width, height, ColorSpace::Rgb, SampleBuffer::U8(samples)).unwrap()
}

#[test]
fn detects_formats_by_magic() {
    assert_eq!(ImageFormat::detect(b"P6\n2 2\n255\n"), Some(ImageFormat::Ppm));
    assert_eq!(ImageFormat::detect(b"P5 1 1 255 "), Some(ImageFormat::Ppm));
    assert_eq!(
        ImageFormat::detect(b"farbfeld\x00\x00\x00\x01\x00\x00\x00\x01"),
        Some(ImageFormat::Farbfeld)
    );
    assert_eq!(ImageFormat::detect(b"II\x2a\x00rest"), Some(ImageFormat::Tiff));
    assert_eq!(ImageFormat::detect(b"MM\x00\x2arest"), Some(ImageFormat::Tiff));
    assert_eq!(ImageFormat::detect(b"\x89PNG\r\n"), None);
}

#[test]
fn guesses_format_from_extension() {
    use std::path::Path;
    assert_eq!(
        ImageFormat::from_path(Path::new("shot.PPM")),
        Some(ImageFormat::Ppm)
    );
    assert_eq!(
        ImageFormat::from_path(Path::new("a/b/c.tiff")),
        Some(ImageFormat::Tiff)
    );
    assert_eq!(ImageFormat::from_path(Path::new("noext")), None);
}

#[test]
fn ppm_round_trip_preserves_everything() {
    let original = rgb_gradient(5, 3);
    let bytes = codec::encode(&original, ImageFormat::Ppm).unwrap();
    let decoded = codec::decode(&bytes).unwrap();
    assert_eq!(decoded.buffer, original);
    assert!(decoded.metadata.is_empty());
}

#[test]
fn pgm_round_trip_sixteen_bit() {
    let samples = SampleBuffer::U16(vec![0, 257, 40000, 65535]);
    let original = PixelBuffer::from_samples(2, 2, ColorSpace::Luma, samples).unwrap();
    let bytes = codec::encode(&original, ImageFormat::Ppm).unwrap();
    assert!(bytes.starts_with(b"P5"));
    let decoded = codec::decode(&bytes).unwrap();
    assert_eq!(decoded.buffer, original);
}

#[test]
fn ppm_reader_skips_comments() {
    let bytes = b"P5\n# shot on a potato\n2 1\n255\n\x10\x20";
    let decoded = codec::decode(bytes).unwrap();
    assert_eq!(decoded.buffer.width(), 2);
    assert_eq!(decoded.buffer.height(), 1);
    match decoded.buffer.samples() {
        SampleBuffer::U8(data) => assert_eq!(data, &[0x10, 0x20]),
        _ => unreachable!(),
    }
}

#[test]
fn truncated_ppm_is_corrupt() {
    let result = codec::decode(b"P6\n4 4\n255\nshort");
    assert!(matches!(result, Err(EngineError::CorruptData(_))));
}

#[test]
fn ppm_rejects_unrepresentable_layouts() {
    let rgba = PixelBuffer::allocate(2, 2, BitDepth::Eight, ColorSpace::Rgba).unwrap();
    assert!(matches!(
        codec::encode(&rgba, ImageFormat::Ppm),
        Err(EngineError::UnsupportedFormat(_))
    ));

    let float = PixelBuffer::allocate(2, 2, BitDepth::Float32, ColorSpace::Luma).unwrap();
    assert!(matches!(
        codec::encode(&float, ImageFormat::Ppm),
        Err(EngineError::UnsupportedFormat(_))
    ));
}

#[test]
fn farbfeld_round_trip() {
    let samples = SampleBuffer::U16(vec![1, 2, 3, 65535, 500, 600, 700, 0]);
    let original = PixelBuffer::from_samples(2, 1, ColorSpace::Rgba, samples).unwrap();
    let bytes = codec::encode(&original, ImageFormat::Farbfeld).unwrap();
    let decoded = codec::decode(&bytes).unwrap();
    assert_eq!(decoded.buffer, original);
}

#[test]
fn farbfeld_rejects_non_rgba16() {
    let rgb = rgb_gradient(2, 2);
    assert!(matches!(
        codec::encode(&rgb, ImageFormat::Farbfeld),
        Err(EngineError::UnsupportedFormat(_))
    ));
}

#[test]
fn farbfeld_truncated_raster_is_corrupt() {
    let mut bytes = b"farbfeld".to_vec();
    bytes.extend_from_slice(&2u32.to_be_bytes());
    bytes.extend_from_slice(&2u32.to_be_bytes());
    bytes.extend_from_slice(&[0u8; 8]);
    assert!(matches!(
        codec::decode(&bytes),
        Err(EngineError::CorruptData(_))
    ));
}

#[test]
fn tiff_round_trip_rgb8() {
    let original = rgb_gradient(6, 4);
    let bytes = codec::encode(&original, ImageFormat::Tiff).unwrap();
    assert_eq!(ImageFormat::detect(&bytes), Some(ImageFormat::Tiff));
    let decoded = codec::decode(&bytes).unwrap();
    assert_eq!(decoded.buffer, original);
}

#[test]
fn tiff_round_trip_gray16() {
    let samples = SampleBuffer::U16(vec![0, 1000, 30000, 65535, 42, 7]);
    let original = PixelBuffer::from_samples(3, 2, ColorSpace::Luma, samples).unwrap();
    let bytes = codec::encode(&original, ImageFormat::Tiff).unwrap();
    let decoded = codec::decode(&bytes).unwrap();
    assert_eq!(decoded.buffer, original);
}

#[test]
fn tiff_garbage_is_corrupt() {
    let bytes = b"II\x2a\x00garbage garbage garbage";
    assert!(matches!(
        codec::decode(bytes),
        Err(EngineError::CorruptData(_))
    ));
}

#[test]
fn unknown_signature_is_unsupported() {
    assert!(matches!(
        codec::decode(b"\x89PNG\r\n\x1a\n...."),
        Err(EngineError::UnsupportedFormat(_))
    ));
}
