use crate::engine::buffer::{ColorSpace, PixelBuffer, SampleBuffer};
use crate::engine::common::error::EngineError;
use crate::engine::ops::{
    BilateralFilter, BoxBlur, Brighten, Contrast, Crop, Exposure, Flip, Flop, Gamma, GaussianBlur,
    HslAdjust, ImageOp, MedianBlur, Rotate90, Scharr, Sobel, StretchContrast, Transpose,
};

fn luma_u8(width: usize, height: usize, samples: Vec<u8>) -> PixelBuffer {
    PixelBuffer::from_samples(width, height, ColorSpace::Luma, SampleBuffer::U8(samples)).unwrap()
}

fn rgb_u8(width: usize, height: usize, samples: Vec<u8>) -> PixelBuffer {
    PixelBuffer::from_samples(width, height, ColorSpace::Rgb, SampleBuffer::U8(samples)).unwrap()
}

fn u8_samples(buffer: &PixelBuffer) -> &[u8] {
    match buffer.samples() {
        SampleBuffer::U8(data) => data,
        other => panic!("expected u8 samples, got {:?}", other.depth()),
    }
}

#[test]
fn crop_extracts_subregion() {
    let mut buffer = luma_u8(4, 4, (0..16).collect());
    Crop::new(2, 2, 1, 1).apply(&mut buffer).unwrap();
    assert_eq!(buffer.width(), 2);
    assert_eq!(buffer.height(), 2);
    assert_eq!(u8_samples(&buffer), &[5, 6, 9, 10]);
}

#[test]
fn crop_out_of_bounds_leaves_image_untouched() {
    let mut buffer = luma_u8(4, 4, (0..16).collect());
    let before = buffer.clone();
    let result = Crop::new(3, 3, 2, 2).apply(&mut buffer);
    assert!(matches!(result, Err(EngineError::OutOfBounds { .. })));
    assert_eq!(buffer, before);
}

#[test]
fn flip_reverses_row_order() {
    let mut buffer = luma_u8(2, 3, vec![1, 2, 3, 4, 5, 6]);
    Flip.apply(&mut buffer).unwrap();
    assert_eq!(u8_samples(&buffer), &[5, 6, 3, 4, 1, 2]);
}

#[test]
fn flip_and_flop_are_involutions() {
    let original = rgb_u8(3, 2, (0..18).collect());

    let mut flipped = original.clone();
    Flip.apply(&mut flipped).unwrap();
    Flip.apply(&mut flipped).unwrap();
    assert_eq!(flipped, original);

    let mut flopped = original.clone();
    Flop.apply(&mut flopped).unwrap();
    Flop.apply(&mut flopped).unwrap();
    assert_eq!(flopped, original);
}

#[test]
fn flop_mirrors_each_row() {
    let mut buffer = rgb_u8(2, 1, vec![1, 2, 3, 4, 5, 6]);
    Flop.apply(&mut buffer).unwrap();
    assert_eq!(u8_samples(&buffer), &[4, 5, 6, 1, 2, 3]);
}

#[test]
fn transpose_swaps_axes() {
    let mut buffer = luma_u8(3, 2, vec![1, 2, 3, 4, 5, 6]);
    Transpose.apply(&mut buffer).unwrap();
    assert_eq!(buffer.width(), 2);
    assert_eq!(buffer.height(), 3);
    assert_eq!(u8_samples(&buffer), &[1, 4, 2, 5, 3, 6]);
}

#[test]
fn rotate90_reports_not_implemented() {
    let mut buffer = luma_u8(2, 2, vec![0; 4]);
    let before = buffer.clone();
    let result = Rotate90.apply(&mut buffer);
    assert!(matches!(result, Err(EngineError::NotImplemented("rotate90"))));
    assert_eq!(buffer, before);
}

#[test]
fn brighten_adds_and_clamps() {
    let mut buffer = luma_u8(2, 2, vec![0, 100, 200, 250]);
    Brighten::new(10.0).apply(&mut buffer).unwrap();
    assert_eq!(u8_samples(&buffer), &[10, 110, 210, 255]);

    Brighten::new(-20.0).apply(&mut buffer).unwrap();
    assert_eq!(u8_samples(&buffer), &[0, 90, 190, 235]);
}

#[test]
fn contrast_keeps_midpoint_fixed() {
    let mut buffer = rgb_u8(4, 4, vec![128; 4 * 4 * 3]);
    Contrast::new(2.0).apply(&mut buffer).unwrap();
    assert!(u8_samples(&buffer).iter().all(|&v| v == 128));

    let mut darker = luma_u8(1, 1, vec![64]);
    Contrast::new(2.0).apply(&mut darker).unwrap();
    assert!(u8_samples(&darker)[0] < 64);
}

#[test]
fn exposure_doubles_per_stop() {
    let mut buffer = luma_u8(1, 3, vec![10, 60, 200]);
    Exposure::new(1.0, 0.0).apply(&mut buffer).unwrap();
    assert_eq!(u8_samples(&buffer), &[20, 120, 255]);
}

#[test]
fn gamma_rejects_non_positive() {
    let mut buffer = luma_u8(1, 1, vec![100]);
    assert!(matches!(
        Gamma::new(0.0).apply(&mut buffer),
        Err(EngineError::InvalidParameter(_))
    ));
    assert!(matches!(
        Gamma::new(-1.5).apply(&mut buffer),
        Err(EngineError::InvalidParameter(_))
    ));
    assert_eq!(u8_samples(&buffer), &[100]);
}

#[test]
fn gamma_one_is_identity() {
    let mut buffer = luma_u8(1, 4, vec![0, 64, 128, 255]);
    Gamma::new(1.0).apply(&mut buffer).unwrap();
    assert_eq!(u8_samples(&buffer), &[0, 64, 128, 255]);
}

#[test]
fn stretch_contrast_expands_band() {
    let mut buffer = luma_u8(1, 3, vec![0, 64, 128]);
    StretchContrast::new(0.0, 128.0).apply(&mut buffer).unwrap();
    assert_eq!(u8_samples(&buffer), &[0, 128, 255]);
}

#[test]
fn stretch_contrast_rejects_bad_range() {
    let mut buffer = luma_u8(1, 1, vec![50]);
    assert!(matches!(
        StretchContrast::new(128.0, 128.0).apply(&mut buffer),
        Err(EngineError::InvalidRange { .. })
    ));
    assert!(matches!(
        StretchContrast::new(200.0, 100.0).apply(&mut buffer),
        Err(EngineError::InvalidRange { .. })
    ));
}

#[test]
fn blur_radius_zero_is_noop() {
    let original = luma_u8(3, 3, (0..9).collect());

    for op in [&BoxBlur::new(0) as &dyn ImageOp, &GaussianBlur::new(0), &MedianBlur::new(0)] {
        let mut buffer = original.clone();
        op.apply(&mut buffer).unwrap();
        assert_eq!(buffer, original);
    }
}

#[test]
fn blurs_preserve_uniform_images() {
    let original = rgb_u8(4, 4, vec![77; 4 * 4 * 3]);

    for op in [
        &BoxBlur::new(1) as &dyn ImageOp,
        &GaussianBlur::new(2),
        &MedianBlur::new(1),
        &BilateralFilter::new(3, 2.0, 20.0),
    ] {
        let mut buffer = original.clone();
        op.apply(&mut buffer).unwrap();
        assert_eq!(buffer, original);
    }
}

#[test]
fn box_blur_averages_with_edge_clamping() {
    let mut buffer = luma_u8(3, 1, vec![0, 30, 60]);
    BoxBlur::new(1).apply(&mut buffer).unwrap();
    assert_eq!(u8_samples(&buffer), &[10, 30, 50]);
}

#[test]
fn median_blur_removes_outlier() {
    let mut samples = vec![10u8; 9];
    samples[4] = 200;
    let mut buffer = luma_u8(3, 3, samples);
    MedianBlur::new(1).apply(&mut buffer).unwrap();
    assert!(u8_samples(&buffer).iter().all(|&v| v == 10));
}

#[test]
fn bilateral_rejects_bad_diameter() {
    let mut buffer = luma_u8(2, 2, vec![0; 4]);
    for diameter in [0, -3, 4] {
        assert!(matches!(
            BilateralFilter::new(diameter, 2.0, 10.0).apply(&mut buffer),
            Err(EngineError::InvalidParameter(_))
        ));
    }
}

#[test]
fn sobel_is_zero_on_flat_image() {
    let mut buffer = rgb_u8(4, 4, vec![90; 4 * 4 * 3]);
    Sobel.apply(&mut buffer).unwrap();
    assert!(u8_samples(&buffer).iter().all(|&v| v == 0));
}

#[test]
fn sobel_marks_vertical_edge() {
    // Left half black, right half white; the seam columns must light up.
    let mut samples = Vec::new();
    for _ in 0..4 {
        samples.extend_from_slice(&[0, 0, 255, 255]);
    }
    let mut buffer = luma_u8(4, 4, samples);
    Sobel.apply(&mut buffer).unwrap();
    let data = u8_samples(&buffer);
    assert_eq!(data[0], 0);
    assert!(data[1] > 0);
    assert!(data[2] > 0);
    assert_eq!(data[3], 0);
}

#[test]
fn scharr_preserves_alpha() {
    let mut samples = Vec::new();
    for value in [0u8, 0, 255, 255] {
        samples.extend_from_slice(&[value, value, value, 200]);
    }
    let mut buffer =
        PixelBuffer::from_samples(4, 1, ColorSpace::Rgba, SampleBuffer::U8(samples)).unwrap();
    Scharr.apply(&mut buffer).unwrap();
    let data = u8_samples(&buffer);
    for pixel in data.chunks(4) {
        assert_eq!(pixel[3], 200);
    }
}

#[test]
fn hsl_adjust_requires_rgb_family() {
    let mut buffer = luma_u8(2, 2, vec![0; 4]);
    assert!(matches!(
        HslAdjust::new(10.0, 1.0, 1.0).apply(&mut buffer),
        Err(EngineError::UnsupportedColorSpace(ColorSpace::Luma))
    ));
}

#[test]
fn hsl_hue_rotation_cycles_primaries() {
    let mut buffer = rgb_u8(1, 1, vec![255, 0, 0]);
    HslAdjust::new(120.0, 1.0, 1.0).apply(&mut buffer).unwrap();
    assert_eq!(u8_samples(&buffer), &[0, 255, 0]);
}

#[test]
fn hsl_identity_adjustment_is_stable() {
    let original = rgb_u8(2, 1, vec![200, 120, 40, 10, 250, 90]);
    let mut buffer = original.clone();
    HslAdjust::new(0.0, 1.0, 1.0).apply(&mut buffer).unwrap();
    let data = u8_samples(&buffer);
    let expected = u8_samples(&original);
    for (got, want) in data.iter().zip(expected) {
        assert!((*got as i16 - *want as i16).abs() <= 1);
    }
}

#[test]
fn tone_ops_work_on_sixteen_bit() {
    let samples = SampleBuffer::U16(vec![0, 1000, 40000, 65535]);
    let mut buffer = PixelBuffer::from_samples(4, 1, ColorSpace::Luma, samples).unwrap();
    Brighten::new(1000.0).apply(&mut buffer).unwrap();
    match buffer.samples() {
        SampleBuffer::U16(data) => assert_eq!(data, &[1000, 2000, 41000, 65535]),
        _ => unreachable!(),
    }
}

#[test]
fn tone_ops_clamp_float_to_unit_range() {
    let samples = SampleBuffer::F32(vec![0.2, 0.9]);
    let mut buffer = PixelBuffer::from_samples(2, 1, ColorSpace::Luma, samples).unwrap();
    Brighten::new(0.5).apply(&mut buffer).unwrap();
    match buffer.samples() {
        SampleBuffer::F32(data) => {
            assert!((data[0] - 0.7).abs() < 1e-6);
            assert!((data[1] - 1.0).abs() < 1e-6);
        }
        _ => unreachable!(),
    }
}
