use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rasterkit::engine::{ColorSpace, Image, PixelBuffer, SampleBuffer};

fn generate_rgb_image(width: usize, height: usize) -> Image {
    let mut samples = Vec::with_capacity(width * height * 3);
    for y in 0..height {
        for x in 0..width {
            let value = ((x + y) % 256) as u8;
            samples.push(value);
            samples.push(value.wrapping_mul(3));
            samples.push(value.wrapping_add(64));
        }
    }
    Image::from_buffer(
        PixelBuffer::from_samples(width, height, ColorSpace::Rgb, SampleBuffer::U8(samples))
            .unwrap(),
    )
}

fn benchmark_blurs_by_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("blur_by_size");

    let sizes = vec![(100, 100, "100x100"), (500, 500, "500x500"), (1000, 1000, "1000x1000")];

    for (width, height, label) in sizes {
        let image = generate_rgb_image(width, height);

        group.bench_with_input(BenchmarkId::new("box", label), &image, |b, image| {
            b.iter(|| {
                let mut copy = black_box(image.clone());
                copy.box_blur(3).unwrap();
            });
        });

        group.bench_with_input(BenchmarkId::new("gaussian", label), &image, |b, image| {
            b.iter(|| {
                let mut copy = black_box(image.clone());
                copy.gaussian_blur(3).unwrap();
            });
        });
    }

    group.finish();
}

fn benchmark_tone_curves(c: &mut Criterion) {
    let mut group = c.benchmark_group("tone_curves");
    let image = generate_rgb_image(500, 500);

    group.bench_function("brighten", |b| {
        b.iter(|| {
            let mut copy = black_box(image.clone());
            copy.brighten(10.0).unwrap();
        });
    });

    group.bench_function("contrast", |b| {
        b.iter(|| {
            let mut copy = black_box(image.clone());
            copy.contrast(20.0).unwrap();
        });
    });

    group.bench_function("gamma", |b| {
        b.iter(|| {
            let mut copy = black_box(image.clone());
            copy.gamma(2.2).unwrap();
        });
    });

    group.finish();
}

fn benchmark_edge_detectors(c: &mut Criterion) {
    let mut group = c.benchmark_group("edge_detectors");
    let image = generate_rgb_image(500, 500);

    group.bench_function("sobel", |b| {
        b.iter(|| {
            let mut copy = black_box(image.clone());
            copy.sobel().unwrap();
        });
    });

    group.bench_function("scharr", |b| {
        b.iter(|| {
            let mut copy = black_box(image.clone());
            copy.scharr().unwrap();
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_blurs_by_size,
    benchmark_tone_curves,
    benchmark_edge_detectors
);
criterion_main!(benches);
