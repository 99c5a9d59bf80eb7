//! Per-channel intensity histograms.

use std::collections::BTreeMap;

use crate::engine::buffer::{BitDepth, PixelBuffer, SampleBuffer};

/// Count sample values per channel, keyed by channel name.
///
/// Bucket layout covers the full value range of the current depth: 256
/// buckets at 8 bits, 65536 at 16 bits. Float samples are clamped to
/// [0, 1] and quantized into 256 buckets. Every channel's counts sum to
/// `width * height`.
pub fn channel_histogram(buffer: &PixelBuffer) -> BTreeMap<String, Vec<u64>> {
    let channels = buffer.channels();
    let buckets = match buffer.depth() {
        BitDepth::Eight | BitDepth::Float32 => 256,
        BitDepth::Sixteen => 65536,
    };
    let mut counts = vec![vec![0u64; buckets]; channels];

    match buffer.samples() {
        SampleBuffer::U8(data) => {
            for pixel in data.chunks_exact(channels) {
                for (c, &value) in pixel.iter().enumerate() {
                    counts[c][value as usize] += 1;
                }
            }
        }
        SampleBuffer::U16(data) => {
            for pixel in data.chunks_exact(channels) {
                for (c, &value) in pixel.iter().enumerate() {
                    counts[c][value as usize] += 1;
                }
            }
        }
        SampleBuffer::F32(data) => {
            for pixel in data.chunks_exact(channels) {
                for (c, &value) in pixel.iter().enumerate() {
                    let bucket = (value.clamp(0.0, 1.0) * 255.0).round() as usize;
                    counts[c][bucket] += 1;
                }
            }
        }
    }

    buffer
        .color_space()
        .channel_names()
        .iter()
        .zip(counts)
        .map(|(name, channel_counts)| (name.to_string(), channel_counts))
        .collect()
}
