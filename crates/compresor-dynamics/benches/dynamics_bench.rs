//! Criterion benchmarks for the compressor engine
//!
//! Run with: cargo bench
#![allow(missing_docs)]

use compresor_core::AudioBuffer;
use compresor_dynamics::Compressor;
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

const SAMPLE_RATE: f32 = 48000.0;
const BLOCK_SIZES: &[usize] = &[64, 128, 256, 512, 1024];

fn generate_test_block(channels: usize, frames: usize) -> AudioBuffer {
    let mut buf = AudioBuffer::new(channels, frames);
    for ch in 0..channels {
        for (i, sample) in buf.channel_mut(ch).iter_mut().enumerate() {
            let t = i as f32 / SAMPLE_RATE;
            *sample = (2.0 * std::f32::consts::PI * 440.0 * t).sin() * 0.5;
        }
    }
    buf
}

fn compressor(channels: usize, block_size: usize) -> Compressor {
    let mut comp = Compressor::new();
    comp.set_threshold_db(-20.0);
    comp.set_ratio(4.0);
    comp.set_attack_ms(5.0);
    comp.set_release_ms(50.0);
    comp.prepare(SAMPLE_RATE, block_size, channels).unwrap();
    comp
}

fn bench_channels(c: &mut Criterion, name: &str, channels: usize) {
    let mut group = c.benchmark_group(name);

    for &block_size in BLOCK_SIZES {
        let input = generate_test_block(channels, block_size);
        let mut comp = compressor(channels, block_size);

        group.bench_with_input(
            BenchmarkId::from_parameter(block_size),
            &block_size,
            |b, _| {
                let mut buf = AudioBuffer::new(channels, block_size);
                b.iter(|| {
                    buf.copy_from(&input);
                    comp.process_block(black_box(&mut buf));
                    black_box(buf.channel(0)[0])
                })
            },
        );
    }

    group.finish();
}

fn bench_mono(c: &mut Criterion) {
    bench_channels(c, "Compressor/mono", 1);
}

fn bench_stereo(c: &mut Criterion) {
    bench_channels(c, "Compressor/stereo", 2);
}

fn bench_stereo_tapped(c: &mut Criterion) {
    let mut group = c.benchmark_group("Compressor/stereo-tapped");

    for &block_size in BLOCK_SIZES {
        let input = generate_test_block(2, block_size);
        let mut comp = compressor(2, block_size);

        group.bench_with_input(
            BenchmarkId::from_parameter(block_size),
            &block_size,
            |b, _| {
                let mut buf = AudioBuffer::new(2, block_size);
                let mut reduction = AudioBuffer::new(2, block_size);
                b.iter(|| {
                    buf.copy_from(&input);
                    comp.process_block_tapped(black_box(&mut buf), &mut reduction);
                    black_box(reduction.channel(0)[0])
                })
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_mono, bench_stereo, bench_stereo_tapped);

criterion_main!(benches);
