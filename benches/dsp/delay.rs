//! Benchmarks for delay buffer operations.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use saavy_flanger::dsp::DelayBuffer;

use crate::BLOCK_SIZES;

pub fn bench_delay(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/delay");

    // Buffer capacities (in samples)
    let capacities: &[usize] = &[
        480,   // 10ms at 48kHz
        4800,  // 100ms at 48kHz
        48000, // 1 second at 48kHz
    ];

    for &size in BLOCK_SIZES {
        let input: Vec<f32> = (0..size).map(|i| (i as f32 * 0.1).sin()).collect();

        for &capacity in capacities {
            // Write + advance only (integer bookkeeping)
            let mut delay = DelayBuffer::new(capacity).unwrap();
            group.bench_with_input(
                BenchmarkId::new(format!("write_{}", capacity), size),
                &size,
                |b, _| {
                    b.iter(|| {
                        for &sample in black_box(&input) {
                            delay.write(sample);
                            delay.advance();
                        }
                    })
                },
            );
        }

        // Interpolated read (modulated offset, flanger-like)
        let mut delay = DelayBuffer::new(4800).unwrap();
        for &sample in &input {
            delay.write(sample);
            delay.advance();
        }
        group.bench_with_input(BenchmarkId::new("read_at", size), &size, |b, _| {
            b.iter(|| {
                let mut sum = 0.0f32;
                for i in 0..size {
                    let offset = -480.0 - (i as f32 * 0.1).sin() * 48.0;
                    sum += delay.read_at(black_box(offset));
                }
                sum
            })
        });
    }

    group.finish();
}
