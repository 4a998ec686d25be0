//! Benchmarks for the sweep oscillator.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use saavy_flanger::dsp::Oscillator;

use crate::BLOCK_SIZES;

pub fn bench_lfo(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/lfo");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // cos() per sample plus counter wrap
        let mut lfo = Oscillator::new(48_000.0, 0.5).unwrap();
        group.bench_with_input(BenchmarkId::new("cosine", size), &size, |b, _| {
            b.iter(|| {
                for sample in black_box(&mut buffer).iter_mut() {
                    *sample = lfo.current_value();
                    lfo.advance();
                }
            })
        });
    }

    group.finish();
}
