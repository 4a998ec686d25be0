//! Benchmarks for complete flanger blocks.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use saavy_flanger::{ControlSettings, Flanger};

use crate::BLOCK_SIZES;

fn jet_sweep(channels: usize) -> Flanger {
    let mut flanger = Flanger::new();
    flanger.configure(48_000.0, channels, 4800).unwrap();
    let settings = ControlSettings {
        depth: 1.02,
        rate_coarse_hz: 0.0,
        rate_fine_hz: 0.3,
        delay_coarse_ms: 2.0,
        phase_balance_degrees: 90.0,
        delay_gain: 0.7,
        regen_gain: 0.8,
        ..Default::default()
    };
    settings.apply(&mut flanger).unwrap();
    flanger
}

pub fn bench_flanger(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/flanger");

    for &size in BLOCK_SIZES {
        let signal: Vec<f32> = (0..size).map(|i| (i as f32 * 0.05).sin()).collect();

        // === MONO ===
        let mut mono = jet_sweep(1);
        let input = [signal.clone()];
        let mut output = [vec![0.0f32; size]];
        group.bench_with_input(BenchmarkId::new("mono", size), &size, |b, _| {
            b.iter(|| {
                mono.process(black_box(&input), black_box(&mut output))
                    .unwrap();
            })
        });

        // === STEREO (in place) ===
        let mut stereo = jet_sweep(2);
        let mut buffers = [signal.clone(), signal.clone()];
        group.bench_with_input(BenchmarkId::new("stereo_in_place", size), &size, |b, _| {
            b.iter(|| {
                buffers[0].copy_from_slice(&signal);
                buffers[1].copy_from_slice(&signal);
                stereo.process_in_place(black_box(&mut buffers)).unwrap();
            })
        });
    }

    group.finish();
}
