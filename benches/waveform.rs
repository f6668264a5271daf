use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use mrsgate::scan::{MassPair, PairScan};
use mrsgate::timing::CESIUM_CYCLE_NS;
use mrsgate::waveform::{PhaseOffset, SampleWindow, Species, WaveformEngine};

/// Benchmark single-species generation across window sizes
fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");

    for length in [250_000u32, 1_000_000, 4_000_000] {
        group.throughput(Throughput::Elements(u64::from(length)));

        let engine = WaveformEngine::with_cycles(
            Species::new(85.0, 0.4),
            60.0,
            SampleWindow::unit(length),
            PhaseOffset::None,
        )
        .unwrap();

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}ns", length)),
            &length,
            |b, _| {
                b.iter(|| black_box(engine.generate().unwrap()));
            },
        );
    }

    group.finish();
}

/// Benchmark the full pair pipeline: two waves, AND, statistics
fn bench_pair_statistics(c: &mut Criterion) {
    let mut group = c.benchmark_group("pair_statistics");
    group.sample_size(20);

    for (first, second) in [(66.0, 94.0), (85.0, 87.0), (133.0, 133.0)] {
        let scan = PairScan::suggested(MassPair::new(first, second), 30.0, 0.4, CESIUM_CYCLE_NS);
        group.throughput(Throughput::Elements(u64::from(scan.window.length_ns)));

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}-{}", first, second)),
            &scan,
            |b, scan| {
                b.iter(|| black_box(scan.statistics(black_box(10)).unwrap()));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_generate, bench_pair_statistics);
criterion_main!(benches);
