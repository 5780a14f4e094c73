//! Whole-pipeline benchmarks: one full city per iteration.
//!
//! Run with: cargo bench -p generation --bench pipeline_bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use generation::{generate_city, CancelToken, CityConfig, CitySize, RoadPattern};

fn bench_patterns(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate_city_small");
    group.sample_size(20);
    for pattern in [
        RoadPattern::Grid,
        RoadPattern::Organic,
        RoadPattern::Radial,
        RoadPattern::Fractal,
    ] {
        let config = CityConfig {
            road_pattern: pattern,
            water_body_count: 2,
            rng_seed: Some(7),
            ..Default::default()
        }
        .validate()
        .expect("valid config");
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{pattern:?}")),
            &config,
            |b, config| b.iter(|| generate_city(black_box(config), &CancelToken::new())),
        );
    }
    group.finish();
}

fn bench_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate_city_mixed");
    group.sample_size(10);
    for size in [CitySize::Small, CitySize::Medium, CitySize::Large, CitySize::Xlarge] {
        let config = CityConfig {
            city_size: size,
            road_pattern: RoadPattern::Mixed,
            rng_seed: Some(7),
            ..Default::default()
        }
        .validate()
        .expect("valid config");
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{size:?}")),
            &config,
            |b, config| b.iter(|| generate_city(black_box(config), &CancelToken::new())),
        );
    }
    group.finish();
}

criterion_group!(benches, bench_patterns, bench_sizes);
criterion_main!(benches);
