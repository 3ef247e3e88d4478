//! Benchmarks for urn inference.

use bayes_urns::prelude::*;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn observations(draws: u64, experiments: usize) -> Vec<u64> {
    (0..experiments as u64).map(|i| (draws / 3 + i % 3).min(draws)).collect()
}

fn bench_run_inference(c: &mut Criterion) {
    let mut group = c.benchmark_group("run_inference");

    for population in [50u64, 200, 1000].iter() {
        let draws = population / 10;
        let obs = observations(draws, 10);

        for sampling in [Sampling::WithReplacement, Sampling::WithoutReplacement] {
            let config = UrnConfig::new(*population, draws, obs.clone(), sampling);
            group.bench_with_input(
                BenchmarkId::new(sampling.to_string(), population),
                &config,
                |b, config| {
                    b.iter(|| {
                        let mut urn = UrnInference::new(black_box(config.clone())).unwrap();
                        urn.run_inference().unwrap().len()
                    });
                },
            );
        }
    }

    group.finish();
}

fn bench_binomial(c: &mut Criterion) {
    let mut group = c.benchmark_group("binomial");

    for n in [100u64, 1000, 5000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(n), n, |b, &n| {
            b.iter(|| binomial(black_box(n), black_box((n / 2) as i64)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_run_inference, bench_binomial);
criterion_main!(benches);
