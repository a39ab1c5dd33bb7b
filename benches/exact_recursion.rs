/// ****************************************************************************
/// * Copyright (c) 2025
/// The Prosperity Public License 3.0.0
///
/// Contributor: [shitohana](https://github.com/shitohana)
/// ***************************************************************************
use criterion::{
    black_box,
    criterion_group,
    criterion_main,
    Criterion,
};
use ranksum::prelude::*;

pub fn benchmark_point_probability(c: &mut Criterion) {
    let sizes = [(5, 8), (8, 8), (20, 20), (40, 40)];
    let mut group = c.benchmark_group("exact_point");

    for (n_a, n_b) in sizes {
        let u = (n_a * n_b / 4) as u64;
        group.bench_function(format!("n_a_{}_n_b_{}", n_a, n_b), |b| {
            b.iter(|| {
                exact_p(black_box(n_a), black_box(n_b), black_box(u))
            });
        });
    }
    group.finish();
}

pub fn benchmark_cumulative_probability(c: &mut Criterion) {
    let sizes = [(5, 8), (8, 8), (20, 20)];
    let mut group = c.benchmark_group("exact_cumulative");

    for (n_a, n_b) in sizes {
        let u = (n_a * n_b / 4) as u64;
        group.bench_function(format!("n_a_{}_n_b_{}", n_a, n_b), |b| {
            b.iter(|| {
                ExactDistribution::new(ExactMode::Cumulative).probability(
                    black_box(n_a),
                    black_box(n_b),
                    black_box(u),
                    Tail::Lower,
                )
            });
        });
    }
    group.finish();
}

pub fn benchmark_approximations(c: &mut Criterion) {
    let mut group = c.benchmark_group("approximations");
    group.bench_function("normal_3_30", |b| {
        b.iter(|| {
            normal_approximation(black_box(3), black_box(30), black_box(2.0), Tail::Lower)
        });
    });
    group.bench_function("uniform_3_30", |b| {
        b.iter(|| uniform_approximation(black_box(3), black_box(30), black_box(2.0)));
    });
    group.finish();
}

criterion_group!(
    benches,
    benchmark_point_probability,
    benchmark_cumulative_probability,
    benchmark_approximations
);
criterion_main!(benches);
