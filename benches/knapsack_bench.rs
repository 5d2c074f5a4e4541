//! Criterion benchmarks for the knapsack GA and its baselines.
//!
//! Uses the 50-item reference catalog and random catalogs of growing size.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use u_knapsack::baseline::{hill_climb, ratio_greedy, LocalSearchConfig};
use u_knapsack::catalog::{Capacity, Catalog};
use u_knapsack::ga::{GaConfig, GaRunner, KnapsackProblem, Selection};
use u_knapsack::random::create_rng;

fn reference_problem() -> KnapsackProblem {
    KnapsackProblem::new(Catalog::reference(), Capacity::new(1000.0, 3000.0)).unwrap()
}

/// Random catalog with capacity at half the grand totals.
fn random_problem(n: usize) -> KnapsackProblem {
    let mut rng = create_rng(42);
    let catalog = Catalog::random(n, &mut rng).unwrap();
    let totals = catalog.grand_totals();
    let capacity = Capacity::new(totals.weight / 2.0, totals.volume / 2.0);
    KnapsackProblem::new(catalog, capacity).unwrap()
}

// ===========================================================================
// GA
// ===========================================================================

fn bench_ga_selection(c: &mut Criterion) {
    let mut group = c.benchmark_group("ga_selection");
    group.sample_size(10);

    let problem = reference_problem();
    for selection in [Selection::Tournament(3), Selection::Roulette, Selection::Rank] {
        let config = GaConfig::default()
            .with_max_generations(100)
            .without_stagnation_limit()
            .with_selection(selection)
            .with_seed(42);
        group.bench_with_input(
            BenchmarkId::from_parameter(selection.name()),
            &config,
            |b, cfg| {
                b.iter(|| {
                    let result = GaRunner::run(black_box(&problem), black_box(cfg));
                    black_box(result)
                })
            },
        );
    }
    group.finish();
}

fn bench_ga_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("ga_scaling");
    group.sample_size(10);

    for &n in &[50, 200, 500] {
        let problem = random_problem(n);
        let config = GaConfig::fast().without_stagnation_limit().with_seed(42);
        group.bench_with_input(
            BenchmarkId::from_parameter(n),
            &(problem, config),
            |b, (p, cfg)| {
                b.iter(|| {
                    let result = GaRunner::run(black_box(p), black_box(cfg));
                    black_box(result)
                })
            },
        );
    }
    group.finish();
}

// ===========================================================================
// Baselines
// ===========================================================================

fn bench_baselines(c: &mut Criterion) {
    let mut group = c.benchmark_group("baselines");
    let problem = reference_problem();

    group.bench_function("ratio_greedy", |b| {
        b.iter(|| black_box(ratio_greedy(black_box(problem.catalog()), problem.capacity())))
    });

    let config = LocalSearchConfig::default().with_seed(42);
    group.bench_function("hill_climb", |b| {
        b.iter(|| black_box(hill_climb(black_box(&problem), black_box(&config))))
    });
    group.finish();
}

criterion_group!(benches, bench_ga_selection, bench_ga_scaling, bench_baselines);
criterion_main!(benches);
