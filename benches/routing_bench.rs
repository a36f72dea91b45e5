//! Criterion benchmarks for the TSP and CVRP engines.
//!
//! Instances are random stops around a depot, seeded so runs compare.

use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::Rng;
use route_optimizer::cvrp::{CvrpConfig, CvrpSolver, LocalDescent};
use route_optimizer::distance::{DistanceMatrix, Metric};
use route_optimizer::models::{CvrpProblem, Stop, Vehicle};
use route_optimizer::tsp::{solve_tsp_matrix, TspOptions};

fn random_stops(n: usize, seed: u64) -> Vec<Stop> {
    let mut rng = u_numflow::random::create_rng(seed);
    let mut stops = vec![Stop::new("Depot", 23.18, 79.95)];
    for i in 1..n {
        let lat = 23.18 + rng.random_range(-0.1..0.1);
        let lon = 79.95 + rng.random_range(-0.1..0.1);
        stops.push(Stop::new(format!("S{i}"), lat, lon).with_demand(rng.random_range(1..10)));
    }
    stops
}

fn bench_distance_matrix(c: &mut Criterion) {
    let mut group = c.benchmark_group("distance_matrix");

    for &n in &[20, 100, 400] {
        let stops = random_stops(n, 42);
        group.bench_with_input(BenchmarkId::from_parameter(n), &stops, |b, s| {
            b.iter(|| black_box(DistanceMatrix::from_stops(black_box(s), Metric::Geodesic)))
        });
    }
    group.finish();
}

fn bench_tsp(c: &mut Criterion) {
    let mut group = c.benchmark_group("tsp_greedy_two_opt");
    group.sample_size(20);

    for &n in &[20, 50, 100] {
        let matrix = DistanceMatrix::from_stops(&random_stops(n, 42), Metric::Geodesic);
        let options = TspOptions::default();
        group.bench_with_input(BenchmarkId::from_parameter(n), &(matrix, options), |b, (m, o)| {
            b.iter(|| {
                let result = solve_tsp_matrix(black_box(m), black_box(o));
                black_box(result)
            })
        });
    }
    group.finish();
}

fn bench_cvrp_descent(c: &mut Criterion) {
    let mut group = c.benchmark_group("cvrp_descent");
    group.sample_size(10);

    for &(n, k) in &[(20usize, 3usize), (50, 6), (100, 12)] {
        let stops = random_stops(n, 7);
        let matrix = DistanceMatrix::from_stops(&stops, Metric::Geodesic);
        let problem = CvrpProblem::from_stops(&stops, matrix, Vehicle::fleet(k, 50), 0)
            .expect("valid instance");
        let config = CvrpConfig::default().with_time_limit(Duration::from_secs(5));
        let solver = CvrpSolver::new(config)
            .expect("valid config")
            .with_search(LocalDescent);
        group.bench_with_input(
            BenchmarkId::new(format!("n{n}_k{k}"), n),
            &(problem, solver),
            |b, (p, s)| {
                b.iter(|| {
                    let result = s.solve(black_box(p));
                    black_box(result)
                })
            },
        );
    }
    group.finish();
}

fn bench_cvrp_annealing(c: &mut Criterion) {
    let mut group = c.benchmark_group("cvrp_annealing");
    group.sample_size(10);

    for &(n, k) in &[(20usize, 3usize), (50, 6)] {
        let stops = random_stops(n, 7);
        let matrix = DistanceMatrix::from_stops(&stops, Metric::Geodesic);
        let problem = CvrpProblem::from_stops(&stops, matrix, Vehicle::fleet(k, 50), 0)
            .expect("valid instance");
        let config = CvrpConfig::default()
            .with_time_limit(Duration::from_millis(200))
            .with_stall_rounds(10);
        let solver = CvrpSolver::new(config).expect("valid config");
        group.bench_with_input(
            BenchmarkId::new(format!("n{n}_k{k}"), n),
            &(problem, solver),
            |b, (p, s)| {
                b.iter(|| {
                    let result = s.solve(black_box(p));
                    black_box(result)
                })
            },
        );
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_distance_matrix,
    bench_tsp,
    bench_cvrp_descent,
    bench_cvrp_annealing
);
criterion_main!(benches);
