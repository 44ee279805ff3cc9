//! Criterion benchmarks for u-mipgen model builders and writers.
//!
//! Measures model construction, instance generation, and serialization
//! independent of the filesystem.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use u_mipgen::covering::{build_covering_design, CoveringParams};
use u_mipgen::format::{write_to, ProblemFormat};
use u_mipgen::knapsack::{build_knapsack, example};
use u_mipgen::mip::{EnumerationSolver, MipSolver, SolverConfig};
use u_mipgen::noise::{
    build_noise_dosage, generate_instance, GeneratorConfig, GeneratorParams, SymmetryHandling,
};

// ===========================================================================
// Model construction
// ===========================================================================

fn bench_covering_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("covering_build");
    group.sample_size(10);

    for (v, k, t) in [(7usize, 3usize, 2usize), (10, 5, 3), (12, 6, 4)] {
        let params = CoveringParams::new(2, v, k, t).unwrap();
        group.bench_with_input(
            BenchmarkId::from_parameter(params.name()),
            &params,
            |b, p| b.iter(|| black_box(build_covering_design(black_box(p)))),
        );
    }
    group.finish();
}

fn bench_noise_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("noise_build");
    let config = GeneratorConfig::default();

    for (m, n) in [(3usize, 8usize), (7, 12), (11, 16)] {
        let inst = generate_instance(&GeneratorParams::new(m, n, 480, 0), &config).unwrap();
        for symmetry in [SymmetryHandling::None, SymmetryHandling::SheraliSmith] {
            group.bench_with_input(
                BenchmarkId::new(format!("{symmetry:?}"), inst.name()),
                &inst,
                |b, i| b.iter(|| black_box(build_noise_dosage(black_box(i), symmetry))),
            );
        }
    }
    group.finish();
}

// ===========================================================================
// Generation and serialization
// ===========================================================================

fn bench_noise_generate(c: &mut Criterion) {
    let config = GeneratorConfig::default();
    let params = GeneratorParams::new(11, 16, 480, 4);
    c.bench_function("noise_generate", |b| {
        b.iter(|| black_box(generate_instance(black_box(&params), &config).unwrap()))
    });
}

fn bench_write(c: &mut Criterion) {
    let mut group = c.benchmark_group("write");
    let covering = build_covering_design(&CoveringParams::new(3, 12, 6, 4).unwrap());

    for format in [ProblemFormat::Mps, ProblemFormat::Cip] {
        group.bench_with_input(
            BenchmarkId::from_parameter(format.extension()),
            &format,
            |b, &f| {
                b.iter(|| {
                    let mut buf = Vec::with_capacity(1 << 20);
                    write_to(black_box(&covering), f, &mut buf).unwrap();
                    black_box(buf)
                })
            },
        );
    }
    group.finish();
}

fn bench_knapsack_enumeration(c: &mut Criterion) {
    let model = build_knapsack(&example()).unwrap();
    let solver = EnumerationSolver::new();
    let config = SolverConfig::default();
    c.bench_function("knapsack_enumeration", |b| {
        b.iter(|| black_box(solver.solve(black_box(&model), &config)))
    });
}

criterion_group!(
    benches,
    bench_covering_build,
    bench_noise_build,
    bench_noise_generate,
    bench_write,
    bench_knapsack_enumeration
);
criterion_main!(benches);
