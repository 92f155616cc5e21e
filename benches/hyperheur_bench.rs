//! Criterion benchmarks for the search engine.
//!
//! Measures a full fitness sweep per bundled domain and single heuristic
//! applications, on the first generated instance.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use u_hyperheur::algorithm::AlgorithmSpace;
use u_hyperheur::domain::{ProblemDomain, ProblemKind};
use u_hyperheur::search::{AlgorithmCycler, TimeBudget, BEST_SLOT, CANDIDATE_SLOT, SLOT_COUNT};

fn bench_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("sweep");
    group.sample_size(10);

    for kind in ProblemKind::ALL {
        let catalog = AlgorithmSpace::for_domain(kind.heuristic_count(), 1);
        group.bench_with_input(BenchmarkId::from_parameter(kind), &catalog, |b, catalog| {
            b.iter(|| {
                let mut domain = kind.build(1000);
                domain.load_instance(0).unwrap();
                let outcome = AlgorithmCycler::default().run(
                    domain.as_mut(),
                    black_box(catalog),
                    &TimeBudget::unlimited(),
                );
                black_box(outcome)
            })
        });
    }
    group.finish();
}

fn bench_heuristics(c: &mut Criterion) {
    let mut group = c.benchmark_group("heuristic");

    for kind in ProblemKind::ALL {
        let mut domain = kind.build(1000);
        domain.load_instance(0).unwrap();
        domain.set_memory_size(SLOT_COUNT);
        domain.initialise_solution(BEST_SLOT);

        for h in 0..kind.heuristic_count() {
            group.bench_function(format!("{}/{h}", kind.token()), |b| {
                b.iter(|| black_box(domain.apply_heuristic(h, BEST_SLOT, CANDIDATE_SLOT)))
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_sweep, bench_heuristics);
criterion_main!(benches);
