//! Criterion benchmarks for the ring-road engine.
//! Focus sizes: (m, n) in {(5, 4), (50, 20), (200, 50), (1000, 100)}.
//! Results: by default under target/criterion.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use ringroad::rand::{draw_instance, Count, InstanceCfg, ReplayToken};
use ringroad::{Aggregation, RingCfg};

fn cfg_for(m: usize, n: usize) -> InstanceCfg {
    InstanceCfg {
        callers: Count::Fixed(m),
        centers: Count::Fixed(n),
        integer_valued: false,
        ..InstanceCfg::default()
    }
}

fn bench_solve(c: &mut Criterion) {
    let mut group = c.benchmark_group("ringroad");
    for &(m, n) in &[(5usize, 4usize), (50, 20), (200, 50), (1000, 100)] {
        let label = format!("{m}x{n}");
        group.bench_with_input(BenchmarkId::new("minimum_threshold", &label), &(m, n), |b, &(m, n)| {
            let inst = draw_instance(cfg_for(m, n), ReplayToken { seed: 43, index: 0 });
            b.iter(|| inst.minimum_threshold())
        });

        for aggregation in [Aggregation::Mean, Aggregation::Intersection] {
            let id = BenchmarkId::new(format!("solve_{aggregation:?}").to_lowercase(), &label);
            group.bench_with_input(id, &(m, n), |b, &(m, n)| {
                b.iter_batched(
                    || draw_instance(cfg_for(m, n), ReplayToken { seed: 44, index: 0 }),
                    |inst| {
                        let alpha = inst.minimum_threshold() + 1.5;
                        let _sol = inst
                            .solve_with(Some(alpha), aggregation, RingCfg::default())
                            .unwrap();
                    },
                    BatchSize::SmallInput,
                )
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_solve);
criterion_main!(benches);
