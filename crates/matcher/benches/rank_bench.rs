use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use matcher::{rank, MatchResult};

fn results(n: u64) -> Vec<MatchResult> {
    (0..n)
        .map(|i| MatchResult {
            original_id: format!("doc-{}-original.txt", i % 997),
            paraphrase_id: format!("doc-{}-paraphrase.txt", i % 1_009),
            distance: ((i * 7_919) % 10_000) as f64 / 10_000.0,
        })
        .collect()
}

fn bench_rank(c: &mut Criterion) {
    let mut group = c.benchmark_group("rank_top_10");
    for n in [1_000u64, 100_000] {
        let input = results(n);
        for use_parallel in [false, true] {
            group.bench_with_input(
                BenchmarkId::new(format!("parallel_{use_parallel}"), n),
                &input,
                |b, input| b.iter(|| rank(black_box(input.clone()), 10, use_parallel)),
            );
        }
    }
    group.finish();
}

criterion_group!(benches, bench_rank);
criterion_main!(benches);
