use std::hint::black_box;

use ai_debug_playground::playground::diff::diff_lines;
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

/// Original and revised text of N lines where every fifth line differs
fn generate_pair(num_lines: usize) -> (String, String) {
    let original: Vec<String> = (0..num_lines).map(|i| format!("value_{i} = compute({i})")).collect();
    let revised: Vec<String> = (0..num_lines)
        .map(|i| {
            if i % 5 == 0 {
                format!("value_{i} = compute_fast({i})")
            } else {
                format!("value_{i} = compute({i})")
            }
        })
        .collect();
    (original.join("\n"), revised.join("\n"))
}

fn bench_diff_lines(c: &mut Criterion) {
    let mut group = c.benchmark_group("diff_lines");

    for size in [100, 1_000, 10_000].iter() {
        let (original, revised) = generate_pair(*size);

        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| diff_lines(black_box(&original), black_box(&revised)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_diff_lines);
criterion_main!(benches);
