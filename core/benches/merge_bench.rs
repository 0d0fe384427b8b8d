use boolidx_core::{intersect, union, DocId};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn stepped(len: u32, step: u32) -> Vec<DocId> {
    (0..len).map(|i| i * step).collect()
}

fn bench_merges(c: &mut Criterion) {
    let a = stepped(100_000, 3);
    let b = stepped(100_000, 7);
    c.bench_function("intersect_100k", |bch| bch.iter(|| intersect(black_box(&a), black_box(&b))));
    c.bench_function("union_100k", |bch| bch.iter(|| union(black_box(&a), black_box(&b))));
}

criterion_group!(benches, bench_merges);
criterion_main!(benches);
