use criterion::{black_box, criterion_group, criterion_main, Criterion};
use relset::SetRelation;
use std::collections::HashSet;

fn populated(keys: u32) -> SetRelation<u32, u32> {
    let mut rel = SetRelation::new();
    for key in 0..keys {
        rel.insert(key, HashSet::from([key % 17, key % 31, key % 127]));
    }
    rel
}

fn bench_insert(c: &mut Criterion) {
    c.bench_function("insert_1k_keys", |b| {
        b.iter(|| populated(black_box(1_000)))
    });
}

fn bench_reassign(c: &mut Criterion) {
    c.bench_function("reassign_1k_keys", |b| {
        let rel = populated(1_000);
        b.iter(|| {
            let mut rel = rel.clone();
            for key in 0..1_000u32 {
                rel.insert(key, HashSet::from([key % 19, key % 29]));
            }
            rel
        })
    });
}

fn bench_reverse_lookup(c: &mut Criterion) {
    c.bench_function("reverse_lookup", |b| {
        let rel = populated(10_000);
        b.iter(|| {
            let mut hits = 0usize;
            for item in 0..127u32 {
                if rel.contains_item(black_box(&item)) {
                    hits += 1;
                }
            }
            hits
        })
    });
}

criterion_group!(benches, bench_insert, bench_reassign, bench_reverse_lookup);
criterion_main!(benches);
