use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use polyominoes::{
    filter::{self, History},
    Entries, Enumeration, Generator, Kind, Polyomino, Redelmeier, Request,
};

fn bench_fixed(c: &mut Criterion) {
    let mut group = c.benchmark_group("fixed");

    for n in [6, 8, 10] {
        group.bench_with_input(BenchmarkId::new("incremental", n), &n, |b, &n| {
            b.iter(|| Generator::fixed(black_box(n)).len())
        });
        group.bench_with_input(BenchmarkId::new("redelmeier", n), &n, |b, &n| {
            b.iter(|| Redelmeier::fixed(black_box(n)).len())
        });
    }

    group.finish();
}

fn bench_filters(c: &mut Criterion) {
    let fixed = Generator::fixed(9);
    let free: Vec<Polyomino> = filter::free(&fixed, History::Tracked).collect();

    let mut group = c.benchmark_group("filters");

    group.bench_function("free tracked", |b| {
        b.iter(|| filter::free(black_box(&fixed), History::Tracked).count())
    });
    group.bench_function("free untracked", |b| {
        b.iter(|| filter::free(black_box(&fixed), History::Untracked).count())
    });
    group.bench_function("without holes", |b| {
        b.iter(|| filter::without_holes(black_box(&free)).count())
    });
    group.bench_function("odd sides", |b| {
        b.iter(|| filter::odd_sides(black_box(&free)).filter(Result::is_ok).count())
    });

    group.finish();
}

fn bench_table(c: &mut Criterion) {
    c.bench_function("table to order 8", |b| {
        b.iter(|| {
            let request = Request {
                max_order: Some(8),
                enumeration: Enumeration::Incremental,
                ..Request::new(Kind::ALL)
            };

            Entries::new(&request).map(|entries| entries.count())
        })
    });
}

criterion_group!(benches, bench_fixed, bench_filters, bench_table);
criterion_main!(benches);
