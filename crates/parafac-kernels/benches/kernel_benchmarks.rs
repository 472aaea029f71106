//! Performance benchmarks for parafac-kernels
//!
//! Run with: cargo bench -p parafac-kernels
//!
//! Benchmarks cover:
//! - Khatri-Rao product (pairwise & folded)
//! - Hadamard product (allocating & in-place)
//! - Gram matrix and pseudo-inverse
//! - Outer products

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use parafac_kernels::*;
use scirs2_core::ndarray_ext::{Array1, Array2};

fn bench_khatri_rao(c: &mut Criterion) {
    let mut group = c.benchmark_group("khatri_rao");

    for &size in [10, 50, 100, 200].iter() {
        let rank = 32;
        let a = Array2::<f64>::from_shape_fn((size, rank), |(i, j)| (i + j) as f64);
        let b = Array2::<f64>::from_shape_fn((size, rank), |(i, j)| (i * j + 1) as f64);

        group.throughput(Throughput::Elements((size * size * rank) as u64));

        group.bench_with_input(
            BenchmarkId::new("pairwise", format!("{}x{}", size, rank)),
            &size,
            |bencher, _| {
                bencher.iter(|| black_box(khatri_rao(&a.view(), &b.view())));
            },
        );
    }

    for &size in [10, 20, 40].iter() {
        let rank = 16;
        let factors: Vec<Array2<f64>> = (0..3)
            .map(|k| Array2::from_shape_fn((size, rank), |(i, j)| (i + j + k) as f64 * 0.1))
            .collect();

        group.bench_with_input(
            BenchmarkId::new("fold_3", format!("{}x{}", size, rank)),
            &size,
            |bencher, _| {
                bencher.iter(|| black_box(khatri_rao_fold(factors.iter().map(|f| f.view()))));
            },
        );
    }

    group.finish();
}

fn bench_hadamard(c: &mut Criterion) {
    let mut group = c.benchmark_group("hadamard");

    for &size in [16, 64, 256].iter() {
        let a = Array2::<f64>::from_shape_fn((size, size), |(i, j)| (i + j) as f64);
        let b = Array2::<f64>::from_shape_fn((size, size), |(i, j)| (i * j + 1) as f64);

        group.throughput(Throughput::Elements((size * size) as u64));

        group.bench_with_input(BenchmarkId::new("allocating", size), &size, |bencher, _| {
            bencher.iter(|| black_box(hadamard(&a.view(), &b.view())));
        });

        group.bench_with_input(BenchmarkId::new("inplace", size), &size, |bencher, _| {
            let mut acc = a.clone();
            bencher.iter(|| black_box(hadamard_inplace(&mut acc.view_mut(), &b.view())));
        });
    }

    group.finish();
}

fn bench_pinv(c: &mut Criterion) {
    let mut group = c.benchmark_group("pinv");

    for &rank in [4, 16, 64].iter() {
        let factor = Array2::<f64>::from_shape_fn((4 * rank, rank), |(i, j)| {
            ((i * 7 + j * 3) % 11) as f64 + if i == j { 5.0 } else { 0.0 }
        });
        let v = gram(&factor.view());

        group.bench_with_input(BenchmarkId::new("gram", rank), &rank, |bencher, _| {
            bencher.iter(|| black_box(gram(&factor.view())));
        });

        group.bench_with_input(BenchmarkId::new("pinv", rank), &rank, |bencher, _| {
            bencher.iter(|| black_box(pinv(&v.view(), DEFAULT_PINV_RCOND)));
        });
    }

    group.finish();
}

fn bench_outer_product(c: &mut Criterion) {
    let mut group = c.benchmark_group("outer_product");

    for &size in [8, 16, 32].iter() {
        let vectors: Vec<Array1<f64>> = (0..3)
            .map(|k| Array1::from_shape_fn(size, |i| (i + k) as f64 * 0.5))
            .collect();
        let views: Vec<_> = vectors.iter().map(|v| v.view()).collect();

        group.throughput(Throughput::Elements((size * size * size) as u64));

        group.bench_with_input(BenchmarkId::new("3way", size), &size, |bencher, _| {
            bencher.iter(|| black_box(weighted_outer_product(&views, 1.5)));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_khatri_rao,
    bench_hadamard,
    bench_pinv,
    bench_outer_product
);
criterion_main!(benches);
