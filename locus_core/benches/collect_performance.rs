//! File Collection Benchmarks
//!
//! Measures the recursive walk and deduplication on generated trees, plus
//! the pure helpers that run once per collected file.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use locus_core::{FileCollector, find_all, flatten, prettify_path, split_path_root_file_ext};
use std::fs;
use std::hint::black_box;
use std::path::Path;
use tempfile::TempDir;

/// Create `width` directories of `width` files each, half of them matching
fn generate_tree(root: &Path, width: usize) {
    for dir in 0..width {
        let dir_path = root.join(format!("pkg_{dir}"));
        fs::create_dir_all(&dir_path).unwrap();
        for file in 0..width {
            let extension = if file % 2 == 0 { "py" } else { "txt" };
            fs::write(dir_path.join(format!("mod_{file}.{extension}")), b"").unwrap();
        }
    }
}

/// Benchmark collection on trees of increasing size
fn bench_find_all(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_all");

    for &width in &[4, 16, 32] {
        let dir = TempDir::new().unwrap();
        generate_tree(dir.path(), width);

        group.bench_with_input(
            BenchmarkId::new("tree", width * width),
            &dir,
            |b, dir| {
                b.iter(|| {
                    let files = find_all(&[dir.path()], "*.py").unwrap();
                    black_box(files);
                });
            },
        );
    }

    group.finish();
}

/// Benchmark the deduplication cost of overlapping roots
fn bench_overlapping_roots(c: &mut Criterion) {
    let mut group = c.benchmark_group("overlapping_roots");
    let dir = TempDir::new().unwrap();
    generate_tree(dir.path(), 16);
    let collector = FileCollector::new("*.py").unwrap();

    for &copies in &[1, 2, 4] {
        let roots = vec![dir.path(); copies];
        group.bench_with_input(BenchmarkId::new("copies", copies), &roots, |b, roots| {
            b.iter(|| black_box(collector.collect(roots).unwrap()));
        });
    }

    group.finish();
}

/// Benchmark per-path helpers
fn bench_path_helpers(c: &mut Criterion) {
    let path = "/home/user/project/src/package/module.py";

    c.bench_function("split_path_root_file_ext", |b| {
        b.iter(|| black_box(split_path_root_file_ext(black_box(path))));
    });

    c.bench_function("prettify_path", |b| {
        b.iter(|| black_box(prettify_path(black_box(path), Some("/home/user/project")).unwrap()));
    });

    c.bench_function("flatten_binary_tree", |b| {
        b.iter(|| {
            let count = flatten(1u32, |node| {
                if *node < 1024 {
                    vec![node * 2, node * 2 + 1]
                } else {
                    Vec::new()
                }
            })
            .count();
            black_box(count)
        });
    });
}

criterion_group!(
    benches,
    bench_find_all,
    bench_overlapping_roots,
    bench_path_helpers
);
criterion_main!(benches);
