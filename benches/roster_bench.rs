//! Benchmarks for Rollbook roster operations

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use rollbook::config::{Config, Durability};
use rollbook::index::SortedIndex;
use rollbook::seed::{RecordGenerator, StudentGenerator};
use rollbook::{Grade, RosterService, Student};
use tempfile::TempDir;

fn generated(count: usize) -> Vec<Student> {
    StudentGenerator::new(0..=1_000_000, 17).generate(count)
}

fn index_benchmarks(c: &mut Criterion) {
    let students = generated(10_000);
    let index = SortedIndex::from_unsorted(students.clone());
    let probe = students[students.len() / 2].roll_number;

    c.bench_function("index_sort_10k", |b| {
        b.iter_batched(
            || students.clone(),
            |records| SortedIndex::from_unsorted(black_box(records)),
            BatchSize::SmallInput,
        )
    });

    c.bench_function("index_find_10k", |b| {
        b.iter(|| index.find(black_box(probe)))
    });

    c.bench_function("index_insert_10k", |b| {
        b.iter_batched(
            || index.clone(),
            |mut idx| idx.insert(Student::new("New", 1_000_001, Grade::A)),
            BatchSize::SmallInput,
        )
    });
}

fn roster_benchmarks(c: &mut Criterion) {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::builder()
        .data_dir(temp_dir.path())
        .durability(Durability::BufferedOnly)
        .key_range(0, 1_000_000)
        .build();
    let roster = RosterService::open(config).unwrap();
    let mut generator = StudentGenerator::new(0..=1_000_000, 5);
    roster.seed(&mut generator, 1_000).unwrap();
    let probe = roster.list().unwrap()[500].roll_number;

    c.bench_function("roster_search_1k", |b| {
        b.iter(|| roster.search(black_box(probe)).unwrap())
    });

    c.bench_function("roster_update_1k", |b| {
        b.iter(|| roster.update(black_box(probe), Grade::B).unwrap())
    });
}

criterion_group!(benches, index_benchmarks, roster_benchmarks);
criterion_main!(benches);
