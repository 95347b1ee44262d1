//! Benchmarks for the location matcher.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use petadopt_search::{is_fuzzy_match, levenshtein_distance, match_all, MatchConfig};

const CITIES: &[&str] = &[
    "Springfield", "Mumbai", "New Delhi", "Bengaluru", "Chennai", "Kolkata", "Hyderabad",
    "Pune", "Ahmedabad", "Jaipur", "Lucknow", "Kochi", "Shimla", "Goa", "Nagpur",
];

fn create_locations(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| format!("{} {}", CITIES[i % CITIES.len()], i % 97))
        .collect()
}

fn bench_single_match(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_match");

    group.bench_function("substring", |b| {
        b.iter(|| is_fuzzy_match(black_box("Springfield, IL"), black_box("springfield")))
    });

    group.bench_function("typo", |b| {
        b.iter(|| is_fuzzy_match(black_box("Springfield"), black_box("Sprngfeld")))
    });

    group.bench_function("length_gap_reject", |b| {
        b.iter(|| is_fuzzy_match(black_box("Goa"), black_box("Thiruvananthapuram")))
    });

    group.finish();
}

fn bench_distance(c: &mut Criterion) {
    c.bench_function("levenshtein_20", |b| {
        b.iter(|| {
            levenshtein_distance(
                black_box("thiruvananthapuram12"),
                black_box("tiruvanantapuram1234"),
            )
        })
    });
}

fn bench_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("match_all");
    let config = MatchConfig::default();

    for size in [10, 100, 1000, 10000].iter() {
        let locations = create_locations(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| match_all(black_box(&config), black_box("bengaluru"), black_box(&locations)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_single_match, bench_distance, bench_batch);
criterion_main!(benches);
