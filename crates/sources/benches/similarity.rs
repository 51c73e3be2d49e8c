//! Benchmarks for index construction and candidate generation
//!
//! Run with: cargo bench --package sources
//!
//! Uses the built-in 25-book catalog.

use catalog::{Catalog, RatingMap, sample_catalog};
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use sources::{NeighborIndex, PreferenceSource, SimilarityIndex, build_rating_profile};

fn load_test_catalog() -> Catalog {
    sample_catalog().expect("Failed to load sample catalog")
}

fn test_ratings() -> RatingMap {
    [(1, 5.0), (3, 4.0), (6, 5.0)].into_iter().collect()
}

fn bench_build_similarity(c: &mut Criterion) {
    let catalog = load_test_catalog();

    c.bench_function("similarity_index_build", |b| {
        b.iter(|| {
            let index = SimilarityIndex::build(black_box(&catalog)).unwrap();
            black_box(index)
        })
    });
}

fn bench_content_candidates(c: &mut Criterion) {
    let catalog = load_test_catalog();
    let index = SimilarityIndex::build(&catalog).expect("Failed to build similarity index");
    let profile = build_rating_profile(&catalog, &test_ratings());

    c.bench_function("content_get_candidates", |b| {
        b.iter(|| {
            let candidates = index.get_candidates(black_box(&profile), black_box(12));
            black_box(candidates)
        })
    });
}

fn bench_preference_candidates(c: &mut Criterion) {
    let catalog = load_test_catalog();
    let source = PreferenceSource::new();
    let profile = build_rating_profile(&catalog, &test_ratings());

    c.bench_function("preference_get_candidates", |b| {
        b.iter(|| {
            let candidates = source.get_candidates(&catalog, black_box(&profile), black_box(12));
            black_box(candidates)
        })
    });
}

fn bench_neighbors(c: &mut Criterion) {
    let catalog = load_test_catalog();
    let index = NeighborIndex::build(&catalog);

    c.bench_function("neighbor_lookup", |b| {
        b.iter(|| {
            let found = index.neighbors(black_box(17), black_box(5)).unwrap();
            black_box(found)
        })
    });
}

fn bench_build_rating_profile(c: &mut Criterion) {
    let catalog = load_test_catalog();
    let ratings = test_ratings();

    c.bench_function("build_rating_profile", |b| {
        b.iter(|| {
            let profile = build_rating_profile(&catalog, black_box(&ratings));
            black_box(profile)
        })
    });
}

criterion_group!(
    benches,
    bench_build_similarity,
    bench_content_candidates,
    bench_preference_candidates,
    bench_neighbors,
    bench_build_rating_profile
);
criterion_main!(benches);
