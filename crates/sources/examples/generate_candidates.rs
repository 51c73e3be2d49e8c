//! Example: Generate candidates for a set of ratings
//!
//! Run with: cargo run --package sources --example generate_candidates
//!
//! This example shows how to:
//! 1. Load the built-in catalog
//! 2. Build the rating profile
//! 3. Generate content, preference and neighbor candidates
//! 4. Display the results

use catalog::{Catalog, RatingMap, sample_catalog};
use sources::neighbors::DEFAULT_SEEDS;
use sources::{
    Candidate, NeighborIndex, PopularitySource, PreferenceSource, SimilarityIndex,
    build_rating_profile,
};
use std::time::Instant;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt().with_env_filter("info").init();

    println!("=== BookRecs Candidate Generation Example ===\n");

    let start = Instant::now();
    let catalog = sample_catalog()?;
    println!("Loaded {} books in {:?}\n", catalog.len(), start.elapsed());

    let ratings: RatingMap = [(1, 5.0), (3, 4.0), (6, 5.0)].into_iter().collect();
    let profile = build_rating_profile(&catalog, &ratings);
    println!("Rated books: {}", profile.rated.len());
    println!("  Liked: {:?}", profile.liked);
    println!("  Liked categories: {:?}", profile.liked_categories);
    println!("  Liked levels: {:?}\n", profile.liked_levels);

    let start = Instant::now();
    let similarity = SimilarityIndex::build(&catalog)?;
    let neighbors = NeighborIndex::build(&catalog);
    println!(
        "Built indexes in {:?} ({} terms)\n",
        start.elapsed(),
        similarity.vocabulary_size()
    );

    let start = Instant::now();
    let content = similarity.get_candidates(&profile, 10);
    show(&catalog, "Content", &content, start);

    let start = Instant::now();
    let preferred = PreferenceSource::new().get_candidates(&catalog, &profile, 10);
    show(&catalog, "Preference", &preferred, start);

    let start = Instant::now();
    let nearby = neighbors.get_candidates(&profile, 5, DEFAULT_SEEDS);
    show(&catalog, "Neighbor", &nearby, start);

    let start = Instant::now();
    let popular = PopularitySource::new().get_candidates(&catalog, &profile.rated, 10);
    show(&catalog, "Popularity", &popular, start);

    Ok(())
}

fn show(catalog: &Catalog, label: &str, candidates: &[Candidate], start: Instant) {
    println!(
        "Generated {} {} candidates in {:?}",
        candidates.len(),
        label,
        start.elapsed()
    );
    for (i, candidate) in candidates.iter().take(5).enumerate() {
        if let Some(book) = catalog.get(candidate.book_id) {
            println!("  {}. {} (Score: {:.3})", i + 1, book.title, candidate.score);
        }
    }
    println!();
}
