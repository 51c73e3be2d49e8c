//! Neighbor Source - nearest books in a small numeric feature space
//!
//! Each book becomes `[category_code, level_code, rating, year_normalized]`:
//! - category and level codes are assigned in first-seen catalog order
//! - `year_normalized = (year - min) / (max - min)`, or 0 when every book
//!   shares one year
//!
//! Distance is Euclidean. Equal distances keep catalog order.

use crate::ranking::rank_top_n;
use crate::types::{Candidate, CandidateSource};
use crate::user_context::RatingProfile;
use catalog::{BookId, Catalog, CatalogError, Level, Result};
use rayon::prelude::*;
use std::collections::HashMap;
use tracing::{debug, info, instrument};

/// Number of liked books used as neighbor seeds
pub const DEFAULT_SEEDS: usize = 3;

pub type FeatureVector = [f64; 4];

#[derive(Debug, Clone)]
pub struct NeighborIndex {
    ids: Vec<BookId>,
    positions: HashMap<BookId, usize>,
    features: Vec<FeatureVector>,
}

impl NeighborIndex {
    #[instrument(skip(catalog), fields(books = catalog.len()))]
    pub fn build(catalog: &Catalog) -> Self {
        let books = catalog.all();

        let mut category_codes: HashMap<&str, usize> = HashMap::new();
        let mut level_codes: HashMap<Level, usize> = HashMap::new();
        for book in books {
            let next = category_codes.len();
            category_codes.entry(book.category.as_str()).or_insert(next);
            let next = level_codes.len();
            level_codes.entry(book.level).or_insert(next);
        }

        let min_year = books.iter().map(|b| b.year).min().unwrap_or(0);
        let max_year = books.iter().map(|b| b.year).max().unwrap_or(0);
        let span = f64::from(max_year - min_year);

        let features: Vec<FeatureVector> = books
            .iter()
            .map(|book| {
                let year_normalized = if span > 0.0 {
                    f64::from(book.year - min_year) / span
                } else {
                    0.0
                };
                [
                    category_codes[book.category.as_str()] as f64,
                    level_codes[&book.level] as f64,
                    f64::from(book.rating),
                    year_normalized,
                ]
            })
            .collect();

        let ids: Vec<BookId> = books.iter().map(|b| b.id).collect();
        let positions = ids.iter().enumerate().map(|(pos, &id)| (id, pos)).collect();

        info!(
            "Built neighbor index: {} books, {} categories, {} levels",
            ids.len(),
            category_codes.len(),
            level_codes.len()
        );

        Self {
            ids,
            positions,
            features,
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn features(&self, id: BookId) -> Option<&FeatureVector> {
        self.positions.get(&id).map(|&pos| &self.features[pos])
    }

    /// The `n` books closest to `id`, nearest first, never `id` itself.
    pub fn neighbors(&self, id: BookId, n: usize) -> Result<Vec<BookId>> {
        let &query_pos = self
            .positions
            .get(&id)
            .ok_or(CatalogError::NotFound { id })?;
        let query = &self.features[query_pos];

        let distances: Vec<(usize, f64)> = self
            .features
            .par_iter()
            .enumerate()
            .map(|(pos, features)| (pos, euclidean(query, features)))
            .collect();

        let nearest = rank_top_n(distances, |(_, d)| -d, |(pos, _)| *pos == query_pos, n);
        Ok(nearest.into_iter().map(|(pos, _)| self.ids[pos]).collect())
    }

    /// Neighbors of the first `seeds` liked books, `per_seed` each,
    /// concatenated in seed order.
    ///
    /// Scores count down from the length of the combined list, so earlier
    /// entries weigh more. A book can appear once per seed.
    #[instrument(skip(self, profile), fields(liked = profile.liked.len()))]
    pub fn get_candidates(
        &self,
        profile: &RatingProfile,
        per_seed: usize,
        seeds: usize,
    ) -> Vec<Candidate> {
        let found: Vec<BookId> = profile
            .liked
            .iter()
            .take(seeds)
            .filter_map(|&id| self.neighbors(id, per_seed).ok())
            .flatten()
            .collect();

        let total = found.len();
        let candidates: Vec<Candidate> = found
            .into_iter()
            .enumerate()
            .map(|(i, id)| Candidate::new(id, CandidateSource::Neighbor, (total - i) as f64))
            .collect();

        debug!("Generated {} neighbor candidates", candidates.len());
        candidates
    }
}

fn euclidean(a: &FeatureVector, b: &FeatureVector) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}
