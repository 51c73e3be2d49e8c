//! Popularity Source - highest-rated books overall
//!
//! Used on its own for cold-start users and as the fallback when a user has
//! rated books but liked none of them.

use crate::ranking::rank_top_n;
use crate::types::{Candidate, CandidateSource};
use catalog::{BookId, Catalog};
use std::collections::HashSet;
use tracing::{debug, instrument};

/// Top `n` books by rating, ties by catalog order, skipping `exclude`.
pub fn popular(catalog: &Catalog, exclude: &HashSet<BookId>, n: usize) -> Vec<BookId> {
    let ids: Vec<(BookId, f32)> = catalog.all().iter().map(|b| (b.id, b.rating)).collect();
    rank_top_n(ids, |(_, rating)| f64::from(*rating), |(id, _)| exclude.contains(id), n)
        .into_iter()
        .map(|(id, _)| id)
        .collect()
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PopularitySource;

impl PopularitySource {
    pub fn new() -> Self {
        Self
    }

    #[instrument(skip(self, catalog, exclude), fields(excluded = exclude.len()))]
    pub fn get_candidates(
        &self,
        catalog: &Catalog,
        exclude: &HashSet<BookId>,
        limit: usize,
    ) -> Vec<Candidate> {
        let candidates: Vec<Candidate> = popular(catalog, exclude, limit)
            .into_iter()
            .filter_map(|id| catalog.get(id))
            .map(|book| {
                Candidate::new(book.id, CandidateSource::Popularity, f64::from(book.rating))
            })
            .collect();

        debug!("Generated {} popularity candidates", candidates.len());
        candidates
    }
}
