//! Preference Source - category/level affinity scoring
//!
//! Scores every unrated book against what the user's liked books have in
//! common:
//! - `50 / (rank + 1)` for the book's category rank among liked categories
//! - `20` when the level is one of the liked levels
//! - `rating * 10`
//! - `5` for books published in 2020 or later
//!
//! A user with no liked books gets no preference candidates.

use crate::ranking::rank_top_n;
use crate::types::{Candidate, CandidateSource};
use crate::user_context::RatingProfile;
use catalog::{Book, Catalog, Level};
use rayon::prelude::*;
use tracing::{debug, instrument};

pub const CATEGORY_WEIGHT: f64 = 50.0;
pub const LEVEL_BONUS: f64 = 20.0;
pub const RATING_WEIGHT: f64 = 10.0;
pub const RECENCY_BONUS: f64 = 5.0;
pub const RECENT_YEAR: u16 = 2020;

/// Preference score of one book.
pub fn score(book: &Book, liked_categories: &[String], liked_levels: &[Level]) -> f64 {
    let category = liked_categories
        .iter()
        .position(|c| *c == book.category)
        .map_or(0.0, |rank| CATEGORY_WEIGHT / (rank as f64 + 1.0));

    let level = if liked_levels.contains(&book.level) {
        LEVEL_BONUS
    } else {
        0.0
    };

    let recency = if book.year >= RECENT_YEAR {
        RECENCY_BONUS
    } else {
        0.0
    };

    category + level + f64::from(book.rating) * RATING_WEIGHT + recency
}

/// Stateless scorer over a catalog
#[derive(Debug, Clone, Copy, Default)]
pub struct PreferenceSource;

impl PreferenceSource {
    pub fn new() -> Self {
        Self
    }

    #[instrument(skip(self, catalog, profile), fields(liked = profile.liked.len()))]
    pub fn get_candidates(
        &self,
        catalog: &Catalog,
        profile: &RatingProfile,
        limit: usize,
    ) -> Vec<Candidate> {
        if !profile.has_likes() {
            debug!("No liked books, skipping preference scoring");
            return Vec::new();
        }

        // par_iter over a slice keeps catalog order in the collected Vec
        let scored: Vec<Candidate> = catalog
            .all()
            .par_iter()
            .filter(|book| !profile.is_rated(book.id))
            .map(|book| {
                Candidate::new(
                    book.id,
                    CandidateSource::Preference,
                    score(book, &profile.liked_categories, &profile.liked_levels),
                )
            })
            .collect();

        let candidates = rank_top_n(scored, |c| c.score, |_| false, limit);
        debug!("Generated {} preference candidates", candidates.len());
        candidates
    }
}
