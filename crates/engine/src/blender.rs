//! # Recommendation Blender
//!
//! Turns a rating map into a ranked list of books:
//! 1. Build the rating profile (rated set, liked books, liked categories/levels)
//! 2. Pick the strategy
//! 3. Gather candidates (hybrid runs content and preference in parallel)
//! 4. Merge through the filter pipeline
//! 5. Rank, truncate and resolve ids to books
//!
//! No strategy ever returns a book whose id is a key of the rating map.

use crate::context::EngineContext;
use crate::strategy::Strategy;
use catalog::{Book, BookId, CatalogError, RatingMap, Result};
use sources::neighbors::DEFAULT_SEEDS;
use sources::{
    Candidate, PreferenceSource, RatingProfile, build_rating_profile, popular, rank_top_n,
};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, instrument};

/// Entry point for every recommendation operation
#[derive(Debug, Clone)]
pub struct Blender {
    context: Arc<EngineContext>,
    preference: PreferenceSource,
}

impl Blender {
    pub fn new(context: Arc<EngineContext>) -> Self {
        Self {
            context,
            preference: PreferenceSource::new(),
        }
    }

    pub fn context(&self) -> &EngineContext {
        &self.context
    }

    /// Result count used when a caller does not pick one
    pub fn default_count(&self) -> usize {
        self.context.config.default_count
    }

    /// Dispatch to one of the strategies.
    #[instrument(skip(self, ratings), fields(ratings = ratings.len()))]
    pub fn recommend(
        &self,
        strategy: Strategy,
        ratings: &RatingMap,
        n: usize,
    ) -> Result<Vec<Book>> {
        let start = Instant::now();
        let books = match strategy {
            Strategy::Content => self.content_based(ratings, n),
            Strategy::Collaborative => self.preference_based(ratings, n),
            Strategy::Hybrid => self.hybrid(ratings, n),
        }?;
        info!(
            "{} strategy returned {} books in {:.2?}",
            strategy,
            books.len(),
            start.elapsed()
        );
        Ok(books)
    }

    /// Books most similar to the liked ones. Nothing liked, nothing returned.
    pub fn content_based(&self, ratings: &RatingMap, n: usize) -> Result<Vec<Book>> {
        check_count(n)?;
        let profile = build_rating_profile(&self.context.catalog, ratings);
        let candidates = self.context.similarity.get_candidates(&profile, n);
        Ok(self.resolve(candidates.iter().map(|c| c.book_id)))
    }

    /// Books scored against the liked categories and levels.
    pub fn preference_based(&self, ratings: &RatingMap, n: usize) -> Result<Vec<Book>> {
        check_count(n)?;
        let profile = build_rating_profile(&self.context.catalog, ratings);
        let candidates = self
            .preference
            .get_candidates(&self.context.catalog, &profile, n);
        Ok(self.resolve(candidates.iter().map(|c| c.book_id)))
    }

    /// Highest-rated books, ties in catalog order.
    pub fn popular(&self, n: usize) -> Result<Vec<Book>> {
        check_count(n)?;
        Ok(self.resolve(popular(&self.context.catalog, &HashSet::new(), n)))
    }

    /// Content and preference merged, or popular books when there are no
    /// ratings at all. Ratings without a liked book yield nothing, except
    /// under the weighted blend which falls back to unrated popular books.
    pub fn hybrid(&self, ratings: &RatingMap, n: usize) -> Result<Vec<Book>> {
        check_count(n)?;
        if ratings.is_empty() {
            debug!("No ratings, falling back to popular books");
            return self.popular(n);
        }

        let profile = build_rating_profile(&self.context.catalog, ratings);
        let ids = match &self.context.weighted {
            Some(_) if !profile.has_likes() => {
                debug!("No liked books, falling back to unrated popular books");
                popular(&self.context.catalog, &profile.rated, n)
            }
            Some(_) => self.weighted_blend(&profile, n)?,
            None => self.rating_sort_blend(&profile, n)?,
        };
        Ok(self.resolve(ids))
    }

    /// The "similar to this book" lookup.
    pub fn similar_books(&self, id: BookId, n: usize) -> Result<Vec<Book>> {
        check_count(n)?;
        self.context.catalog.index_of(id)?;
        let similar = self.context.similarity.similar_to(&[id], &HashSet::new(), n);
        Ok(self.resolve(similar.into_iter().map(|(id, _)| id)))
    }

    /// Nearest books in the numeric feature space.
    pub fn neighbors(&self, id: BookId, n: usize) -> Result<Vec<Book>> {
        check_count(n)?;
        let ids = self.context.neighbors.neighbors(id, n)?;
        Ok(self.resolve(ids))
    }

    /// Merge `2n` content and `2n` preference candidates, keep one per id
    /// and rank by the book's own rating.
    fn rating_sort_blend(&self, profile: &RatingProfile, n: usize) -> Result<Vec<BookId>> {
        let pool = n.saturating_mul(2);
        let (content, preferred) = rayon::join(
            || self.context.similarity.get_candidates(profile, pool),
            || {
                self.preference
                    .get_candidates(&self.context.catalog, profile, pool)
            },
        );
        debug!(
            "Hybrid candidates: content={}, preference={}",
            content.len(),
            preferred.len()
        );

        let mut merged: Vec<Candidate> = content;
        merged.extend(preferred);
        let merged = self.context.pipeline.apply(merged, profile)?;

        let catalog = &self.context.catalog;
        let ranked = rank_top_n(
            merged,
            |c| catalog.get(c.book_id).map_or(0.0, |b| f64::from(b.rating)),
            |_| false,
            n,
        );
        Ok(ranked.into_iter().map(|c| c.book_id).collect())
    }

    fn weighted_blend(&self, profile: &RatingProfile, n: usize) -> Result<Vec<BookId>> {
        let blender = self.context.weighted.as_ref().ok_or_else(|| {
            CatalogError::Configuration("weighted blend is not configured".to_string())
        })?;

        let pool = n.saturating_mul(2);
        let (content, nearby) = rayon::join(
            || self.context.similarity.get_candidates(profile, pool),
            || self.context.neighbors.get_candidates(profile, n, DEFAULT_SEEDS),
        );

        let blended = blender.blend(&content, &nearby, profile, n);
        Ok(blended.into_iter().map(|b| b.book_id).collect())
    }

    fn resolve<I>(&self, ids: I) -> Vec<Book>
    where
        I: IntoIterator<Item = BookId>,
    {
        ids.into_iter()
            .filter_map(|id| self.context.catalog.get(id).cloned())
            .collect()
    }
}

fn check_count(n: usize) -> Result<()> {
    if n == 0 {
        return Err(CatalogError::Configuration(
            "recommendation count must be positive".to_string(),
        ));
    }
    Ok(())
}
