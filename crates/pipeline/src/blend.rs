//! Weighted score blending across candidate sources.
//!
//! Every candidate list contributes by position: entry `i` of a list of
//! length `len` earns `(len - i) * weight`. Each surfaced book then adds
//! `rating * popularity`. The blended list is ranked by total, ties by the
//! order in which books first surfaced.

use catalog::{BookId, Catalog, CatalogError, Result};
use rayon::prelude::*;
use sources::{Candidate, RatingProfile, rank_top_n};
use std::collections::HashMap;
use std::sync::Arc;

/// Relative weights of the blended sources
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlendWeights {
    pub content: f64,
    pub neighbors: f64,
    pub popularity: f64,
}

impl Default for BlendWeights {
    fn default() -> Self {
        Self {
            content: 0.5,
            neighbors: 0.3,
            popularity: 0.2,
        }
    }
}

impl BlendWeights {
    pub fn with_content(mut self, weight: f64) -> Self {
        self.content = weight;
        self
    }

    pub fn with_neighbors(mut self, weight: f64) -> Self {
        self.neighbors = weight;
        self
    }

    pub fn with_popularity(mut self, weight: f64) -> Self {
        self.popularity = weight;
        self
    }

    /// Weights must be finite, non-negative and not all zero.
    pub fn validate(&self) -> Result<()> {
        let all = [self.content, self.neighbors, self.popularity];
        if all.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(CatalogError::Configuration(format!(
                "blend weights must be non-negative, got {:?}",
                self
            )));
        }
        if all.iter().all(|w| *w == 0.0) {
            return Err(CatalogError::Configuration(
                "at least one blend weight must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Per-source breakdown of one blended book
#[derive(Debug, Clone, PartialEq)]
pub struct BlendedCandidate {
    pub book_id: BookId,
    pub content_score: f64,
    pub neighbor_score: f64,
    pub popularity_score: f64,
}

impl BlendedCandidate {
    fn new(book_id: BookId) -> Self {
        Self {
            book_id,
            content_score: 0.0,
            neighbor_score: 0.0,
            popularity_score: 0.0,
        }
    }

    pub fn total(&self) -> f64 {
        self.content_score + self.neighbor_score + self.popularity_score
    }
}

/// Combines content and neighbor candidate lists into one ranking.
#[derive(Debug, Clone)]
pub struct WeightedBlender {
    catalog: Arc<Catalog>,
    weights: BlendWeights,
}

impl WeightedBlender {
    pub fn new(catalog: Arc<Catalog>, weights: BlendWeights) -> Result<Self> {
        weights.validate()?;
        Ok(Self { catalog, weights })
    }

    /// Blend both lists, drop rated ids and keep the top `n`.
    pub fn blend(
        &self,
        content: &[Candidate],
        neighbors: &[Candidate],
        profile: &RatingProfile,
        n: usize,
    ) -> Vec<BlendedCandidate> {
        let mut blended: Vec<BlendedCandidate> = Vec::new();
        let mut slots: HashMap<BookId, usize> = HashMap::new();

        let mut accumulate = |list: &[Candidate], weight: f64, is_content: bool| {
            let len = list.len();
            for (i, candidate) in list.iter().enumerate() {
                let slot = *slots.entry(candidate.book_id).or_insert_with(|| {
                    blended.push(BlendedCandidate::new(candidate.book_id));
                    blended.len() - 1
                });
                let score = (len - i) as f64 * weight;
                if is_content {
                    blended[slot].content_score += score;
                } else {
                    blended[slot].neighbor_score += score;
                }
            }
        };
        accumulate(content, self.weights.content, true);
        accumulate(neighbors, self.weights.neighbors, false);

        blended.par_iter_mut().for_each(|entry| {
            if let Some(book) = self.catalog.get(entry.book_id) {
                entry.popularity_score = f64::from(book.rating) * self.weights.popularity;
            }
        });

        rank_top_n(
            blended,
            BlendedCandidate::total,
            |entry| profile.is_rated(entry.book_id) || !self.catalog.contains(entry.book_id),
            n,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::sample_catalog;
    use sources::CandidateSource;

    fn content(ids: &[BookId]) -> Vec<Candidate> {
        ids.iter()
            .map(|&id| Candidate::new(id, CandidateSource::Content, 0.0))
            .collect()
    }

    fn neighbors(ids: &[BookId]) -> Vec<Candidate> {
        ids.iter()
            .map(|&id| Candidate::new(id, CandidateSource::Neighbor, 0.0))
            .collect()
    }

    #[test]
    fn test_default_weights() {
        let weights = BlendWeights::default();
        assert_eq!(weights.content, 0.5);
        assert_eq!(weights.neighbors, 0.3);
        assert_eq!(weights.popularity, 0.2);
        assert!(weights.validate().is_ok());
    }

    #[test]
    fn test_invalid_weights() {
        let negative = BlendWeights::default().with_neighbors(-0.1);
        assert!(matches!(negative.validate(), Err(CatalogError::Configuration(_))));

        let zero = BlendWeights::default()
            .with_content(0.0)
            .with_neighbors(0.0)
            .with_popularity(0.0);
        assert!(matches!(zero.validate(), Err(CatalogError::Configuration(_))));
    }

    #[test]
    fn test_positional_scores_accumulate() {
        let catalog = Arc::new(sample_catalog().unwrap());
        let blender = WeightedBlender::new(catalog, BlendWeights::default()).unwrap();

        // content: 2 -> 2*0.5, 5 -> 1*0.5; neighbors: 5 -> 2*0.3, 7 -> 1*0.3
        let result = blender.blend(
            &content(&[2, 5]),
            &neighbors(&[5, 7]),
            &RatingProfile::default(),
            10,
        );

        let five = result.iter().find(|c| c.book_id == 5).unwrap();
        assert!((five.content_score - 0.5).abs() < 1e-9);
        assert!((five.neighbor_score - 0.6).abs() < 1e-9);
        assert!((five.popularity_score - 4.6 * 0.2).abs() < 1e-6);
        assert_eq!(result[0].book_id, 5);
        assert_eq!(result.len(), 3);
    }

    #[test]
    fn test_rated_ids_excluded() {
        let catalog = Arc::new(sample_catalog().unwrap());
        let blender = WeightedBlender::new(catalog, BlendWeights::default()).unwrap();
        let mut profile = RatingProfile::default();
        profile.rated.insert(2);

        let result = blender.blend(&content(&[2, 5]), &[], &profile, 10);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].book_id, 5);
    }
}
