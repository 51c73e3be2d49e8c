//! Content Similarity Index
//!
//! Pairwise cosine similarity between the TF-IDF vectors of every book's
//! content text ("title category level author").
//!
//! ## Layout
//! Rows and columns follow catalog positions. The matrix is computed once
//! per catalog: the upper triangle in parallel, then mirrored, so
//! `matrix[i][j] == matrix[j][i]` holds exactly. The diagonal is 1.

use crate::ranking::rank_top_n;
use crate::tfidf::{SimilarityConfig, TfIdfModel, sparse_dot};
use crate::types::{Candidate, CandidateSource};
use crate::user_context::RatingProfile;
use catalog::{BookId, Catalog, CatalogError, Result};
use rayon::prelude::*;
use std::collections::{HashMap, HashSet};
use tracing::{debug, info, instrument};

/// Dense cosine-similarity matrix over a catalog.
#[derive(Debug, Clone)]
pub struct SimilarityIndex {
    /// Book id at each matrix row
    ids: Vec<BookId>,
    positions: HashMap<BookId, usize>,
    matrix: Vec<Vec<f64>>,
    vocabulary_size: usize,
}

impl SimilarityIndex {
    /// Build with the default configuration (unbounded vocabulary).
    pub fn build(catalog: &Catalog) -> Result<Self> {
        Self::build_with(catalog, &SimilarityConfig::default())
    }

    #[instrument(skip(catalog, config), fields(books = catalog.len()))]
    pub fn build_with(catalog: &Catalog, config: &SimilarityConfig) -> Result<Self> {
        let documents: Vec<String> = catalog.all().iter().map(|b| b.content_text()).collect();
        let (model, vectors) = TfIdfModel::fit_transform(&documents, config)?;

        let size = vectors.len();
        let upper: Vec<Vec<f64>> = (0..size)
            .into_par_iter()
            .map(|i| {
                (i + 1..size)
                    .map(|j| sparse_dot(&vectors[i], &vectors[j]).clamp(0.0, 1.0))
                    .collect()
            })
            .collect();

        let mut matrix = vec![vec![0.0; size]; size];
        for (i, row) in upper.into_iter().enumerate() {
            matrix[i][i] = 1.0;
            for (offset, value) in row.into_iter().enumerate() {
                let j = i + 1 + offset;
                matrix[i][j] = value;
                matrix[j][i] = value;
            }
        }

        let ids: Vec<BookId> = catalog.all().iter().map(|b| b.id).collect();
        let positions = ids.iter().enumerate().map(|(pos, &id)| (id, pos)).collect();

        info!(
            "Built similarity index: {} books, {} terms",
            size,
            model.vocabulary_size()
        );

        Ok(Self {
            ids,
            positions,
            matrix,
            vocabulary_size: model.vocabulary_size(),
        })
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary_size
    }

    /// Similarity row for one book, indexed by catalog position.
    pub fn row(&self, id: BookId) -> Option<&[f64]> {
        self.positions.get(&id).map(|&pos| self.matrix[pos].as_slice())
    }

    pub fn similarity(&self, a: BookId, b: BookId) -> Result<f64> {
        let row = self.row(a).ok_or(CatalogError::NotFound { id: a })?;
        let &column = self.positions.get(&b).ok_or(CatalogError::NotFound { id: b })?;
        Ok(row[column])
    }

    /// Books most similar to the average of `ids`' rows.
    ///
    /// Unknown ids are ignored. Input ids and `exclude` never appear in the
    /// output. Equal scores keep catalog order.
    pub fn similar_to(
        &self,
        ids: &[BookId],
        exclude: &HashSet<BookId>,
        n: usize,
    ) -> Vec<(BookId, f64)> {
        let rows: Vec<&[f64]> = ids.iter().filter_map(|&id| self.row(id)).collect();
        if rows.is_empty() || n == 0 {
            return Vec::new();
        }

        let weight = 1.0 / rows.len() as f64;
        let scored: Vec<(BookId, f64)> = self
            .ids
            .iter()
            .enumerate()
            .map(|(pos, &id)| (id, rows.iter().map(|row| row[pos]).sum::<f64>() * weight))
            .collect();

        rank_top_n(
            scored,
            |(_, score)| *score,
            |(id, _)| exclude.contains(id) || ids.contains(id),
            n,
        )
    }

    /// Content candidates for a profile: similar to the liked books,
    /// never a rated one.
    #[instrument(skip(self, profile), fields(liked = profile.liked.len()))]
    pub fn get_candidates(&self, profile: &RatingProfile, limit: usize) -> Vec<Candidate> {
        let candidates: Vec<Candidate> = self
            .similar_to(&profile.liked, &profile.rated, limit)
            .into_iter()
            .map(|(id, score)| Candidate::new(id, CandidateSource::Content, score))
            .collect();

        debug!("Generated {} content candidates", candidates.len());
        candidates
    }
}
