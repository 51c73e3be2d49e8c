//! Filter to drop candidates whose id is not in the catalog.

use crate::traits::Filter;
use catalog::{Catalog, Result};
use sources::{Candidate, RatingProfile};
use std::sync::Arc;

pub struct UnknownBookFilter {
    catalog: Arc<Catalog>,
}

impl UnknownBookFilter {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }
}

impl Filter for UnknownBookFilter {
    fn name(&self) -> &str {
        "UnknownBookFilter"
    }

    fn apply(
        &self,
        candidates: Vec<Candidate>,
        _profile: &RatingProfile,
    ) -> Result<Vec<Candidate>> {
        let filtered: Vec<Candidate> = candidates
            .into_iter()
            .filter(|candidate| self.catalog.contains(candidate.book_id))
            .collect();
        Ok(filtered)
    }
}
