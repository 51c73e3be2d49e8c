//! Filter to merge candidate lists by book id.
//!
//! When several sources propose the same book, only the first occurrence
//! survives, so concatenating `[content, preference]` and running this
//! filter keeps one record per id in first-surfaced order.

use crate::traits::Filter;
use catalog::Result;
use sources::{Candidate, RatingProfile};
use std::collections::HashSet;

pub struct DuplicateFilter;

impl Filter for DuplicateFilter {
    fn name(&self) -> &str {
        "DuplicateFilter"
    }

    fn apply(
        &self,
        candidates: Vec<Candidate>,
        _profile: &RatingProfile,
    ) -> Result<Vec<Candidate>> {
        let mut seen = HashSet::with_capacity(candidates.len());
        let filtered: Vec<Candidate> = candidates
            .into_iter()
            .filter(|candidate| seen.insert(candidate.book_id))
            .collect();
        Ok(filtered)
    }
}
