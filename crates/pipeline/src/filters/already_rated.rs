//! Filter to remove books the user has already rated.
//!
//! Rated means any key of the request's rating map, liked or not. No
//! strategy may ever return one of them.

use crate::traits::Filter;
use catalog::Result;
use sources::{Candidate, RatingProfile};

/// Removes candidates that the user has already rated.
///
/// Uses the HashSet in RatingProfile.rated for O(1) lookups.
pub struct AlreadyRatedFilter;

impl Filter for AlreadyRatedFilter {
    fn name(&self) -> &str {
        "AlreadyRatedFilter"
    }

    fn apply(&self, candidates: Vec<Candidate>, profile: &RatingProfile) -> Result<Vec<Candidate>> {
        let filtered: Vec<Candidate> = candidates
            .into_iter()
            .filter(|candidate| !profile.is_rated(candidate.book_id))
            .collect();
        Ok(filtered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sources::CandidateSource;

    #[test]
    fn test_already_rated_filter() {
        let mut profile = RatingProfile::default();
        profile.rated.insert(100);
        profile.rated.insert(200);

        let candidates = vec![
            Candidate::new(100, CandidateSource::Content, 0.9),
            Candidate::new(101, CandidateSource::Content, 0.8),
            Candidate::new(200, CandidateSource::Preference, 0.7),
            Candidate::new(300, CandidateSource::Preference, 0.6),
        ];

        let filter = AlreadyRatedFilter;
        let filtered = filter.apply(candidates, &profile).unwrap();

        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[0].book_id, 101);
        assert_eq!(filtered[1].book_id, 300);
    }
}
