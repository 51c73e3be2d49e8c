//! Candidate types produced by the recommendation sources.

use catalog::BookId;
use serde::Serialize;

/// Which strategy surfaced a candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CandidateSource {
    /// Text similarity to the user's liked books
    Content,
    /// Category/level preference scoring
    Preference,
    /// Feature-space nearest neighbors of a liked book
    Neighbor,
    /// Highest-rated books overall
    Popularity,
}

/// A book proposed by one source, with that source's own score.
///
/// Scores are only comparable between candidates of the same source.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Candidate {
    pub book_id: BookId,
    pub source: CandidateSource,
    pub score: f64,
}

impl Candidate {
    pub fn new(book_id: BookId, source: CandidateSource, score: f64) -> Self {
        Self {
            book_id,
            source,
            score,
        }
    }
}
