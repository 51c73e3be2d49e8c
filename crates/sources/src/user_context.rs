//! Build a RatingProfile from a request's rating map.
//!
//! The profile gathers everything the sources need from the ratings once,
//! up front, so candidate generation never re-walks the map.

use catalog::{BookId, Catalog, Level, RatingMap};
use std::collections::HashSet;

/// Minimum rating for a book to count as "liked"
pub const LIKE_THRESHOLD: f32 = 4.0;

/// Aggregated view of one user's ratings.
#[derive(Debug, Clone, Default)]
pub struct RatingProfile {
    /// Every rated id, liked or not, known to the catalog or not.
    /// None of these may ever be recommended.
    pub rated: HashSet<BookId>,
    /// Liked books (rating >= 4) present in the catalog, in catalog order
    pub liked: Vec<BookId>,
    /// Categories of the liked books, most frequent first
    pub liked_categories: Vec<String>,
    /// Levels of the liked books, most frequent first
    pub liked_levels: Vec<Level>,
}

impl RatingProfile {
    pub fn is_empty(&self) -> bool {
        self.rated.is_empty()
    }

    pub fn has_likes(&self) -> bool {
        !self.liked.is_empty()
    }

    pub fn is_rated(&self, id: BookId) -> bool {
        self.rated.contains(&id)
    }
}

/// Build a RatingProfile for `ratings` against `catalog`.
///
/// Ratings below [`LIKE_THRESHOLD`] are neutral: they only mark the book
/// as rated. Ids missing from the catalog are ignored for the liked set.
pub fn build_rating_profile(catalog: &Catalog, ratings: &RatingMap) -> RatingProfile {
    let mut profile = RatingProfile {
        rated: ratings.keys().copied().collect(),
        ..Default::default()
    };

    if ratings.is_empty() {
        return profile;
    }

    // Walk the catalog rather than the map so "first seen" is deterministic
    let liked_books: Vec<_> = catalog
        .all()
        .iter()
        .filter(|book| {
            ratings
                .get(&book.id)
                .is_some_and(|&rating| rating >= LIKE_THRESHOLD)
        })
        .collect();

    profile.liked = liked_books.iter().map(|book| book.id).collect();
    profile.liked_categories = rank_by_frequency(liked_books.iter().map(|b| b.category.clone()));
    profile.liked_levels = rank_by_frequency(liked_books.iter().map(|b| b.level));

    profile
}

/// Distinct values ordered by descending count, ties by first appearance.
fn rank_by_frequency<T, I>(values: I) -> Vec<T>
where
    T: PartialEq,
    I: IntoIterator<Item = T>,
{
    let mut counts: Vec<(T, usize)> = Vec::new();
    for value in values {
        match counts.iter_mut().find(|(seen, _)| *seen == value) {
            Some((_, count)) => *count += 1,
            None => counts.push((value, 1)),
        }
    }
    // Stable sort keeps first-seen order among equal counts
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.into_iter().map(|(value, _)| value).collect()
}
