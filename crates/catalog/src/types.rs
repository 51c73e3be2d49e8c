//! Core domain types for the book catalog.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Type Aliases
// =============================================================================

/// Unique, positive identifier for a book
pub type BookId = u32;

/// User-supplied ratings for one request, keyed by book id.
///
/// Conventionally 1-5. Ids missing from the catalog are ignored by the
/// aggregate signals built from this map.
pub type RatingMap = HashMap<BookId, f32>;

// =============================================================================
// Book-related Types
// =============================================================================

/// Reading level of a book
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Level {
    Beginner,
    Intermediate,
    Advanced,
}

impl Level {
    pub const ALL: [Level; 3] = [Level::Beginner, Level::Intermediate, Level::Advanced];

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Beginner => "Beginner",
            Level::Intermediate => "Intermediate",
            Level::Advanced => "Advanced",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        Level::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown level '{}'", s))
    }
}

/// A book in the catalog.
///
/// Books are created once when the catalog is loaded and never mutated.
/// The serialized field names match what the HTTP layer exposes
/// (`book_id`, `title`, `author`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    #[serde(rename = "book_id", alias = "id")]
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub category: String,
    pub level: Level,
    /// Average rating, always within 0.0..=5.0
    pub rating: f32,
    pub year: u16,
}

impl Book {
    /// Text used to build the book's TF-IDF vector:
    /// title, category, level and author joined by spaces.
    pub fn content_text(&self) -> String {
        format!(
            "{} {} {} {}",
            self.title, self.category, self.level, self.author
        )
    }
}

/// Raw, unvalidated catalog row as handed over by a loader.
///
/// Every field is optional so that a missing column surfaces as a
/// validation error from [`Catalog::load`] instead of a decode failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookRecord {
    #[serde(default, alias = "book_id")]
    pub id: Option<i64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub rating: Option<f32>,
    #[serde(default)]
    pub year: Option<i64>,
}

impl From<&Book> for BookRecord {
    fn from(book: &Book) -> Self {
        Self {
            id: Some(book.id as i64),
            title: Some(book.title.clone()),
            author: Some(book.author.clone()),
            category: Some(book.category.clone()),
            level: Some(book.level.to_string()),
            rating: Some(book.rating),
            year: Some(book.year as i64),
        }
    }
}

// =============================================================================
// Statistics Types
// =============================================================================

/// Summary statistics over the whole catalog
#[derive(Debug, Clone, Serialize)]
pub struct CatalogStats {
    pub total_books: usize,
    /// Number of books per category label
    pub categories: BTreeMap<String, usize>,
    /// Number of books per level
    pub levels: BTreeMap<Level, usize>,
    pub avg_rating: f32,
    /// (oldest, newest) publication year; `None` for an empty catalog
    pub year_range: Option<(u16, u16)>,
    /// Up to five highest-rated books, ties by catalog order
    pub top_rated: Vec<(BookId, String, f32)>,
}

// =============================================================================
// Catalog - The Immutable Book Table
// =============================================================================

/// Read-only table of every recommendable book.
///
/// Books are kept in insertion order. `positions` maps each id to its
/// 0-based position, which is also the row/column index used by the
/// similarity and neighbor indexes; it is fixed at load time and never
/// renumbered.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub(crate) books: Vec<Book>,
    pub(crate) positions: HashMap<BookId, usize>,
    /// Book ids grouped by category, in catalog order
    pub(crate) category_index: HashMap<String, Vec<BookId>>,
}

impl Catalog {
    /// Get a book by id
    pub fn get(&self, id: BookId) -> Option<&Book> {
        self.positions.get(&id).map(|&pos| &self.books[pos])
    }

    /// All books in insertion order
    pub fn all(&self) -> &[Book] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn contains(&self, id: BookId) -> bool {
        self.positions.contains_key(&id)
    }

    /// Books matching `predicate`, in insertion order
    pub fn filter<P>(&self, predicate: P) -> Vec<&Book>
    where
        P: Fn(&Book) -> bool,
    {
        self.books.iter().filter(|book| predicate(book)).collect()
    }

    /// Ids of every book in `category`, in catalog order
    pub fn books_in_category(&self, category: &str) -> &[BookId] {
        self.category_index
            .get(category)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }
}
