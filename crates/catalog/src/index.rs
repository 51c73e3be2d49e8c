//! Catalog construction, validation and lookups.
//!
//! This module builds the Catalog from raw records:
//! - Validate every record and convert it into a `Book`
//! - Build the id -> position index
//! - Build the secondary category index
//! - Answer browsing queries (categories, search, statistics)

use crate::error::{CatalogError, Result};
use crate::parser;
use crate::types::*;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use tracing::{debug, info};

impl Catalog {
    /// Validate `records` and build the catalog.
    ///
    /// Records keep their input order. The first malformed record aborts
    /// the load with [`CatalogError::Validation`].
    pub fn load<I>(records: I) -> Result<Self>
    where
        I: IntoIterator<Item = BookRecord>,
    {
        let mut books = Vec::new();
        let mut positions = HashMap::new();

        for (record_no, record) in records.into_iter().enumerate() {
            let book = validate_record(record_no, record)?;
            if positions.insert(book.id, books.len()).is_some() {
                return Err(CatalogError::validation(
                    record_no,
                    format!("duplicate book_id {}", book.id),
                ));
            }
            books.push(book);
        }

        let mut catalog = Catalog {
            books,
            positions,
            category_index: HashMap::new(),
        };
        catalog.build_secondary_indices();

        debug!(
            "Catalog built with {} books in {} categories",
            catalog.len(),
            catalog.category_index.len()
        );
        Ok(catalog)
    }

    /// Load a catalog from a `.json` or `.dat` file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        info!("Loading catalog from {:?}", path);
        let records = parser::parse_catalog_file(path)?;
        let catalog = Self::load(records)?;
        info!("Loaded {} books", catalog.len());
        Ok(catalog)
    }

    /// Build the category -> book ids index
    fn build_secondary_indices(&mut self) {
        for book in &self.books {
            self.category_index
                .entry(book.category.clone())
                .or_default()
                .push(book.id);
        }
    }

    /// Get a book by id, failing with `NotFound` when it is absent.
    pub fn book(&self, id: BookId) -> Result<&Book> {
        self.get(id).ok_or(CatalogError::NotFound { id })
    }

    /// Stable 0-based position of `id`, used as the matrix index.
    pub fn index_of(&self, id: BookId) -> Result<usize> {
        self.positions
            .get(&id)
            .copied()
            .ok_or(CatalogError::NotFound { id })
    }

    /// Sorted list of distinct category labels
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = self.category_index.keys().map(|c| c.as_str()).collect();
        categories.sort_unstable();
        categories
    }

    /// Case-insensitive substring search over title and author.
    ///
    /// An empty query matches every book.
    pub fn search(&self, query: &str) -> Vec<&Book> {
        let query = query.trim().to_lowercase();
        self.filter(|book| {
            book.title.to_lowercase().contains(&query)
                || book.author.to_lowercase().contains(&query)
        })
    }

    /// Compute summary statistics over the catalog
    pub fn stats(&self) -> CatalogStats {
        let mut categories: BTreeMap<String, usize> = BTreeMap::new();
        let mut levels: BTreeMap<Level, usize> = BTreeMap::new();
        for book in &self.books {
            *categories.entry(book.category.clone()).or_insert(0) += 1;
            *levels.entry(book.level).or_insert(0) += 1;
        }

        let avg_rating = if self.books.is_empty() {
            0.0
        } else {
            let total: f32 = self.books.iter().map(|b| b.rating).sum();
            total / self.books.len() as f32
        };

        let year_range = self
            .books
            .iter()
            .map(|b| b.year)
            .fold(None, |range: Option<(u16, u16)>, year| match range {
                Some((lo, hi)) => Some((lo.min(year), hi.max(year))),
                None => Some((year, year)),
            });

        let mut by_rating: Vec<&Book> = self.books.iter().collect();
        by_rating.sort_by(|a, b| b.rating.total_cmp(&a.rating));
        let top_rated = by_rating
            .into_iter()
            .take(5)
            .map(|b| (b.id, b.title.clone(), b.rating))
            .collect();

        CatalogStats {
            total_books: self.books.len(),
            categories,
            levels,
            avg_rating,
            year_range,
            top_rated,
        }
    }
}

/// Check one raw record and convert it into a `Book`.
///
/// Text fields are trimmed. `rating` must lie in 0.0..=5.0 (NaN is rejected).
fn validate_record(record_no: usize, record: BookRecord) -> Result<Book> {
    let missing = |field: &str| CatalogError::validation(record_no, format!("missing {}", field));

    let raw_id = record.id.ok_or_else(|| missing("book_id"))?;
    let id = BookId::try_from(raw_id)
        .ok()
        .filter(|&id| id > 0)
        .ok_or_else(|| {
            CatalogError::validation(record_no, format!("book_id must be positive, got {}", raw_id))
        })?;

    let title = record.title.ok_or_else(|| missing("title"))?.trim().to_string();
    if title.is_empty() {
        return Err(CatalogError::validation(record_no, "title must not be empty"));
    }

    let author = record.author.ok_or_else(|| missing("author"))?.trim().to_string();

    let category = record.category.ok_or_else(|| missing("category"))?.trim().to_string();
    if category.is_empty() {
        return Err(CatalogError::validation(record_no, "category must not be empty"));
    }

    let level = record
        .level
        .ok_or_else(|| missing("level"))?
        .parse::<Level>()
        .map_err(|reason| CatalogError::validation(record_no, reason))?;

    let rating = record.rating.ok_or_else(|| missing("rating"))?;
    if !(0.0..=5.0).contains(&rating) {
        return Err(CatalogError::validation(
            record_no,
            format!("rating {} outside 0..=5", rating),
        ));
    }

    let raw_year = record.year.ok_or_else(|| missing("year"))?;
    let year = u16::try_from(raw_year).map_err(|_| {
        CatalogError::validation(record_no, format!("invalid year {}", raw_year))
    })?;

    Ok(Book {
        id,
        title,
        author,
        category,
        level,
        rating,
        year,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(
        id: i64,
        title: &str,
        category: &str,
        level: &str,
        rating: f32,
        year: i64,
    ) -> BookRecord {
        BookRecord {
            id: Some(id),
            title: Some(title.to_string()),
            author: Some("Some Author".to_string()),
            category: Some(category.to_string()),
            level: Some(level.to_string()),
            rating: Some(rating),
            year: Some(year),
        }
    }

    fn create_test_catalog() -> Catalog {
        Catalog::load(vec![
            record(10, "Deep Learning", "Deep Learning", "Advanced", 4.5, 2016),
            record(20, "Fluent Python", "Python", "Intermediate", 4.7, 2022),
            record(30, "Grokking Deep Learning", "Deep Learning", "Beginner", 4.4, 2019),
        ])
        .unwrap()
    }

    #[test]
    fn test_load_keeps_insertion_order() {
        let catalog = create_test_catalog();
        let ids: Vec<BookId> = catalog.all().iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![10, 20, 30]);
        assert_eq!(catalog.index_of(10).unwrap(), 0);
        assert_eq!(catalog.index_of(30).unwrap(), 2);
    }

    #[test]
    fn test_rejects_rating_out_of_range() {
        let result = Catalog::load(vec![record(1, "Too Good", "Python", "Beginner", 5.5, 2020)]);
        assert!(matches!(result, Err(CatalogError::Validation { record: 0, .. })));

        let result = Catalog::load(vec![record(1, "Negative", "Python", "Beginner", -0.1, 2020)]);
        assert!(matches!(result, Err(CatalogError::Validation { .. })));

        let result = Catalog::load(vec![record(1, "NaN", "Python", "Beginner", f32::NAN, 2020)]);
        assert!(matches!(result, Err(CatalogError::Validation { .. })));
    }

    #[test]
    fn test_accepts_rating_bounds() {
        let catalog = Catalog::load(vec![
            record(1, "Zero", "Python", "Beginner", 0.0, 2020),
            record(2, "Five", "Python", "Beginner", 5.0, 2020),
        ])
        .unwrap();
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_rejects_missing_fields() {
        let mut no_title = record(1, "x", "Python", "Beginner", 4.0, 2020);
        no_title.title = None;
        let err = Catalog::load(vec![no_title]).unwrap_err();
        assert!(err.to_string().contains("missing title"));

        let mut blank_title = record(1, "x", "Python", "Beginner", 4.0, 2020);
        blank_title.title = Some("   ".to_string());
        assert!(Catalog::load(vec![blank_title]).is_err());

        let mut no_rating = record(1, "x", "Python", "Beginner", 4.0, 2020);
        no_rating.rating = None;
        assert!(Catalog::load(vec![no_rating]).is_err());

        let mut no_year = record(1, "x", "Python", "Beginner", 4.0, 2020);
        no_year.year = None;
        assert!(Catalog::load(vec![no_year]).is_err());
    }

    #[test]
    fn test_rejects_bad_ids_and_levels() {
        assert!(Catalog::load(vec![record(0, "x", "Python", "Beginner", 4.0, 2020)]).is_err());
        assert!(Catalog::load(vec![record(-3, "x", "Python", "Beginner", 4.0, 2020)]).is_err());
        assert!(Catalog::load(vec![record(1, "x", "Python", "Expert", 4.0, 2020)]).is_err());

        let duplicate = Catalog::load(vec![
            record(1, "a", "Python", "Beginner", 4.0, 2020),
            record(1, "b", "Python", "Beginner", 4.0, 2020),
        ]);
        assert!(matches!(duplicate, Err(CatalogError::Validation { record: 1, .. })));
    }

    #[test]
    fn test_unknown_id_is_not_found() {
        let catalog = create_test_catalog();
        assert!(catalog.get(9999).is_none());
        assert!(catalog.book(9999).unwrap_err().is_not_found());
        assert!(matches!(
            catalog.index_of(9999),
            Err(CatalogError::NotFound { id: 9999 })
        ));
    }

    #[test]
    fn test_categories_and_search() {
        let catalog = create_test_catalog();
        assert_eq!(catalog.categories(), vec!["Deep Learning", "Python"]);
        assert_eq!(catalog.books_in_category("Deep Learning"), &[10, 30]);
        assert!(catalog.books_in_category("Cooking").is_empty());

        let hits: Vec<BookId> = catalog.search("deep").iter().map(|b| b.id).collect();
        assert_eq!(hits, vec![10, 30]);
        let hits: Vec<BookId> = catalog.search("AUTHOR").iter().map(|b| b.id).collect();
        assert_eq!(hits.len(), 3);
    }

    #[test]
    fn test_filter_preserves_order() {
        let catalog = create_test_catalog();
        let advanced_or_recent: Vec<BookId> = catalog
            .filter(|b| b.level == Level::Advanced || b.year >= 2020)
            .iter()
            .map(|b| b.id)
            .collect();
        assert_eq!(advanced_or_recent, vec![10, 20]);
    }

    #[test]
    fn test_stats() {
        let catalog = create_test_catalog();
        let stats = catalog.stats();
        assert_eq!(stats.total_books, 3);
        assert_eq!(stats.categories["Deep Learning"], 2);
        assert_eq!(stats.levels[&Level::Advanced], 1);
        assert_eq!(stats.year_range, Some((2016, 2022)));
        assert!((stats.avg_rating - 4.5333).abs() < 0.001);
        assert_eq!(stats.top_rated[0].0, 20);
    }
}
