//! # Catalog Crate
//!
//! Loads, validates and indexes the immutable table of recommendable books.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (Book, Level, BookRecord, Catalog)
//! - **index**: Validation, the id -> position index and browsing queries
//! - **parser**: Read `.json` and `.dat` catalog files into raw records
//! - **sample**: The built-in 25-book catalog
//! - **error**: Error type shared by the recommendation crates
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::Catalog;
//! use std::path::Path;
//!
//! let catalog = Catalog::load_from_file(Path::new("data/books.json"))?;
//!
//! let book = catalog.book(17)?;
//! let position = catalog.index_of(17)?;
//! println!("{} sits at row {}", book.title, position);
//! ```

pub mod error;
pub mod index;
pub mod parser;
pub mod sample;
pub mod types;

pub use error::{CatalogError, Result};
pub use sample::{sample_catalog, sample_records};
pub use types::{
    // Type aliases
    BookId,
    RatingMap,
    // Core types
    Book,
    BookRecord,
    Catalog,
    CatalogStats,
    Level,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_catalog() {
        let catalog = Catalog::load(Vec::new()).unwrap();
        assert!(catalog.is_empty());
        assert!(catalog.categories().is_empty());
        assert_eq!(catalog.stats().year_range, None);
    }

    #[test]
    fn test_level_parsing() {
        assert_eq!("beginner".parse::<Level>().unwrap(), Level::Beginner);
        assert_eq!(" Advanced ".parse::<Level>().unwrap(), Level::Advanced);
        assert!("Expert".parse::<Level>().is_err());
        assert_eq!(Level::Intermediate.to_string(), "Intermediate");
    }

    #[test]
    fn test_book_serializes_with_external_field_names() {
        let catalog = sample_catalog().unwrap();
        let json = serde_json::to_value(catalog.get(2).unwrap()).unwrap();
        assert_eq!(json["book_id"], 2);
        assert_eq!(json["level"], "Advanced");
        assert_eq!(json["year"], 2016);
    }

    #[test]
    fn test_content_text() {
        let catalog = sample_catalog().unwrap();
        assert_eq!(
            catalog.get(17).unwrap().content_text(),
            "Fluent Python Python Intermediate Luciano Ramalho"
        );
    }
}
