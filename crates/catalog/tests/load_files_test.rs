//! Loading the bundled catalog files.

use catalog::{Catalog, sample_catalog};
use std::path::PathBuf;

fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data")
}

#[test]
fn test_json_and_dat_match_sample() {
    let sample = sample_catalog().unwrap();
    let from_json = Catalog::load_from_file(&data_dir().join("books.json")).unwrap();
    let from_dat = Catalog::load_from_file(&data_dir().join("books.dat")).unwrap();

    assert_eq!(from_json.all(), sample.all());
    assert_eq!(from_dat.all(), sample.all());
}

#[test]
fn test_unsupported_extension() {
    let err = Catalog::load_from_file(&data_dir().join("books.csv")).unwrap_err();
    assert!(matches!(err, catalog::CatalogError::Parse { line: 0, .. }));
}

#[test]
fn test_missing_file_is_io_error() {
    let err = Catalog::load_from_file(&data_dir().join("missing.json")).unwrap_err();
    assert!(matches!(err, catalog::CatalogError::Io(_)));
}

#[test]
fn test_malformed_json_file_is_json_error() {
    let path = std::env::temp_dir().join(format!("book-recs-{}.json", std::process::id()));
    std::fs::write(&path, r#"[{"book_id": 1, "title": "#).unwrap();
    let err = Catalog::load_from_file(&path).unwrap_err();
    std::fs::remove_file(&path).unwrap();
    assert!(matches!(err, catalog::CatalogError::Json(_)));
}
