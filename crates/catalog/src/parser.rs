//! Parsers for catalog files.
//!
//! Two formats are accepted:
//! - `.json`: an array of book objects (`book_id`, `title`, `author`,
//!   `category`, `level`, `rating`, `year`)
//! - `.dat`: one book per line, `id::title::author::category::level::rating::year`
//!
//! Parsers only split and convert fields; value checks (rating range,
//! known levels, unique ids) happen in `Catalog::load`.

use crate::error::{CatalogError, Result};
use crate::types::BookRecord;
use std::fs;
use std::path::Path;

/// Parse a catalog file, choosing the format from its extension.
pub fn parse_catalog_file(path: &Path) -> Result<Vec<BookRecord>> {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => parse_json(&fs::read_to_string(path)?),
        Some("dat") => parse_dat(&fs::read_to_string(path)?, &file_name),
        other => Err(CatalogError::Parse {
            file: file_name,
            line: 0,
            reason: format!("unsupported catalog format {:?}", other.unwrap_or("")),
        }),
    }
}

/// Parse a JSON array of book records
pub fn parse_json(content: &str) -> Result<Vec<BookRecord>> {
    Ok(serde_json::from_str(content)?)
}

/// Parse `::`-separated catalog lines.
///
/// Blank lines and lines starting with `#` are skipped.
pub fn parse_dat(content: &str, file: &str) -> Result<Vec<BookRecord>> {
    let mut records = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        let line_no = idx + 1;
        let line_trimmed = line.trim();
        if line_trimmed.is_empty() || line_trimmed.starts_with('#') {
            continue;
        }

        let parse_error = |reason: String| CatalogError::Parse {
            file: file.to_string(),
            line: line_no,
            reason,
        };

        let parts: Vec<&str> = line_trimmed.split("::").collect();
        if parts.len() != 7 {
            return Err(parse_error(format!(
                "expected 7 fields but found {}",
                parts.len()
            )));
        }

        let id = parts[0]
            .trim()
            .parse::<i64>()
            .map_err(|e| parse_error(format!("Invalid book_id: {}", e)))?;
        let rating = parts[5]
            .trim()
            .parse::<f32>()
            .map_err(|e| parse_error(format!("Invalid rating: {}", e)))?;
        let year = parts[6]
            .trim()
            .parse::<i64>()
            .map_err(|e| parse_error(format!("Invalid year: {}", e)))?;

        records.push(BookRecord {
            id: Some(id),
            title: Some(parts[1].to_string()),
            author: Some(parts[2].to_string()),
            category: Some(parts[3].to_string()),
            level: Some(parts[4].to_string()),
            rating: Some(rating),
            year: Some(year),
        });
    }

    Ok(records)
}
