//! JSON request/response shape for a recommendation call.
//!
//! ```json
//! { "ratings": { "1": 5, "3": 4 }, "method": "hybrid", "n": 6 }
//! ```
//!
//! `method` defaults to `hybrid` and `n` to the engine's default count.
//! The response is a JSON array of books in catalog field shape.

use crate::blender::Blender;
use crate::strategy::Strategy;
use catalog::{Book, BookId, CatalogError, RatingMap, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecommendRequest {
    /// Book id (as a JSON object key) -> rating
    #[serde(default)]
    pub ratings: BTreeMap<String, f64>,
    #[serde(default)]
    pub method: Strategy,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub n: Option<i64>,
}

/// A request after validation
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendQuery {
    pub ratings: RatingMap,
    pub strategy: Strategy,
    pub n: usize,
}

impl RecommendRequest {
    pub fn from_json(body: &str) -> Result<Self> {
        Ok(serde_json::from_str(body)?)
    }

    /// Validate keys and count. A missing `n` becomes `default_count`.
    pub fn into_query(self, default_count: usize) -> Result<RecommendQuery> {
        let mut ratings = RatingMap::with_capacity(self.ratings.len());
        for (key, value) in self.ratings {
            let id: BookId = key.trim().parse().map_err(|_| {
                CatalogError::invalid_request("ratings", format!("'{}' is not a book id", key))
            })?;
            if !value.is_finite() {
                return Err(CatalogError::invalid_request(
                    "ratings",
                    format!("rating for book {} is not a number", id),
                ));
            }
            ratings.insert(id, value as f32);
        }

        let n = match self.n {
            None => default_count,
            Some(n) if n <= 0 => {
                return Err(CatalogError::Configuration(format!(
                    "n must be positive, got {}",
                    n
                )));
            }
            Some(n) => usize::try_from(n).map_err(|_| {
                CatalogError::Configuration(format!("n is out of range: {}", n))
            })?,
        };

        Ok(RecommendQuery {
            ratings,
            strategy: self.method,
            n,
        })
    }
}

impl Blender {
    /// Validate and answer a decoded request.
    pub fn handle(&self, request: RecommendRequest) -> Result<Vec<Book>> {
        let query = request.into_query(self.default_count())?;
        self.recommend(query.strategy, &query.ratings, query.n)
    }

    /// Decode a JSON body, answer it and encode the books as a JSON array.
    pub fn handle_json(&self, body: &str) -> Result<String> {
        let books = self.handle(RecommendRequest::from_json(body)?)?;
        to_response_json(&books)
    }
}

pub fn to_response_json(books: &[Book]) -> Result<String> {
    Ok(serde_json::to_string(books)?)
}
