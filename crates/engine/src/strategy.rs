//! Closed set of recommendation strategies and hybrid blend modes.

use catalog::CatalogError;
use pipeline::BlendWeights;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which strategy a request asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Text similarity to liked books
    Content,
    /// Category/level preference scoring
    Collaborative,
    /// Content and preference merged, ranked by book rating
    #[default]
    Hybrid,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [Strategy::Content, Strategy::Collaborative, Strategy::Hybrid];

    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Content => "content",
            Strategy::Collaborative => "collaborative",
            Strategy::Hybrid => "hybrid",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "content" => Ok(Strategy::Content),
            "collaborative" => Ok(Strategy::Collaborative),
            "hybrid" => Ok(Strategy::Hybrid),
            other => Err(CatalogError::invalid_request(
                "method",
                format!("unknown method '{}'", other),
            )),
        }
    }
}

/// How the hybrid strategy ranks its merged candidates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum BlendMode {
    /// Merge content and preference candidates, sort by the book's rating
    #[default]
    RatingSort,
    /// Positional scores from content and neighbor lists plus a rating term
    Weighted(BlendWeights),
}

impl FromStr for BlendMode {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rating" | "rating-sort" => Ok(BlendMode::RatingSort),
            "weighted" => Ok(BlendMode::Weighted(BlendWeights::default())),
            other => Err(CatalogError::Configuration(format!(
                "unknown blend mode '{}' (expected 'rating' or 'weighted')",
                other
            ))),
        }
    }
}
