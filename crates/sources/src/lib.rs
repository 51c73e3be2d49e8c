//! # Sources Crate
//!
//! Candidate generation for book recommendations. Each source looks at the
//! catalog from a different angle and proposes scored candidates.
//!
//! ## Components
//!
//! ### Similarity Index (content)
//! TF-IDF over "title category level author" plus a pairwise cosine matrix:
//! "Books that read like the ones you liked"
//!
//! ### Preference Source
//! Scores unrated books against the categories and levels of liked books.
//!
//! ### Neighbor Index
//! Euclidean nearest neighbors over category, level, rating and year.
//!
//! ### Popularity Source
//! Highest-rated books, the cold-start fallback.
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::sample_catalog;
//! use sources::{NeighborIndex, PreferenceSource, SimilarityIndex};
//! use sources::user_context::build_rating_profile;
//!
//! let catalog = sample_catalog()?;
//! let similarity = SimilarityIndex::build(&catalog)?;
//! let neighbors = NeighborIndex::build(&catalog);
//!
//! let profile = build_rating_profile(&catalog, &ratings);
//!
//! let content = similarity.get_candidates(&profile, 12);
//! let preferred = PreferenceSource::new().get_candidates(&catalog, &profile, 12);
//! let nearby = neighbors.neighbors(17, 5)?;
//! ```

pub mod neighbors;
pub mod popularity;
pub mod preference;
pub mod ranking;
pub mod similarity;
pub mod tfidf;
pub mod types;
pub mod user_context;

pub use neighbors::NeighborIndex;
pub use popularity::{PopularitySource, popular};
pub use preference::PreferenceSource;
pub use ranking::{rank_top_n, top_n_by};
pub use similarity::SimilarityIndex;
pub use tfidf::SimilarityConfig;
pub use types::{Candidate, CandidateSource};
pub use user_context::{LIKE_THRESHOLD, RatingProfile, build_rating_profile};
