//! Recommendation engine for the technical book catalog.
//!
//! This crate ties the catalog, the candidate sources and the merge
//! pipeline together behind one [`Blender`]:
//! - **context**: the immutable catalog + similarity + neighbor bundle and
//!   its reloadable handle
//! - **strategy**: the closed set of strategies and hybrid blend modes
//! - **blender**: content, preference, hybrid, popular and lookup operations
//! - **request**: the JSON request/response shape
//!
//! ## Example Usage
//! ```ignore
//! use engine::{Blender, EngineConfig, EngineContext, Strategy};
//! use std::sync::Arc;
//!
//! let context = EngineContext::sample(EngineConfig::default())?;
//! let blender = Blender::new(Arc::new(context));
//!
//! let ratings = [(1, 5.0), (3, 4.0), (6, 5.0)].into_iter().collect();
//! let books = blender.recommend(Strategy::Hybrid, &ratings, 5)?;
//! ```

pub mod blender;
pub mod context;
pub mod request;
pub mod strategy;

pub use blender::Blender;
pub use context::{DEFAULT_COUNT, EngineConfig, EngineContext, SharedContext};
pub use request::{RecommendQuery, RecommendRequest, to_response_json};
pub use strategy::{BlendMode, Strategy};

pub use pipeline::BlendWeights;
pub use sources::SimilarityConfig;
