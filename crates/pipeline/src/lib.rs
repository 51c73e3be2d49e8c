//! Pipeline for filtering, merging and blending book candidates.
//!
//! This crate provides:
//! - Filter trait and implementations for candidate filtering
//! - FilterPipeline for composing filters
//! - WeightedBlender for combining source rankings by position
//! - The shared ranking helpers, re-exported from `sources`
//!
//! ## Architecture
//! The pipeline processes candidates in stages:
//! 1. Sources propose candidates (content, preference, neighbors)
//! 2. Filters remove unknown ids, rated ids and duplicates
//! 3. The merged list is ranked and truncated
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::FilterPipeline;
//! use pipeline::filters::*;
//!
//! let pipeline = FilterPipeline::new()
//!     .add_filter(UnknownBookFilter::new(catalog.clone()))
//!     .add_filter(AlreadyRatedFilter)
//!     .add_filter(DuplicateFilter);
//!
//! let merged = pipeline.apply(candidates, &profile)?;
//! ```

pub mod blend;
pub mod filter_pipeline;
pub mod filters;
pub mod traits;

pub use sources::ranking;

// Re-export main types
pub use blend::{BlendWeights, BlendedCandidate, WeightedBlender};
pub use filter_pipeline::FilterPipeline;
pub use traits::Filter;
