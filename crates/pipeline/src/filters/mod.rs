//! Filter implementations for the candidate pipeline.
//!
//! This module contains all the concrete filter implementations
//! that can be composed into a FilterPipeline.

pub mod already_rated;
pub mod duplicate;
pub mod unknown_book;

// Re-export for convenience
pub use already_rated::AlreadyRatedFilter;
pub use duplicate::DuplicateFilter;
pub use unknown_book::UnknownBookFilter;
