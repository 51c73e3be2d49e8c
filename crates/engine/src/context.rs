//! # Engine Context
//!
//! The immutable bundle every recommendation call reads from: the catalog,
//! both derived indexes and the merge pipeline. It is built once per
//! catalog and shared as `Arc<EngineContext>`; nothing in it is mutated
//! after construction, so the read path takes no locks.
//!
//! [`SharedContext`] adds reload: a new context is built off to the side
//! and swapped in under a short write lock. Callers that already cloned
//! the old `Arc` keep using their snapshot.

use crate::strategy::BlendMode;
use catalog::{Catalog, CatalogError, Result};
use pipeline::{FilterPipeline, WeightedBlender};
use sources::{NeighborIndex, SimilarityConfig, SimilarityIndex};
use std::sync::{Arc, RwLock};
use std::time::Instant;
use tracing::{info, instrument};

pub const DEFAULT_COUNT: usize = 6;

/// Engine settings
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Number of results when a request does not say
    pub default_count: usize,
    pub similarity: SimilarityConfig,
    pub blend: BlendMode,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_count: DEFAULT_COUNT,
            similarity: SimilarityConfig::default(),
            blend: BlendMode::default(),
        }
    }
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default_count(mut self, count: usize) -> Self {
        self.default_count = count;
        self
    }

    pub fn with_similarity(mut self, similarity: SimilarityConfig) -> Self {
        self.similarity = similarity;
        self
    }

    pub fn with_blend(mut self, blend: BlendMode) -> Self {
        self.blend = blend;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.default_count == 0 {
            return Err(CatalogError::Configuration(
                "default count must be positive".to_string(),
            ));
        }
        self.similarity.validate()?;
        if let BlendMode::Weighted(weights) = &self.blend {
            weights.validate()?;
        }
        Ok(())
    }
}

/// Catalog plus everything derived from it
#[derive(Debug)]
pub struct EngineContext {
    pub catalog: Arc<Catalog>,
    pub similarity: SimilarityIndex,
    pub neighbors: NeighborIndex,
    pub pipeline: FilterPipeline,
    pub weighted: Option<WeightedBlender>,
    pub config: EngineConfig,
}

impl EngineContext {
    /// Build both indexes for `catalog`.
    ///
    /// The similarity matrix and the neighbor features are computed in
    /// parallel.
    #[instrument(skip(catalog, config), fields(books = catalog.len()))]
    pub fn build(catalog: Catalog, config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let start = Instant::now();
        let catalog = Arc::new(catalog);

        let (similarity, neighbors) = rayon::join(
            || SimilarityIndex::build_with(&catalog, &config.similarity),
            || NeighborIndex::build(&catalog),
        );
        let similarity = similarity?;

        let weighted = match config.blend {
            BlendMode::Weighted(weights) => Some(WeightedBlender::new(catalog.clone(), weights)?),
            BlendMode::RatingSort => None,
        };

        info!(
            "Engine context ready: {} books in {:.2?}",
            catalog.len(),
            start.elapsed()
        );

        Ok(Self {
            pipeline: FilterPipeline::standard(catalog.clone()),
            catalog,
            similarity,
            neighbors,
            weighted,
            config,
        })
    }

    /// Context over the built-in sample catalog
    pub fn sample(config: EngineConfig) -> Result<Self> {
        Self::build(catalog::sample_catalog()?, config)
    }
}

/// Reloadable handle to the current [`EngineContext`]
#[derive(Debug)]
pub struct SharedContext {
    current: RwLock<Arc<EngineContext>>,
}

impl SharedContext {
    pub fn new(context: EngineContext) -> Self {
        Self {
            current: RwLock::new(Arc::new(context)),
        }
    }

    /// Snapshot of the context in use right now
    pub fn current(&self) -> Arc<EngineContext> {
        // A poisoned lock still holds a fully built context
        match self.current.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Rebuild everything for `catalog` and swap it in.
    ///
    /// On error the previous context stays in place.
    pub fn reload(&self, catalog: Catalog, config: EngineConfig) -> Result<()> {
        let fresh = Arc::new(EngineContext::build(catalog, config)?);
        let books = fresh.catalog.len();
        match self.current.write() {
            Ok(mut guard) => *guard = fresh,
            Err(poisoned) => *poisoned.into_inner() = fresh,
        }
        info!("Reloaded engine context with {} books", books);
        Ok(())
    }
}
