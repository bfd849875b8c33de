//! # archetype-graph — Overlapping Archetypes from Card Co-occurrence
//!
//! Finds thematic groupings ("archetypes") among cards that appear together
//! across many decks, letting cards that bridge archetypes belong to several.
//!
//! ## Pipeline
//!
//! 1. **Registry**: decks → sorted, indexed item table
//! 2. **Graph**: items → weighted co-occurrence graph
//! 3. **Seed**: a `CommunityDetector` → validated disjoint partition
//! 4. **Refine**: synchronized sweeps grow memberships until a fixed point
//! 5. **Classify**: edges → interior / exterior
//! 6. **Export**: Cypher, GraphML or JSON
//!
//! ## Quick Start
//!
//! ```rust
//! use archetype_graph::{AnalysisConfig, ArchetypeAnalysis, Collection};
//!
//! # fn example() -> archetype_graph::Result<()> {
//! let decks: Vec<Collection> = vec![
//!     ["Opt", "Island", "Counterspell"].into_iter().collect(),
//!     ["Opt", "Island", "Brainstorm"].into_iter().collect(),
//!     ["Mountain", "Lightning Bolt", "Opt"].into_iter().collect(),
//! ];
//!
//! let analysis = ArchetypeAnalysis::new(AnalysisConfig::default())?;
//! let report = analysis.run_default(&decks)?;
//!
//! for vertex in &report.annotated.vertices {
//!     println!("{} → {}", vertex.label, vertex.clusters);
//! }
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Seed Detectors
//!
//! | Detector | Description |
//! |----------|-------------|
//! | `CpmLocalMoving` | Built-in greedy CPM optimizer (default) |
//! | `FixedPartition` | Partition computed elsewhere |

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod config;
pub mod registry;
pub mod graph;
pub mod community;
pub mod refine;
pub mod classify;
pub mod ingest;
pub mod export;

// ============================================================================
// Re-exports: Model
// ============================================================================

pub use model::{
    ItemId, ItemRecord, VertexId, Collection,
    ClusterId, ClusterSet, Edge, EdgeClass, EdgeId,
    Value, PropertyMap,
};

// ============================================================================
// Re-exports: Phases
// ============================================================================

pub use config::{AnalysisConfig, IngestConfig, Threshold};
pub use registry::ItemRegistry;
pub use graph::{AnnotatedGraph, CooccurrenceGraph};
pub use community::{CommunityDetector, CpmLocalMoving, FixedPartition, SeedPartition};
pub use refine::{OverlapRefiner, RefinementOutcome, VertexDecision};
pub use ingest::{DeckNormalizer, DeckRow, DelimitedNormalizer, IngestSummary};

use tracing::info;

// ============================================================================
// Top-level analysis handle
// ============================================================================

/// Everything one run produced, phase by phase.
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    pub registry: ItemRegistry,
    pub graph: CooccurrenceGraph,
    pub seed: SeedPartition,
    pub refinement: RefinementOutcome,
    pub annotated: AnnotatedGraph,
}

/// The primary entry point. Holds a validated configuration and runs the
/// pipeline over a set of decks.
#[derive(Debug, Clone)]
pub struct ArchetypeAnalysis {
    config: AnalysisConfig,
}

impl ArchetypeAnalysis {
    /// Validate `config` and build the handle.
    pub fn new(config: AnalysisConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Run every phase with the given seed detector.
    pub fn run(
        &self,
        collections: &[Collection],
        detector: &dyn CommunityDetector,
    ) -> Result<AnalysisReport> {
        // Phase 1: Registry
        let registry = ItemRegistry::from_collections(collections);

        // Phase 2: Graph
        let graph = CooccurrenceGraph::build(&registry);

        // Phase 3: Seed partition
        let seed = community::seed_partition(detector, &graph, self.config.resolution)?;

        // Phase 4: Refine
        let refiner = OverlapRefiner::new(self.config.cluster_percentage)
            .with_parallel(self.config.parallel);
        let refinement = refiner.refine(&graph, &seed)?;

        // Phase 5: Classify
        let annotated = classify::annotate(
            &registry,
            &graph,
            refinement.memberships.clone(),
            seed.cluster_count(),
        )?;

        info!(
            items = registry.len(),
            clusters = seed.cluster_count(),
            overlapping = refinement.overlapping_count(),
            "archetype analysis complete"
        );

        Ok(AnalysisReport { registry, graph, seed, refinement, annotated })
    }

    /// Run with the built-in [`CpmLocalMoving`] seed detector.
    pub fn run_default(&self, collections: &[Collection]) -> Result<AnalysisReport> {
        self.run(collections, &CpmLocalMoving::default())
    }

    /// Normalize tabular rows with the configured ingest settings, then run.
    pub fn run_rows(
        &self,
        rows: &[DeckRow],
        detector: &dyn CommunityDetector,
    ) -> Result<(AnalysisReport, IngestSummary)> {
        let normalizer = DelimitedNormalizer::from_config(&self.config.ingest);
        let (collections, summary) = ingest::collections_from_rows(rows, &normalizer);
        let report = self.run(&collections, detector)?;
        Ok((report, summary))
    }
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid cluster_percentage {value}: must be in (0, 1]")]
    InvalidThreshold { value: f64 },

    #[error("Invalid resolution parameter {value}: must be finite and >= 0")]
    InvalidResolution { value: f64 },

    #[error("Invalid seed partition: {0}")]
    InvalidPartition(String),

    #[error("Cluster id {cluster} is out of range: the run has {cluster_count} clusters")]
    UnknownCluster { cluster: u32, cluster_count: usize },

    #[error("Membership table has {got} entries, graph has {expected} vertices")]
    MembershipMismatch { expected: usize, got: usize },

    #[error("Ingest error: {0}")]
    Ingest(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
