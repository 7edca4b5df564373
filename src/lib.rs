//! # curricsim — Course Similarity over Prerequisite Graphs
//!
//! Computes pairwise similarity between the courses of a curriculum by
//! combining four signals derived from the prerequisite graph:
//! predecessor-set Jaccard, successor-set Jaccard, curricular-depth
//! proximity, and cosine similarity of externally supplied structural
//! embeddings.
//!
//! ## Pipeline
//!
//! ```text
//! catalog TSV → records → CourseGraph ─┬→ reduce_to_dag → DepthMap ─┐
//!                                      └→ EmbeddingSource (oracle) ─┼→ PairEnumerator → rows
//!                                                 (original graph) ─┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use curricsim::{read_catalog, CatalogColumns, EmbeddingTable, PairConfig, Pipeline};
//! use curricsim::MetricWeights;
//!
//! # fn example() -> curricsim::Result<()> {
//! let file = std::io::BufReader::new(std::fs::File::open("catalog.tsv")?);
//! let records = read_catalog(file, &CatalogColumns::default())?;
//!
//! let pipeline = Pipeline::from_records(&records)?;
//! let embeddings = EmbeddingTable::new(); // or persist::load_embeddings(...)
//!
//! let mut out = std::io::stdout().lock();
//! let rows = pipeline.similarities(&embeddings, MetricWeights::default(), PairConfig::default());
//! curricsim::pairs::write_rows(&mut out, rows)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! | Module | Responsibility |
//! |--------|----------------|
//! | `model` | Course, attribute and edge DTOs |
//! | `catalog` | TSV catalog loading |
//! | `graph` | Graph container, builder, cycle elimination, depth |
//! | `embedding` | External embedding oracle seam |
//! | `similarity` | The four metrics and their weighted combination |
//! | `pairs` | Filtered O(n²) pair enumeration + output table |
//! | `persist` | Graph/depth/embedding artifact round-trips |

// ============================================================================
// Modules
// ============================================================================

pub mod catalog;
pub mod embedding;
pub mod graph;
pub mod model;
pub mod pairs;
pub mod persist;
pub mod similarity;

// ============================================================================
// Re-exports
// ============================================================================

pub use catalog::{read_catalog, CatalogColumns};
pub use embedding::{EmbeddingSource, EmbeddingTable};
pub use graph::{
    build_graph, reduce_to_dag, AcyclicReduction, CourseGraph, CourseRecord, DepthMap,
};
pub use model::{AttrField, Course, CourseAttrs, CourseId, PrereqEdge};
pub use pairs::{PairConfig, PairEnumerator, SimilarityRow};
pub use similarity::{MetricWeights, PairScores, SimilarityEngine};

// ============================================================================
// Top-level Pipeline handle
// ============================================================================

/// One batch run: builds the graph, reduces it to a DAG, computes
/// depths, and hands out lazy pair enumerations.
///
/// The original (possibly cyclic) graph is retained alongside the DAG —
/// the Jaccard metrics and the embedding oracle operate on the original
/// structure, while depth comes from the reduction.
pub struct Pipeline {
    graph: CourseGraph,
    dag: CourseGraph,
    removed: Vec<PrereqEdge>,
    depths: DepthMap,
}

impl Pipeline {
    /// Run the structural phases over catalog records.
    pub fn from_records(records: &[CourseRecord]) -> Result<Self> {
        // Phase 1: Build the prerequisite graph
        let graph = build_graph(records);

        // Phase 2: Cycle elimination (on a private copy)
        let AcyclicReduction { dag, removed } = reduce_to_dag(&graph);

        // Phase 3: Curricular depth over the DAG
        let depths = DepthMap::compute(&dag)?;

        Ok(Self {
            graph,
            dag,
            removed,
            depths,
        })
    }

    /// The original graph, cycles included.
    pub fn graph(&self) -> &CourseGraph {
        &self.graph
    }

    /// The acyclic reduction used for depth computation.
    pub fn dag(&self) -> &CourseGraph {
        &self.dag
    }

    /// Edges deleted by cycle elimination, in deletion order.
    pub fn removed_edges(&self) -> &[PrereqEdge] {
        &self.removed
    }

    pub fn depths(&self) -> &DepthMap {
        &self.depths
    }

    /// Lazy enumeration of accepted, scored ordered pairs.
    pub fn similarities<'a, E: EmbeddingSource>(
        &'a self,
        embeddings: &'a E,
        weights: MetricWeights,
        config: PairConfig,
    ) -> PairEnumerator<'a, E> {
        let engine = SimilarityEngine::new(&self.graph, &self.depths, embeddings)
            .with_weights(weights);
        PairEnumerator::new(engine, config)
    }
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Input schema malformed: required catalog columns missing. Fatal,
    /// raised before graph construction.
    #[error("data format error: {0}")]
    DataFormat(String),

    /// Depth computation invoked on a graph that still contains a
    /// cycle — a pipeline-ordering bug, not a data condition.
    #[error("precondition violated: {0}")]
    PreconditionViolation(String),

    /// An edge referenced a course code not present in the graph.
    #[error("unknown course: {0}")]
    UnknownCourse(CourseId),

    /// A persisted artifact failed to parse.
    #[error("malformed artifact: {0}")]
    Artifact(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
