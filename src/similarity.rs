//! # Similarity Algebra
//!
//! Four per-pair metrics and their weighted combination:
//!
//! | Metric                 | Source structure        | Range     |
//! |------------------------|-------------------------|-----------|
//! | `jaccard_pred`         | direct predecessor sets | `[0, 1]`  |
//! | `jaccard_succ`         | direct successor sets   | `[0, 1]`  |
//! | `depth_similarity`     | curricular depth map    | `[0, 1]`  |
//! | `embedding_similarity` | cosine of oracle vectors| `[-1, 1]` |
//!
//! The Jaccard metrics read the **original** graph, cycles included —
//! the DAG exists only for depth. Every degenerate case (empty neighbor
//! set, missing depth, missing vector, zero norm) degrades to a
//! documented `0.0` instead of erroring: the engine runs inside an
//! O(n²) enumeration loop where per-pair failures are unaffordable.
//!
//! Because cosine can be negative, the combined score can dip slightly
//! below zero. That is intentional, not a bug.

use hashbrown::HashSet;

use crate::embedding::EmbeddingSource;
use crate::graph::{CourseGraph, DepthMap};
use crate::model::CourseId;

// ============================================================================
// Weights
// ============================================================================

/// Per-metric weights for the combined score.
///
/// The combination divides by the weight sum, so weights need not sum
/// to 1. All-equal weights (the default) make the combined score the
/// plain arithmetic mean of the four metrics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricWeights {
    pub predecessors: f64,
    pub successors: f64,
    pub depth: f64,
    pub embedding: f64,
}

impl Default for MetricWeights {
    fn default() -> Self {
        Self {
            predecessors: 1.0,
            successors: 1.0,
            depth: 1.0,
            embedding: 1.0,
        }
    }
}

impl MetricWeights {
    pub fn sum(&self) -> f64 {
        self.predecessors + self.successors + self.depth + self.embedding
    }
}

// ============================================================================
// Scores
// ============================================================================

/// The four component scores plus their weighted combination for one
/// ordered course pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairScores {
    pub combined: f64,
    pub jaccard_pred: f64,
    pub jaccard_succ: f64,
    pub depth_similarity: f64,
    pub embedding_similarity: f64,
}

// ============================================================================
// Engine
// ============================================================================

/// Computes [`PairScores`] over borrowed, immutable pipeline state.
pub struct SimilarityEngine<'a, E: EmbeddingSource> {
    graph: &'a CourseGraph,
    depths: &'a DepthMap,
    embeddings: &'a E,
    weights: MetricWeights,
}

impl<'a, E: EmbeddingSource> SimilarityEngine<'a, E> {
    /// `graph` must be the original (pre-reduction) graph; `depths` come
    /// from its acyclic reduction.
    pub fn new(graph: &'a CourseGraph, depths: &'a DepthMap, embeddings: &'a E) -> Self {
        Self {
            graph,
            depths,
            embeddings,
            weights: MetricWeights::default(),
        }
    }

    pub fn with_weights(mut self, weights: MetricWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn graph(&self) -> &'a CourseGraph {
        self.graph
    }

    pub fn depths(&self) -> &'a DepthMap {
        self.depths
    }

    /// Jaccard index of the two direct-predecessor sets.
    pub fn jaccard_pred(&self, a: &CourseId, b: &CourseId) -> f64 {
        jaccard(self.graph.predecessors(a), self.graph.predecessors(b))
    }

    /// Jaccard index of the two direct-successor sets.
    pub fn jaccard_succ(&self, a: &CourseId, b: &CourseId) -> f64 {
        jaccard(self.graph.successors(a), self.graph.successors(b))
    }

    /// Depth proximity: `1 - |d(a) - d(b)| / max_depth`.
    ///
    /// Either node missing from the map scores `0.0`. A flat graph
    /// (global max depth 0) scores `1.0` for every present pair.
    pub fn depth_similarity(&self, a: &CourseId, b: &CourseId) -> f64 {
        let (Some(da), Some(db)) = (self.depths.get(a), self.depths.get(b)) else {
            return 0.0;
        };
        let max = self.depths.max_depth();
        if max == 0 {
            return 1.0;
        }
        1.0 - f64::from(da.abs_diff(db)) / f64::from(max)
    }

    /// Cosine similarity of the two oracle vectors; `0.0` when either
    /// vector is unavailable.
    pub fn embedding_similarity(&self, a: &CourseId, b: &CourseId) -> f64 {
        match (self.embeddings.vector_of(a), self.embeddings.vector_of(b)) {
            (Some(va), Some(vb)) => cosine(va, vb),
            _ => 0.0,
        }
    }

    /// All four metrics plus the weighted combination.
    pub fn score(&self, a: &CourseId, b: &CourseId) -> PairScores {
        let jaccard_pred = self.jaccard_pred(a, b);
        let jaccard_succ = self.jaccard_succ(a, b);
        let depth_similarity = self.depth_similarity(a, b);
        let embedding_similarity = self.embedding_similarity(a, b);

        let w = &self.weights;
        let total = w.sum();
        let combined = if total == 0.0 {
            0.0
        } else {
            (w.predecessors * jaccard_pred
                + w.successors * jaccard_succ
                + w.depth * depth_similarity
                + w.embedding * embedding_similarity)
                / total
        };

        PairScores {
            combined,
            jaccard_pred,
            jaccard_succ,
            depth_similarity,
            embedding_similarity,
        }
    }
}

// ============================================================================
// Set and vector primitives
// ============================================================================

/// Jaccard index `|A ∩ B| / |A ∪ B|` over id slices.
///
/// Either slice empty scores `0.0` — including both empty. The empty
/// case is an explicit policy (two courses with no prerequisites share
/// no prerequisite signal), never a NaN.
pub fn jaccard(s1: &[CourseId], s2: &[CourseId]) -> f64 {
    if s1.is_empty() || s2.is_empty() {
        return 0.0;
    }
    let a: HashSet<&CourseId> = s1.iter().collect();
    let b: HashSet<&CourseId> = s2.iter().collect();
    let intersection = a.intersection(&b).count();
    let union = a.len() + b.len() - intersection;
    intersection as f64 / union as f64
}

/// Cosine similarity in f64. Mismatched lengths or a zero-norm vector
/// score `0.0`.
pub fn cosine(a: &[f32], b: &[f32]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;
    for (&x, &y) in a.iter().zip(b) {
        dot += f64::from(x) * f64::from(y);
        norm_a += f64::from(x) * f64::from(x);
        norm_b += f64::from(y) * f64::from(y);
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}

// ============================================================================
// Tests
// ============================================================================
