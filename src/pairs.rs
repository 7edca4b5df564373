//! Pair enumeration — filter, score, stream.
//!
//! Walks every ordered pair of distinct courses (`(a, b)` and `(b, a)`
//! are both visited; predecessor/successor sets are direction-sensitive,
//! so the enumeration never deduplicates by unordered pair) and yields a
//! scored row for each pair that survives two cheap filters:
//!
//! 1. **depth gap** — `|depth(a) - depth(b)| <= max_depth_gap`;
//! 2. **categorical match** — exact equality on the configured
//!    attribute fields, short-circuiting on the first mismatch.
//!
//! Filter order is load-bearing, not style: the enumeration is O(n²)
//! and the filters reject the large majority of pairs before the
//! comparatively expensive embedding lookup and combination run.
//!
//! The iterator is lazy and finite; restarting means re-enumerating
//! from scratch. Accepted rows stream straight to the output sink —
//! the full cross product is never held in memory.

use std::io::Write;

use crate::embedding::EmbeddingSource;
use crate::model::{AttrField, CourseId};
use crate::similarity::{PairScores, SimilarityEngine};
use crate::Result;

// ============================================================================
// Configuration
// ============================================================================

/// Filter configuration for the enumerator.
#[derive(Debug, Clone, PartialEq)]
pub struct PairConfig {
    /// Maximum allowed curricular-depth distance between the two
    /// courses of a pair.
    pub max_depth_gap: u32,
    /// Attribute fields that must match exactly.
    pub match_fields: Vec<AttrField>,
}

impl Default for PairConfig {
    fn default() -> Self {
        Self {
            max_depth_gap: 2,
            match_fields: AttrField::ALL.to_vec(),
        }
    }
}

// ============================================================================
// Rows
// ============================================================================

/// One accepted ordered pair with its scores. Produced lazily and meant
/// to be serialized immediately.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityRow {
    pub a: CourseId,
    pub b: CourseId,
    pub scores: PairScores,
}

// ============================================================================
// Enumerator
// ============================================================================

/// Lazy iterator over accepted, scored course pairs.
///
/// Pair order follows the graph's node insertion order for both loop
/// positions, so output is deterministic for a deterministically built
/// graph. No sorting by score happens here.
pub struct PairEnumerator<'a, E: EmbeddingSource> {
    engine: SimilarityEngine<'a, E>,
    config: PairConfig,
    outer: usize,
    inner: usize,
}

impl<'a, E: EmbeddingSource> PairEnumerator<'a, E> {
    pub fn new(engine: SimilarityEngine<'a, E>, config: PairConfig) -> Self {
        Self {
            engine,
            config,
            outer: 0,
            inner: 0,
        }
    }

    /// Both filters, cheapest first. `None` depth means the gap is
    /// undefined, which cannot certify the threshold — the pair is
    /// rejected (defensive: every node has a depth in correct wiring).
    fn accepts(&self, a: &CourseId, b: &CourseId) -> bool {
        let depths = self.engine.depths();
        let (Some(da), Some(db)) = (depths.get(a), depths.get(b)) else {
            return false;
        };
        if da.abs_diff(db) > self.config.max_depth_gap {
            return false;
        }

        let graph = self.engine.graph();
        match (graph.course(a), graph.course(b)) {
            (Some(ca), Some(cb)) => ca.attrs.matches_on(&cb.attrs, &self.config.match_fields),
            _ => false,
        }
    }
}

impl<'a, E: EmbeddingSource> Iterator for PairEnumerator<'a, E> {
    type Item = SimilarityRow;

    fn next(&mut self) -> Option<SimilarityRow> {
        let ids = self.engine.graph().course_ids();

        while self.outer < ids.len() {
            if self.inner >= ids.len() {
                self.outer += 1;
                self.inner = 0;
                continue;
            }
            let i = self.outer;
            let j = self.inner;
            self.inner += 1;

            if i == j {
                continue;
            }
            let (a, b) = (&ids[i], &ids[j]);
            if !self.accepts(a, b) {
                continue;
            }

            return Some(SimilarityRow {
                a: a.clone(),
                b: b.clone(),
                scores: self.engine.score(a, b),
            });
        }
        None
    }
}

// ============================================================================
// Output sink
// ============================================================================

/// Output column order of the similarity table.
pub const OUTPUT_COLUMNS: [&str; 7] = [
    "course_a",
    "course_b",
    "score_combined",
    "jaccard_pred",
    "jaccard_succ",
    "depth_similarity",
    "embedding_similarity",
];

/// Stream rows to `writer` as a tab-separated table, header included.
/// Returns the number of data rows written.
pub fn write_rows(
    writer: &mut dyn Write,
    rows: impl IntoIterator<Item = SimilarityRow>,
) -> Result<usize> {
    writeln!(writer, "{}", OUTPUT_COLUMNS.join("\t"))?;

    let mut count = 0usize;
    for row in rows {
        writeln!(writer, "{}", format_row(&row))?;
        count += 1;
    }
    tracing::info!(rows = count, "similarity table written");
    Ok(count)
}

/// Format one row in output column order.
fn format_row(row: &SimilarityRow) -> String {
    let s = &row.scores;
    format!(
        "{}\t{}\t{}\t{}\t{}\t{}\t{}",
        row.a,
        row.b,
        s.combined,
        s.jaccard_pred,
        s.jaccard_succ,
        s.depth_similarity,
        s.embedding_similarity,
    )
}

// ============================================================================
// Tests
// ============================================================================
