//! Graph construction from catalog records.
//!
//! The catalog links courses by *name*, not by code: each record may
//! carry a `;`-separated list of recommended-before course names in free
//! text. Building the graph therefore goes through a normalized-name →
//! code map, and every recommendation token that fails the lookup is
//! skipped silently — a missing or misspelled name is data noise, not an
//! error.

use hashbrown::HashMap;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::model::{Course, CourseAttrs, CourseId};
use super::CourseGraph;

/// Delimiter between course names inside a recommendation field.
pub const RECOMMENDATION_DELIMITER: char = ';';

/// One row of the course catalog, as loaded from the input table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CourseRecord {
    /// Unique course code. Records without one are excluded from the
    /// graph (and from name resolution) but do not abort the run.
    pub code: Option<String>,
    /// Display name; also the key other records use to reference this
    /// course in their recommendation lists.
    pub name: String,
    /// Free-text `;`-separated list of recommended-before course names.
    pub recommendations: Option<String>,
    pub attrs: CourseAttrs,
}

impl CourseRecord {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            name: name.into(),
            recommendations: None,
            attrs: CourseAttrs::default(),
        }
    }

    pub fn with_recommendations(mut self, list: impl Into<String>) -> Self {
        self.recommendations = Some(list.into());
        self
    }

    pub fn with_attrs(mut self, attrs: CourseAttrs) -> Self {
        self.attrs = attrs;
        self
    }
}

/// Normalize a free-text name for lookup: trim surrounding whitespace,
/// strip diacritics (NFD, drop combining marks), fold to lowercase.
/// Two names resolve to the same course iff they are equal after this
/// transform.
pub fn normalize_name(raw: &str) -> String {
    raw.trim()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Build the prerequisite graph from an ordered sequence of records.
///
/// Node order follows record order, so a fixed catalog always yields the
/// same graph, edge order included.
pub fn build_graph(records: &[CourseRecord]) -> CourseGraph {
    // Pass 1: normalized name -> code, over records that have a code.
    // On a name collision the first record wins.
    let mut by_name: HashMap<String, CourseId> = HashMap::new();
    for record in records {
        let Some(code) = &record.code else { continue };
        by_name
            .entry(normalize_name(&record.name))
            .or_insert_with(|| CourseId::new(code.clone()));
    }

    // Pass 2: one node per coded record.
    let mut graph = CourseGraph::new();
    for record in records {
        let Some(code) = &record.code else { continue };
        graph.add_course(
            Course::new(code.clone(), record.name.clone()).with_attrs(record.attrs.clone()),
        );
    }

    // Pass 3: resolve recommendation names to edges (prereq -> course).
    let mut unresolved = 0usize;
    for record in records {
        let Some(code) = &record.code else { continue };
        let Some(list) = &record.recommendations else { continue };
        let course_id = CourseId::new(code.clone());

        for token in list.split(RECOMMENDATION_DELIMITER) {
            if token.trim().is_empty() {
                continue;
            }
            match by_name.get(&normalize_name(token)) {
                Some(prereq_id) if *prereq_id != course_id => {
                    // Idempotent: duplicate tokens collapse to one edge.
                    let _ = graph.add_edge(prereq_id, &course_id);
                }
                Some(_) => {
                    // A record recommending itself never becomes a self-loop.
                    tracing::debug!(course = %course_id, "self-reference in recommendations, skipped");
                }
                None => {
                    unresolved += 1;
                    tracing::debug!(course = %course_id, token = token.trim(), "unresolvable recommendation");
                }
            }
        }
    }

    tracing::info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        unresolved,
        "prerequisite graph built"
    );
    graph
}

// ============================================================================
// Tests
// ============================================================================
