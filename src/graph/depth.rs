//! Curricular depth — longest-path distance from any prerequisite-free
//! course.
//!
//! Depth 0 for nodes with no predecessors; otherwise one more than the
//! maximum depth among direct predecessors. Well-defined only on a DAG,
//! so run [`reduce_to_dag`](super::reduce_to_dag) first; a graph that
//! still contains a cycle fails with `PreconditionViolation`.

use std::collections::VecDeque;

use hashbrown::HashMap;

use crate::model::CourseId;
use crate::{Error, Result};
use super::CourseGraph;

/// Immutable `course -> depth` assignment for one pipeline run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DepthMap {
    depths: HashMap<CourseId, u32>,
    max: u32,
}

impl DepthMap {
    /// Compute depths over an acyclic graph via Kahn's topological
    /// order. Nodes are seeded in graph order, so ties resolve
    /// deterministically.
    pub fn compute(dag: &CourseGraph) -> Result<Self> {
        let mut indegree: HashMap<CourseId, usize> = HashMap::new();
        let mut queue: VecDeque<CourseId> = VecDeque::new();
        let mut depths: HashMap<CourseId, u32> = HashMap::new();

        for id in dag.course_ids() {
            let deg = dag.predecessors(id).len();
            indegree.insert(id.clone(), deg);
            if deg == 0 {
                depths.insert(id.clone(), 0);
                queue.push_back(id.clone());
            }
        }

        let mut processed = 0usize;
        while let Some(node) = queue.pop_front() {
            processed += 1;
            let depth = depths[&node];

            for next in dag.successors(&node) {
                let candidate = depth + 1;
                depths
                    .entry(next.clone())
                    .and_modify(|d| *d = (*d).max(candidate))
                    .or_insert(candidate);

                let deg = indegree
                    .get_mut(next)
                    .ok_or_else(|| Error::UnknownCourse(next.clone()))?;
                *deg -= 1;
                if *deg == 0 {
                    queue.push_back(next.clone());
                }
            }
        }

        if processed != dag.node_count() {
            return Err(Error::PreconditionViolation(format!(
                "depth computation requires an acyclic graph; {} of {} nodes lie on cycles",
                dag.node_count() - processed,
                dag.node_count(),
            )));
        }

        let max = depths.values().copied().max().unwrap_or(0);
        tracing::debug!(nodes = depths.len(), max_depth = max, "depth map computed");
        Ok(Self { depths, max })
    }

    /// Rebuild from persisted `(id, depth)` entries.
    pub fn from_entries(entries: impl IntoIterator<Item = (CourseId, u32)>) -> Self {
        let depths: HashMap<CourseId, u32> = entries.into_iter().collect();
        let max = depths.values().copied().max().unwrap_or(0);
        Self { depths, max }
    }

    pub fn get(&self, id: &CourseId) -> Option<u32> {
        self.depths.get(id).copied()
    }

    /// Global maximum depth across all nodes; 0 for an empty or flat map.
    pub fn max_depth(&self) -> u32 {
        self.max
    }

    pub fn len(&self) -> usize {
        self.depths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.depths.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CourseId, u32)> {
        self.depths.iter().map(|(id, d)| (id, *d))
    }
}

// ============================================================================
// Tests
// ============================================================================
