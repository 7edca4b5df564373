//! # Prerequisite Graph Storage
//!
//! `CourseGraph` is the in-memory container for one pipeline run:
//! course nodes keyed by code, plus directed prerequisite edges held as
//! forward and reverse adjacency lists.
//!
//! The graph is rebuilt from scratch each run and owned by exactly one
//! pipeline — there is no incremental update path and no shared-state
//! locking. Node enumeration order is insertion order, which makes every
//! downstream traversal and the pair enumeration deterministic.

pub mod acyclic;
pub mod builder;
pub mod depth;

use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::model::{Course, CourseId, PrereqEdge};
use crate::{Error, Result};

pub use acyclic::{reduce_to_dag, AcyclicReduction};
pub use builder::{build_graph, normalize_name, CourseRecord};
pub use depth::DepthMap;

/// Neighbor list. Most courses have a handful of prerequisites, so the
/// first few ids live inline.
type NeighborList = SmallVec<[CourseId; 4]>;

/// Directed graph of courses and prerequisite relations.
#[derive(Debug, Clone, Default)]
pub struct CourseGraph {
    courses: HashMap<CourseId, Course>,
    /// Insertion order of nodes — the canonical enumeration order.
    order: Vec<CourseId>,
    /// course -> direct successors (courses it unlocks).
    outgoing: HashMap<CourseId, NeighborList>,
    /// course -> direct predecessors (its prerequisites).
    incoming: HashMap<CourseId, NeighborList>,
    edge_count: usize,
}

impl CourseGraph {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Nodes
    // ========================================================================

    /// Insert a course. The code is the primary key: re-inserting an
    /// existing code is a no-op returning `false` (first record wins).
    pub fn add_course(&mut self, course: Course) -> bool {
        if self.courses.contains_key(&course.id) {
            return false;
        }
        self.order.push(course.id.clone());
        self.outgoing.insert(course.id.clone(), NeighborList::new());
        self.incoming.insert(course.id.clone(), NeighborList::new());
        self.courses.insert(course.id.clone(), course);
        true
    }

    pub fn contains(&self, id: &CourseId) -> bool {
        self.courses.contains_key(id)
    }

    pub fn course(&self, id: &CourseId) -> Option<&Course> {
        self.courses.get(id)
    }

    /// All course ids in insertion order.
    pub fn course_ids(&self) -> &[CourseId] {
        &self.order
    }

    /// All courses in insertion order.
    pub fn courses(&self) -> impl Iterator<Item = &Course> {
        self.order.iter().filter_map(|id| self.courses.get(id))
    }

    pub fn node_count(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    // ========================================================================
    // Edges
    // ========================================================================

    /// Insert the directed edge `src -> dst`.
    ///
    /// Idempotent: if the ordered pair already exists this is a no-op
    /// returning `Ok(false)`. Both endpoints must be present. Self-loops
    /// are accepted here (downstream algorithms tolerate them) even
    /// though the builder never produces one.
    pub fn add_edge(&mut self, src: &CourseId, dst: &CourseId) -> Result<bool> {
        if !self.courses.contains_key(src) {
            return Err(Error::UnknownCourse(src.clone()));
        }
        if !self.courses.contains_key(dst) {
            return Err(Error::UnknownCourse(dst.clone()));
        }
        let out = self.outgoing.entry(src.clone()).or_default();
        if out.contains(dst) {
            return Ok(false);
        }
        out.push(dst.clone());
        self.incoming.entry(dst.clone()).or_default().push(src.clone());
        self.edge_count += 1;
        Ok(true)
    }

    /// Remove the directed edge `src -> dst`. Returns whether it existed.
    pub fn remove_edge(&mut self, src: &CourseId, dst: &CourseId) -> bool {
        let Some(out) = self.outgoing.get_mut(src) else {
            return false;
        };
        let Some(pos) = out.iter().position(|id| id == dst) else {
            return false;
        };
        out.remove(pos);
        if let Some(inc) = self.incoming.get_mut(dst) {
            if let Some(pos) = inc.iter().position(|id| id == src) {
                inc.remove(pos);
            }
        }
        self.edge_count -= 1;
        true
    }

    pub fn contains_edge(&self, src: &CourseId, dst: &CourseId) -> bool {
        self.outgoing
            .get(src)
            .is_some_and(|out| out.contains(dst))
    }

    /// Direct predecessors (prerequisites) of a course, in edge
    /// insertion order. Unknown ids yield an empty slice.
    pub fn predecessors(&self, id: &CourseId) -> &[CourseId] {
        self.incoming.get(id).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// Direct successors (courses unlocked by this one).
    pub fn successors(&self, id: &CourseId) -> &[CourseId] {
        self.outgoing.get(id).map(|v| v.as_slice()).unwrap_or(&[])
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// All edges, ordered by source insertion order then edge insertion
    /// order — deterministic for a deterministically built graph.
    pub fn edges(&self) -> impl Iterator<Item = PrereqEdge> + '_ {
        self.order.iter().flat_map(move |src| {
            self.successors(src)
                .iter()
                .map(move |dst| PrereqEdge::new(src.clone(), dst.clone()))
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn course(code: &str) -> Course {
        Course::new(code, format!("Course {code}"))
    }

    #[test]
    fn test_add_course_is_keyed_by_code() {
        let mut g = CourseGraph::new();
        assert!(g.add_course(course("A")));
        assert!(!g.add_course(course("A")));
        assert_eq!(g.node_count(), 1);
    }

    #[test]
    fn test_add_edge_idempotent() {
        let mut g = CourseGraph::new();
        g.add_course(course("A"));
        g.add_course(course("B"));

        assert!(g.add_edge(&"A".into(), &"B".into()).unwrap());
        assert!(!g.add_edge(&"A".into(), &"B".into()).unwrap());
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.successors(&"A".into()), &[CourseId::from("B")]);
        assert_eq!(g.predecessors(&"B".into()), &[CourseId::from("A")]);
    }

    #[test]
    fn test_add_edge_unknown_endpoint() {
        let mut g = CourseGraph::new();
        g.add_course(course("A"));
        assert!(g.add_edge(&"A".into(), &"Z".into()).is_err());
        assert!(g.add_edge(&"Z".into(), &"A".into()).is_err());
    }

    #[test]
    fn test_remove_edge() {
        let mut g = CourseGraph::new();
        g.add_course(course("A"));
        g.add_course(course("B"));
        g.add_edge(&"A".into(), &"B".into()).unwrap();

        assert!(g.remove_edge(&"A".into(), &"B".into()));
        assert!(!g.remove_edge(&"A".into(), &"B".into()));
        assert_eq!(g.edge_count(), 0);
        assert!(g.predecessors(&"B".into()).is_empty());
    }

    #[test]
    fn test_self_loop_tolerated() {
        let mut g = CourseGraph::new();
        g.add_course(course("A"));
        assert!(g.add_edge(&"A".into(), &"A".into()).unwrap());
        assert_eq!(g.successors(&"A".into()), &[CourseId::from("A")]);
        assert_eq!(g.predecessors(&"A".into()), &[CourseId::from("A")]);
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn test_course_ids_preserve_insertion_order() {
        let mut g = CourseGraph::new();
        for code in ["C", "A", "B"] {
            g.add_course(course(code));
        }
        let ids: Vec<&str> = g.course_ids().iter().map(|id| id.as_str()).collect();
        assert_eq!(ids, vec!["C", "A", "B"]);
    }

    #[test]
    fn test_edges_iteration_deterministic() {
        let mut g = CourseGraph::new();
        for code in ["A", "B", "C"] {
            g.add_course(course(code));
        }
        g.add_edge(&"A".into(), &"C".into()).unwrap();
        g.add_edge(&"A".into(), &"B".into()).unwrap();
        g.add_edge(&"B".into(), &"C".into()).unwrap();

        let edges: Vec<(String, String)> = g
            .edges()
            .map(|e| (e.src.0.clone(), e.dst.0.clone()))
            .collect();
        assert_eq!(
            edges,
            vec![
                ("A".into(), "C".into()),
                ("A".into(), "B".into()),
                ("B".into(), "C".into()),
            ]
        );
    }
}
