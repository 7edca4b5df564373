//! Cycle elimination — greedy edge deletion until the graph is a DAG.
//!
//! Catalog data contains genuine prerequisite cycles (mutual
//! recommendations, stale rows). Curricular depth is only defined on an
//! acyclic graph, so the pipeline strips cycles first:
//!
//! ```text
//! while some cycle exists:
//!     delete the FIRST edge of the cycle found
//! ```
//!
//! This is greedy, **not** a minimum feedback-arc-set: the edges removed
//! depend on traversal order and may be more than strictly necessary.
//! That is a deliberate tradeoff — the optimal problem is NP-hard, and
//! swapping in a smarter solver would shift every downstream depth
//! value, so the greedy policy is part of the observable contract.
//!
//! Termination: every iteration deletes one edge, so the loop runs at
//! most `edge_count` times.

use hashbrown::HashMap;

use crate::model::{CourseId, PrereqEdge};
use super::CourseGraph;

/// Result of cycle elimination: the DAG plus what was cut to get there.
#[derive(Debug, Clone)]
pub struct AcyclicReduction {
    pub dag: CourseGraph,
    /// Edges deleted, in deletion order. Empty iff the input was
    /// already acyclic.
    pub removed: Vec<PrereqEdge>,
}

/// Strip edges from a private copy of `graph` until no directed cycle
/// remains. The input graph is never mutated — raw Jaccard and the
/// embedding oracle keep seeing the original, possibly cyclic structure.
pub fn reduce_to_dag(graph: &CourseGraph) -> AcyclicReduction {
    let mut dag = graph.clone();
    let mut removed = Vec::new();

    while let Some(cycle) = find_cycle(&dag) {
        let (src, dst) = cycle[0].clone();
        dag.remove_edge(&src, &dst);
        tracing::debug!(%src, %dst, cycle_len = cycle.len(), "cycle broken");
        removed.push(PrereqEdge::new(src, dst));
    }

    if !removed.is_empty() {
        tracing::info!(edges_removed = removed.len(), "graph reduced to DAG");
    }
    AcyclicReduction { dag, removed }
}

#[derive(Clone, Copy, PartialEq)]
enum Mark {
    /// On the current DFS path.
    Active,
    /// Fully explored, known cycle-free.
    Done,
}

/// Find one directed cycle as an ordered edge sequence, or `None` if the
/// graph is acyclic. A self-loop is reported as a single-edge cycle.
fn find_cycle(graph: &CourseGraph) -> Option<Vec<(CourseId, CourseId)>> {
    let mut marks: HashMap<CourseId, Mark> = HashMap::new();

    for start in graph.course_ids() {
        if marks.contains_key(start) {
            continue;
        }

        // Iterative DFS: (node, index of the next successor to visit).
        let mut stack: Vec<(CourseId, usize)> = vec![(start.clone(), 0)];
        marks.insert(start.clone(), Mark::Active);

        while !stack.is_empty() {
            let top = stack.len() - 1;
            let node = stack[top].0.clone();
            let idx = stack[top].1;
            let succs = graph.successors(&node);

            if idx >= succs.len() {
                marks.insert(node, Mark::Done);
                stack.pop();
                continue;
            }
            stack[top].1 += 1;
            let next = succs[idx].clone();

            match marks.get(&next) {
                Some(Mark::Active) => {
                    // `next` is on the path: the cycle runs next -> ... -> node -> next.
                    let pos = stack
                        .iter()
                        .position(|(n, _)| *n == next)
                        .expect("active mark implies presence on the DFS stack");
                    let mut cycle = Vec::with_capacity(stack.len() - pos);
                    for w in pos..stack.len() - 1 {
                        cycle.push((stack[w].0.clone(), stack[w + 1].0.clone()));
                    }
                    cycle.push((node, next));
                    return Some(cycle);
                }
                Some(Mark::Done) => {}
                None => {
                    marks.insert(next.clone(), Mark::Active);
                    stack.push((next, 0));
                }
            }
        }
    }

    None
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Course;

    fn graph(codes: &[&str], edges: &[(&str, &str)]) -> CourseGraph {
        let mut g = CourseGraph::new();
        for code in codes {
            g.add_course(Course::new(*code, format!("Course {code}")));
        }
        for (src, dst) in edges {
            g.add_edge(&(*src).into(), &(*dst).into()).unwrap();
        }
        g
    }

    fn is_acyclic(g: &CourseGraph) -> bool {
        find_cycle(g).is_none()
    }

    #[test]
    fn test_acyclic_input_unchanged() {
        let g = graph(&["A", "B", "C"], &[("A", "B"), ("B", "C"), ("A", "C")]);
        let reduction = reduce_to_dag(&g);

        assert!(reduction.removed.is_empty());
        assert_eq!(reduction.dag.edge_count(), 3);
        assert!(is_acyclic(&reduction.dag));
    }

    #[test]
    fn test_two_cycle_breaks_one_edge() {
        let g = graph(&["A", "B"], &[("A", "B"), ("B", "A")]);
        let reduction = reduce_to_dag(&g);

        assert_eq!(reduction.removed.len(), 1);
        assert_eq!(reduction.dag.edge_count(), 1);
        assert!(is_acyclic(&reduction.dag));
    }

    #[test]
    fn test_self_loop_is_a_cycle() {
        let mut g = graph(&["A", "B"], &[("A", "B")]);
        g.add_edge(&"A".into(), &"A".into()).unwrap();

        let reduction = reduce_to_dag(&g);
        assert_eq!(reduction.removed.len(), 1);
        assert!(reduction.removed[0].is_self_loop());
        assert!(reduction.dag.contains_edge(&"A".into(), &"B".into()));
    }

    #[test]
    fn test_long_cycle() {
        let g = graph(
            &["A", "B", "C", "D"],
            &[("A", "B"), ("B", "C"), ("C", "D"), ("D", "A")],
        );
        let reduction = reduce_to_dag(&g);

        assert_eq!(reduction.removed.len(), 1);
        assert!(is_acyclic(&reduction.dag));
        assert_eq!(reduction.dag.edge_count(), 3);
    }

    #[test]
    fn test_multiple_disjoint_cycles() {
        let g = graph(
            &["A", "B", "C", "D"],
            &[("A", "B"), ("B", "A"), ("C", "D"), ("D", "C")],
        );
        let reduction = reduce_to_dag(&g);

        assert_eq!(reduction.removed.len(), 2);
        assert!(is_acyclic(&reduction.dag));
    }

    #[test]
    fn test_original_graph_not_mutated() {
        let g = graph(&["A", "B"], &[("A", "B"), ("B", "A")]);
        let _ = reduce_to_dag(&g);
        assert_eq!(g.edge_count(), 2);
    }

    #[test]
    fn test_nodes_survive_reduction() {
        let g = graph(&["A", "B", "C"], &[("A", "B"), ("B", "A")]);
        let reduction = reduce_to_dag(&g);
        assert_eq!(reduction.dag.node_count(), 3);
    }
}
