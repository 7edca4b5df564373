//! End-to-end tests for the full similarity pipeline.
//!
//! Each test exercises: records -> graph -> cycle elimination -> depth
//! -> pair enumeration, using a stub embedding table where vectors
//! matter.

use std::io::Cursor;

use curricsim::{
    read_catalog, CatalogColumns, CourseAttrs, CourseRecord, EmbeddingTable, MetricWeights,
    PairConfig, Pipeline,
};
use pretty_assertions::assert_eq;

fn record(code: &str, name: &str) -> CourseRecord {
    CourseRecord::new(code, name)
}

fn attrs(t: &str) -> CourseAttrs {
    CourseAttrs::new(Some(t.to_owned()), Some("0".into()), Some("0".into()), Some("0".into()))
}

// ============================================================================
// 1. Twin root courses with identical embeddings
// ============================================================================

#[test]
fn test_twin_courses_score() {
    // A and B: no predecessors, no successors, same attributes, same vector.
    let records = vec![
        record("A", "Curso A").with_attrs(attrs("1")),
        record("B", "Curso B").with_attrs(attrs("1")),
    ];
    let pipeline = Pipeline::from_records(&records).unwrap();

    let mut embeddings = EmbeddingTable::new();
    embeddings.insert("A", vec![0.5, 0.5, 0.0]);
    embeddings.insert("B", vec![0.5, 0.5, 0.0]);

    let rows: Vec<_> = pipeline
        .similarities(&embeddings, MetricWeights::default(), PairConfig::default())
        .collect();
    assert_eq!(rows.len(), 2); // (A,B) and (B,A)

    let s = &rows[0].scores;
    assert_eq!(s.jaccard_pred, 0.0); // both predecessor sets empty
    assert_eq!(s.jaccard_succ, 0.0);
    assert_eq!(s.depth_similarity, 1.0); // flat graph
    assert!((s.embedding_similarity - 1.0).abs() < 1e-9);
    assert!((s.combined - (0.0 + 0.0 + 1.0 + 1.0) / 4.0).abs() < 1e-9);
}

// ============================================================================
// 2. One shared predecessor out of two in the union
// ============================================================================

#[test]
fn test_half_shared_predecessors() {
    // X -> A, X -> B, Y -> B: predecessor sets {X} and {X, Y}.
    let records = vec![
        record("X", "Base X"),
        record("Y", "Base Y"),
        record("A", "Curso A").with_recommendations("Base X"),
        record("B", "Curso B").with_recommendations("Base X;Base Y"),
    ];
    let pipeline = Pipeline::from_records(&records).unwrap();
    let embeddings = EmbeddingTable::new();

    let rows: Vec<_> = pipeline
        .similarities(&embeddings, MetricWeights::default(), PairConfig::default())
        .collect();

    let ab = rows
        .iter()
        .find(|r| r.a.as_str() == "A" && r.b.as_str() == "B")
        .expect("pair (A, B) accepted");
    assert_eq!(ab.scores.jaccard_pred, 0.5);
}

// ============================================================================
// 3. Flat graph: depth similarity is 1.0 for every pair
// ============================================================================

#[test]
fn test_flat_graph_depth_similarity() {
    let records = vec![
        record("A", "Curso A"),
        record("B", "Curso B"),
        record("C", "Curso C"),
    ];
    let pipeline = Pipeline::from_records(&records).unwrap();
    assert_eq!(pipeline.depths().max_depth(), 0);

    let embeddings = EmbeddingTable::new();
    let rows: Vec<_> = pipeline
        .similarities(&embeddings, MetricWeights::default(), PairConfig::default())
        .collect();

    assert_eq!(rows.len(), 6);
    for row in &rows {
        assert_eq!(row.scores.depth_similarity, 1.0);
    }
}

// ============================================================================
// 4. Cyclic catalog: the pipeline breaks the cycle and reports it
// ============================================================================

#[test]
fn test_cycle_broken_and_reported() {
    let records = vec![
        record("A", "Curso A").with_recommendations("Curso B"),
        record("B", "Curso B").with_recommendations("Curso A"),
    ];
    let pipeline = Pipeline::from_records(&records).unwrap();

    // The original graph keeps both edges; the DAG loses exactly one.
    assert_eq!(pipeline.graph().edge_count(), 2);
    assert_eq!(pipeline.dag().edge_count(), 1);
    assert_eq!(pipeline.removed_edges().len(), 1);
    assert_eq!(pipeline.depths().len(), 2);
}

// ============================================================================
// 5. Jaccard metrics read the original graph, not the DAG
// ============================================================================

#[test]
fn test_jaccard_uses_original_cyclic_graph() {
    // A <-> B cycle plus C depending on both. After reduction one of the
    // cycle edges is gone, but successor sets must still see it.
    let records = vec![
        record("A", "Curso A").with_recommendations("Curso B"),
        record("B", "Curso B").with_recommendations("Curso A"),
        record("C", "Curso C").with_recommendations("Curso A;Curso B"),
    ];
    let pipeline = Pipeline::from_records(&records).unwrap();
    assert_eq!(pipeline.removed_edges().len(), 1);

    let embeddings = EmbeddingTable::new();
    let rows: Vec<_> = pipeline
        .similarities(&embeddings, MetricWeights::default(), PairConfig::default())
        .collect();

    let ab = rows
        .iter()
        .find(|r| r.a.as_str() == "A" && r.b.as_str() == "B")
        .expect("pair (A, B) accepted");
    // Successors in the original graph: A -> {B, C}, B -> {A, C};
    // intersection {C}, union {A, B, C}.
    assert!((ab.scores.jaccard_succ - 1.0 / 3.0).abs() < 1e-12);
}

// ============================================================================
// 6. Catalog text through to the output table
// ============================================================================

#[test]
fn test_catalog_to_output_table() {
    let catalog = "\
codigo\tnome\trecomendacoes\tt\tp\te\ti
MAT1\tCálculo I\t\t60\t0\t\t
MAT2\tCálculo II\tCálculo I\t60\t0\t\t
FIS1\tFísica I\tCálculo I\t60\t0\t\t
";
    let records = read_catalog(Cursor::new(catalog), &CatalogColumns::default()).unwrap();
    let pipeline = Pipeline::from_records(&records).unwrap();

    let mut embeddings = EmbeddingTable::new();
    for (code, v) in [("MAT1", [1.0, 0.0]), ("MAT2", [0.8, 0.2]), ("FIS1", [0.7, 0.3])] {
        embeddings.insert(code, v.to_vec());
    }

    let mut buf = Vec::new();
    let rows = pipeline.similarities(&embeddings, MetricWeights::default(), PairConfig::default());
    let written = curricsim::pairs::write_rows(&mut buf, rows).unwrap();
    let text = String::from_utf8(buf).unwrap();
    let mut lines = text.lines();

    assert_eq!(
        lines.next().unwrap(),
        "course_a\tcourse_b\tscore_combined\tjaccard_pred\tjaccard_succ\tdepth_similarity\tembedding_similarity",
    );
    // All three courses share attributes and sit within depth gap 2:
    // every ordered pair of the 3 nodes is accepted.
    assert_eq!(written, 6);
    assert_eq!(lines.count(), 6);
}
