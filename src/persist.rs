//! Artifact persistence — round-trip the intermediate pipeline state.
//!
//! Three artifacts let a run be split or replayed without rebuilding:
//!
//! | Artifact   | Format                                     |
//! |------------|--------------------------------------------|
//! | graph      | JSON document of nodes + tagged edges      |
//! | depths     | flat text, one `code: depth` line per node |
//! | embeddings | TSV, code column + one column per dimension|
//!
//! Writers take `&mut dyn Write`; readers take `impl BufRead`. Rows are
//! written in sorted code order so a dump is reproducible byte-for-byte.

use std::io::{BufRead, Write};

use serde::{Deserialize, Serialize};

use crate::embedding::EmbeddingTable;
use crate::graph::{CourseGraph, DepthMap};
use crate::model::{Course, CourseId, PrereqEdge};
use crate::{Error, Result};

// ============================================================================
// Graph interchange
// ============================================================================

/// Serialized form of a [`CourseGraph`]: node metadata plus edges with
/// their relation-kind tags.
#[derive(Debug, Serialize, Deserialize)]
struct GraphDoc {
    nodes: Vec<Course>,
    edges: Vec<PrereqEdge>,
}

/// Dump the graph as a JSON interchange document.
pub fn save_graph(graph: &CourseGraph, writer: &mut dyn Write) -> Result<()> {
    let doc = GraphDoc {
        nodes: graph.courses().cloned().collect(),
        edges: graph.edges().collect(),
    };
    serde_json::to_writer_pretty(writer, &doc)?;
    Ok(())
}

/// Rebuild a graph from its JSON interchange document. Node and edge
/// insertion order follow document order, preserving enumeration order
/// across the round trip.
pub fn load_graph(reader: impl BufRead) -> Result<CourseGraph> {
    let doc: GraphDoc = serde_json::from_reader(reader)?;

    let mut graph = CourseGraph::new();
    for course in doc.nodes {
        graph.add_course(course);
    }
    for edge in &doc.edges {
        graph.add_edge(&edge.src, &edge.dst)?;
    }
    Ok(graph)
}

// ============================================================================
// Depth map
// ============================================================================

/// Dump the depth map, one `code: depth` line per node, sorted by code.
pub fn save_depths(depths: &DepthMap, writer: &mut dyn Write) -> Result<()> {
    let mut entries: Vec<(&CourseId, u32)> = depths.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));

    for (id, depth) in entries {
        writeln!(writer, "{id}: {depth}")?;
    }
    Ok(())
}

/// Reload a depth map written by [`save_depths`].
pub fn load_depths(reader: impl BufRead) -> Result<DepthMap> {
    let mut entries = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let (code, depth) = line
            .split_once(':')
            .ok_or_else(|| Error::Artifact(format!("depth line without separator: {line:?}")))?;
        let depth: u32 = depth
            .trim()
            .parse()
            .map_err(|_| Error::Artifact(format!("unparseable depth in line: {line:?}")))?;
        entries.push((CourseId::new(code.trim()), depth));
    }
    Ok(DepthMap::from_entries(entries))
}

// ============================================================================
// Embedding table
// ============================================================================

/// Dump the embedding table as TSV: a `course` column followed by one
/// column per vector dimension, rows sorted by code.
pub fn save_embeddings(table: &EmbeddingTable, writer: &mut dyn Write) -> Result<()> {
    let dimension = table.dimension().unwrap_or(0);
    let header: Vec<String> = std::iter::once("course".to_owned())
        .chain((0..dimension).map(|d| format!("d{d}")))
        .collect();
    writeln!(writer, "{}", header.join("\t"))?;

    let mut entries: Vec<(&CourseId, &[f32])> = table.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));

    for (id, vector) in entries {
        let cells: Vec<String> = std::iter::once(id.to_string())
            .chain(vector.iter().map(f32::to_string))
            .collect();
        writeln!(writer, "{}", cells.join("\t"))?;
    }
    Ok(())
}

/// Reload an embedding table written by [`save_embeddings`].
pub fn load_embeddings(reader: impl BufRead) -> Result<EmbeddingTable> {
    let mut lines = reader.lines();
    let _header = lines
        .next()
        .transpose()?
        .ok_or_else(|| Error::Artifact("embedding table is empty".to_owned()))?;

    let mut table = EmbeddingTable::new();
    for line in lines {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let mut cells = line.split('\t');
        let code = cells
            .next()
            .ok_or_else(|| Error::Artifact("embedding row without course code".to_owned()))?;

        let mut vector = Vec::new();
        for value in cells {
            let value: f32 = value.trim().parse().map_err(|_| {
                Error::Artifact(format!("unparseable embedding value in row for {code}"))
            })?;
            vector.push(value);
        }
        table.insert(code.trim(), vector);
    }
    Ok(table)
}

// ============================================================================
// Tests
// ============================================================================
