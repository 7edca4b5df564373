//! Embedding oracle adapter.
//!
//! Structural embeddings are produced by an external model trained over
//! the *original* (possibly cyclic) graph. The core never computes them;
//! it consumes them through the [`EmbeddingSource`] seam, so tests and
//! alternative models plug in without touching the similarity engine.

use hashbrown::HashMap;

use crate::model::CourseId;

/// Pure `course -> vector` lookup.
///
/// Returns `None` for a course absent from the oracle's output rather
/// than raising — a missing vector is data noise, not an error.
pub trait EmbeddingSource {
    fn vector_of(&self, id: &CourseId) -> Option<&[f32]>;
}

/// Map-backed [`EmbeddingSource`] holding previously computed vectors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmbeddingTable {
    vectors: HashMap<CourseId, Vec<f32>>,
}

impl EmbeddingTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a vector, replacing any previous one for the same course.
    pub fn insert(&mut self, id: impl Into<CourseId>, vector: Vec<f32>) {
        self.vectors.insert(id.into(), vector);
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Dimension of the stored vectors, from an arbitrary entry.
    pub fn dimension(&self) -> Option<usize> {
        self.vectors.values().next().map(Vec::len)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CourseId, &[f32])> {
        self.vectors.iter().map(|(id, v)| (id, v.as_slice()))
    }
}

impl EmbeddingSource for EmbeddingTable {
    fn vector_of(&self, id: &CourseId) -> Option<&[f32]> {
        self.vectors.get(id).map(Vec::as_slice)
    }
}

impl FromIterator<(CourseId, Vec<f32>)> for EmbeddingTable {
    fn from_iter<T: IntoIterator<Item = (CourseId, Vec<f32>)>>(iter: T) -> Self {
        Self {
            vectors: iter.into_iter().collect(),
        }
    }
}
