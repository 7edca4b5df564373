//! Course (node) in the prerequisite graph.

use serde::{Deserialize, Serialize};

use super::CourseAttrs;

/// Unique course code, the primary key of a course in the catalog
/// (e.g. `"DIM0124"`). Immutable once the graph is built.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CourseId(pub String);

impl CourseId {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CourseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CourseId {
    fn from(code: &str) -> Self {
        Self(code.to_owned())
    }
}

impl From<String> for CourseId {
    fn from(code: String) -> Self {
        Self(code)
    }
}

/// A course in the prerequisite graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: CourseId,
    /// Display name as it appears in the catalog.
    pub name: String,
    /// Categorical attributes (read-only after load).
    pub attrs: CourseAttrs,
}

impl Course {
    pub fn new(id: impl Into<CourseId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            attrs: CourseAttrs::default(),
        }
    }

    pub fn with_attrs(mut self, attrs: CourseAttrs) -> Self {
        self.attrs = attrs;
        self
    }
}
