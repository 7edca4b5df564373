//! Categorical course attributes — the T/P/E/I tuple.

use serde::{Deserialize, Serialize};

/// The four categorical attribute columns of the catalog.
///
/// Values are compared as exact tokens, never interpreted numerically.
/// A field may be absent for a given course; two courses match on a
/// field only when both carry the same token **or both are absent**.
/// Differing presence is a mismatch — absence is not a wildcard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseAttrs {
    pub t: Option<String>,
    pub p: Option<String>,
    pub e: Option<String>,
    pub i: Option<String>,
}

impl CourseAttrs {
    pub fn new(
        t: Option<String>,
        p: Option<String>,
        e: Option<String>,
        i: Option<String>,
    ) -> Self {
        Self { t, p, e, i }
    }

    /// The value of a single field.
    pub fn field(&self, field: AttrField) -> Option<&str> {
        match field {
            AttrField::T => self.t.as_deref(),
            AttrField::P => self.p.as_deref(),
            AttrField::E => self.e.as_deref(),
            AttrField::I => self.i.as_deref(),
        }
    }

    /// Exact match over the given fields, short-circuiting on the first
    /// mismatch. `None == None` counts as a match.
    pub fn matches_on(&self, other: &CourseAttrs, fields: &[AttrField]) -> bool {
        fields.iter().all(|&f| self.field(f) == other.field(f))
    }
}

/// Selector for one attribute column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttrField {
    T,
    P,
    E,
    I,
}

impl AttrField {
    /// All four columns, in catalog order.
    pub const ALL: [AttrField; 4] = [AttrField::T, AttrField::P, AttrField::E, AttrField::I];

    pub fn as_str(&self) -> &'static str {
        match self {
            AttrField::T => "T",
            AttrField::P => "P",
            AttrField::E => "E",
            AttrField::I => "I",
        }
    }
}

impl std::fmt::Display for AttrField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
