//! Prerequisite edge — directed relation between two courses.

use serde::{Deserialize, Serialize};

use super::CourseId;

/// Relation-kind tag carried by every edge the builder produces.
pub const PREREQUISITE: &str = "prerequisite";

/// A directed edge `src -> dst`: `src` must be taken before `dst`.
///
/// Edges are tagged with a relation kind so the interchange format can
/// grow other relation types without a schema change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrereqEdge {
    pub src: CourseId,
    pub dst: CourseId,
    pub kind: String,
}

impl PrereqEdge {
    pub fn new(src: impl Into<CourseId>, dst: impl Into<CourseId>) -> Self {
        Self {
            src: src.into(),
            dst: dst.into(),
            kind: PREREQUISITE.to_owned(),
        }
    }

    pub fn is_self_loop(&self) -> bool {
        self.src == self.dst
    }
}
