//! # Prerequisite Graph Model
//!
//! Clean DTOs for the course catalog: courses, their categorical
//! attributes, and directed prerequisite edges. These types cross every
//! boundary: builder ↔ graph ↔ similarity ↔ persistence.
//!
//! Design rule: this module is pure data — no I/O, no graph state.

pub mod attrs;
pub mod course;
pub mod edge;

pub use attrs::{AttrField, CourseAttrs};
pub use course::{Course, CourseId};
pub use edge::{PrereqEdge, PREREQUISITE};
