//! BIMV Graph
//!
//! In-memory model snapshot and the read-only `Model` capability set that
//! every checker consumes. Provides:
//! - Instance storage with type and inverse reference indexes
//! - Subtype-aware lookup by type
//! - Reference closure of an instance
//! - File header metadata

mod graph;
mod header;
mod index;
mod model;

pub use graph::Graph;
pub use header::FileHeader;
pub use index::{InverseIndex, TypeIndex};
pub use model::Model;
