//! BIMV Mesh
//!
//! Face set topology checks.
//!
//! Responsibilities:
//! - Classify face set encodings
//! - Decode loop based and indexed face sets into canonical edges
//! - Count edge usage and report edges used an unexpected number of times

mod decode;
mod error;
mod usage;

#[cfg(test)]
mod testing;

pub use decode::{decode_edges, FaceTopology};
pub use error::{MeshError, MeshResult};
pub use usage::{check_edge_usage, EdgeMultiset};
