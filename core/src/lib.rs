//! BIMV Core Types
//!
//! This crate provides the foundational types used throughout BIMV:
//! - Identity types (InstanceId, TypeId)
//! - Value types (the Value enum with scalar, reference and aggregate values)
//! - Entity structures (Instance, InstanceRef)
//! - Geometry primitives (Vertex, Edge, OrientationMode)
//! - Common error types

mod entity;
mod error;
mod geometry;
mod id;
mod value;

pub use entity::*;
pub use error::*;
pub use geometry::*;
pub use id::*;
pub use value::*;
