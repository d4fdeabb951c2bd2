//! BIMV Registry
//!
//! Runtime schema lookup: entity types with their inheritance, and the
//! relationship accessor table naming the relating/related attributes of
//! each relationship type. Immutable after construction via RegistryBuilder.

mod builder;
mod registry;
mod types;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use builder::{RegistryBuilder, RegistryError, TypeBuilder};
pub use registry::Registry;
pub use types::*;
