//! BIMV Traverse
//!
//! Follow relationship instances between typed instances using the
//! relating/related accessor table of the schema.
//!
//! Responsibilities:
//! - Collect instances reachable over a relationship, optionally in two hops
//! - Check that related instances are assigned to containers of the right type
//! - Check that contained elements are placed relative to their container

mod error;
mod placement;
mod structure;
mod traversal;


pub use error::{TraverseError, TraverseResult};
pub use placement::{check_placement, PlacementCheck};
pub use structure::{check_structural_assignment, Assignment, Presence, PresenceCondition};
pub use traversal::{traverse, Role, Traversal};
