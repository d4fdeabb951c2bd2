//! BIMV Constraint
//!
//! Attribute-level checks over instance sets and the findings they produce.
//!
//! Responsibilities:
//! - Filter instance sets on attribute predicates and member counts
//! - Narrow instance sets into nested, owner-tracking scopes
//! - Detect duplicate attribute values
//! - Check instance counts per type
//! - Render findings as text and structured records

mod count;
mod error;
mod filter;
mod finding;
mod render;
mod scope;
mod unique;

pub use count::{check_instance_count, InstanceBound};
pub use error::{ConstraintError, ConstraintResult};
pub use filter::{filter_by_attribute, filter_by_member_count, AttrPredicate, CountConstraint};
pub use finding::{Finding, Findings};
pub use render::{elide, ELIDE_THRESHOLD};
pub use scope::{narrow_by_attribute_values, ScopeChain, ScopeEntry};
pub use unique::{check_unique, unique_across, unique_among_members, unique_in_scope, MissingValuePolicy};
