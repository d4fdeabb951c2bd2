//! BIMV Rule
//!
//! Declarative validation rules over a model snapshot.
//!
//! Responsibilities:
//! - Load rule sets from JSON
//! - Select and narrow instance sets
//! - Run one check per rule and collect findings
//! - Render outcomes as text or JSON lines

mod engine;
mod error;
mod outcome;
mod params;

pub use engine::{evaluate, EvalContext, RuleEngine};
pub use error::{RuleError, RuleResult};
pub use outcome::{OutputFormat, RuleOutcome};
pub use params::{FileCondition, FileField, Given, Literal, Rule, RuleSet, Then};
