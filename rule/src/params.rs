//! Typed rule definitions.
//!
//! Rules are data: a list of `Given` steps that select and narrow an
//! instance set, followed by one `Then` check. All types deserialize from
//! JSON so hosts can ship rule sets as configuration.

use crate::error::{RuleError, RuleResult};
use bimv_constraint::{CountConstraint, InstanceBound, MissingValuePolicy};
use bimv_core::Value;
use bimv_traverse::{Assignment, PlacementCheck, Traversal};
use serde::Deserialize;

/// Literal attribute value in a rule definition.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Literal {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<Literal>),
}

impl From<&Literal> for Value {
    fn from(literal: &Literal) -> Self {
        match literal {
            Literal::Bool(b) => Value::Bool(*b),
            Literal::Int(i) => Value::Int(*i),
            Literal::Float(f) => Value::Float(*f),
            Literal::String(s) => Value::String(s.clone()),
            Literal::List(items) => Value::List(items.iter().map(Value::from).collect()),
        }
    }
}

/// Header field a file condition reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileField {
    SchemaIdentifier,
    ModelViewDefinition,
}

/// The rule applies only when `field` equals one of `values`, ignoring case.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FileCondition {
    pub field: FileField,
    pub values: Vec<String>,
}

/// Selection and narrowing steps.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Given {
    /// All instances of a type, subtypes included.
    Entity(String),
    AttributeEquals {
        attribute: String,
        value: Literal,
    },
    AttributeMatches {
        attribute: String,
        pattern: String,
    },
    MemberCount {
        attribute: String,
        constraint: CountConstraint,
        count: usize,
    },
    /// Narrow to the values of an attribute, remembering their owners.
    AttributeValues {
        attribute: String,
    },
    /// Replace the working set with the instances reached by a traversal.
    Related(Traversal),
    File(FileCondition),
}

/// The check a rule performs on its working set.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Then {
    EdgesReferenced {
        expected: usize,
        #[serde(default)]
        oriented: bool,
    },
    InstanceCount {
        constraint: InstanceBound,
        count: usize,
        entity: String,
    },
    /// Values unique across each narrowed group, attributed to the scope owner.
    UniqueValues {
        attribute: String,
        #[serde(default)]
        missing: MissingValuePolicy,
    },
    /// Values unique among the instances of every scope pair.
    UniqueInScope {
        attribute: String,
        #[serde(default)]
        missing: MissingValuePolicy,
    },
    /// Values unique among the members of every instance.
    UniqueMembers {
        member_attribute: String,
        attribute: String,
        #[serde(default)]
        missing: MissingValuePolicy,
    },
    AssignedTo(Assignment),
    PlacedRelativeToContainer(PlacementCheck),
}

/// A named rule.
#[derive(Debug, Clone, Deserialize)]
pub struct Rule {
    pub name: String,
    #[serde(default)]
    pub given: Vec<Given>,
    pub then: Then,
}

/// A collection of rules loaded together.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RuleSet {
    pub rules: Vec<Rule>,
}

impl RuleSet {
    /// Parse a rule set from JSON.
    pub fn from_json(json: &str) -> RuleResult<Self> {
        serde_json::from_str(json).map_err(|e| RuleError::invalid_definition(e.to_string()))
    }

    pub fn get(&self, name: &str) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.name == name)
    }
}
