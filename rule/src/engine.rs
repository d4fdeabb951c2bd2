//! Rule evaluation.

use crate::error::RuleResult;
use crate::outcome::RuleOutcome;
use crate::params::{FileCondition, FileField, Given, Rule, RuleSet, Then};
use bimv_constraint::{
    check_instance_count, filter_by_attribute, filter_by_member_count,
    narrow_by_attribute_values, unique_across, unique_among_members, unique_in_scope,
    AttrPredicate, Findings, ScopeChain,
};
use bimv_core::{InstanceId, OrientationMode, Value};
use bimv_graph::Model;
use bimv_mesh::check_edge_usage;
use bimv_traverse::{check_placement, check_structural_assignment, traverse};
use tracing::{debug, trace, warn};

/// Working state of one rule evaluation.
#[derive(Debug, Clone, Default)]
pub struct EvalContext {
    /// Current working set.
    pub instances: Vec<InstanceId>,
    /// Narrowing scopes pushed so far.
    pub scope: ScopeChain,
    /// False once a file condition excluded the model.
    pub applicable: bool,
}

impl EvalContext {
    pub fn new() -> Self {
        Self {
            applicable: true,
            ..Self::default()
        }
    }
}

/// Evaluates rules against one model snapshot.
pub struct RuleEngine<'m> {
    model: &'m dyn Model,
}

impl<'m> RuleEngine<'m> {
    /// Create a new rule engine.
    pub fn new(model: &'m dyn Model) -> Self {
        Self { model }
    }

    /// Evaluate one rule.
    pub fn evaluate(&self, rule: &Rule) -> RuleResult<RuleOutcome> {
        debug!(rule = %rule.name, steps = rule.given.len(), "evaluating rule");

        let result = self.run(rule);
        match &result {
            Ok(outcome) if !outcome.applicable => {
                debug!(rule = %rule.name, "rule not applicable")
            }
            Ok(outcome) => {
                debug!(rule = %rule.name, findings = outcome.findings.len(), "rule evaluated")
            }
            Err(e) => warn!(rule = %rule.name, error = %e, "rule aborted"),
        }
        result
    }

    /// Evaluate every rule of a set, stopping at the first fatal error.
    pub fn evaluate_all(&self, rules: &RuleSet) -> RuleResult<Vec<RuleOutcome>> {
        rules.rules.iter().map(|rule| self.evaluate(rule)).collect()
    }

    fn run(&self, rule: &Rule) -> RuleResult<RuleOutcome> {
        let mut ctx = EvalContext::new();
        for step in &rule.given {
            self.apply(&mut ctx, step)?;
            if !ctx.applicable {
                return Ok(RuleOutcome::not_applicable(&rule.name));
            }
        }
        let findings = self.check(&ctx, &rule.then)?;
        Ok(RuleOutcome::new(&rule.name, findings))
    }

    // ==================== Given ====================

    /// Apply a selection step to the context.
    pub fn apply(&self, ctx: &mut EvalContext, step: &Given) -> RuleResult<()> {
        let model = self.model;
        match step {
            Given::Entity(entity) => {
                ctx.instances = model.by_type(entity);
                ctx.scope = ScopeChain::new();
            }
            Given::AttributeEquals { attribute, value } => {
                let predicate = AttrPredicate::Equals(Value::from(value));
                ctx.instances = filter_by_attribute(model, &ctx.instances, attribute, &predicate);
            }
            Given::AttributeMatches { attribute, pattern } => {
                let predicate = AttrPredicate::matches(pattern)?;
                ctx.instances = filter_by_attribute(model, &ctx.instances, attribute, &predicate);
            }
            Given::MemberCount {
                attribute,
                constraint,
                count,
            } => {
                ctx.instances =
                    filter_by_member_count(model, &ctx.instances, attribute, *constraint, *count);
            }
            Given::AttributeValues { attribute } => {
                ctx.scope = narrow_by_attribute_values(model, &ctx.instances, attribute, &ctx.scope);
                ctx.instances = ctx.scope.instances();
            }
            Given::Related(traversal) => {
                ctx.instances = traverse(model, traversal)?;
                ctx.scope = ScopeChain::new();
            }
            Given::File(condition) => {
                ctx.applicable = ctx.applicable && file_condition_holds(model, condition);
            }
        }
        trace!(?step, instances = ctx.instances.len(), "applied step");
        Ok(())
    }

    // ==================== Then ====================

    /// Run the check of a rule on a prepared context.
    pub fn check(&self, ctx: &EvalContext, then: &Then) -> RuleResult<Findings> {
        let model = self.model;
        let findings = match then {
            Then::EdgesReferenced { expected, oriented } => {
                let mode = if *oriented {
                    OrientationMode::Oriented
                } else {
                    OrientationMode::Unordered
                };
                check_edge_usage(model, &ctx.instances, *expected, mode)?
            }
            Then::InstanceCount {
                constraint,
                count,
                entity,
            } => check_instance_count(model, entity, *constraint, *count)
                .into_iter()
                .collect(),
            Then::UniqueValues { attribute, missing } => {
                if ctx.scope.is_empty() {
                    unique_across(model, &ctx.instances, attribute, None, *missing)
                        .into_iter()
                        .collect()
                } else {
                    // Groups only keep members that survived later filters.
                    ctx.scope
                        .values()
                        .filter_map(|group| {
                            let members: Vec<InstanceId> = group
                                .refs()
                                .into_iter()
                                .filter(|id| ctx.instances.contains(id))
                                .collect();
                            unique_across(model, &members, attribute, Some(&ctx.scope), *missing)
                        })
                        .collect()
                }
            }
            Then::UniqueInScope { attribute, missing } => {
                unique_in_scope(model, &ctx.scope, attribute, *missing)
            }
            Then::UniqueMembers {
                member_attribute,
                attribute,
                missing,
            } => unique_among_members(model, &ctx.instances, member_attribute, attribute, *missing),
            Then::AssignedTo(assignment) => check_structural_assignment(model, assignment)?,
            Then::PlacedRelativeToContainer(check) => check_placement(model, check)?,
        };
        Ok(findings)
    }
}

/// Evaluate one rule against a model.
pub fn evaluate(model: &dyn Model, rule: &Rule) -> RuleResult<RuleOutcome> {
    RuleEngine::new(model).evaluate(rule)
}

fn file_condition_holds(model: &dyn Model, condition: &FileCondition) -> bool {
    let header = model.header();
    let actual = match condition.field {
        FileField::SchemaIdentifier => header.schema(),
        FileField::ModelViewDefinition => header.model_view_definition(),
    };
    actual.is_some_and(|actual| {
        condition
            .values
            .iter()
            .any(|value| value.eq_ignore_ascii_case(actual))
    })
}
