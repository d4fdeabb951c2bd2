//! Scenario definition and builder.

use bimv_graph::Graph;
use bimv_rule::{Rule, RuleEngine, RuleSet};
use tracing_subscriber::EnvFilter;

use crate::assertion::{Assertion, AssertionBuilder};
use crate::error::{TestError, TestResult};

/// A rule evaluation with its assertion.
#[derive(Debug)]
pub struct Step {
    /// Name of the rule to evaluate.
    pub rule: String,
    /// Assertion to verify the outcome.
    pub assertion: Assertion,
}

/// A model, a rule set, and the expected outcome of each rule.
pub struct Scenario {
    name: String,
    model: Option<Graph>,
    rules: RuleSet,
    steps: Vec<Step>,
}

impl Scenario {
    /// Create a new scenario with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            model: None,
            rules: RuleSet::default(),
            steps: Vec::new(),
        }
    }

    /// Set the model the rules run against.
    pub fn model(mut self, model: Graph) -> Self {
        self.model = Some(model);
        self
    }

    /// Load rules from a JSON rule set.
    pub fn rules_json(mut self, json: &str) -> TestResult<Self> {
        let set = RuleSet::from_json(json)?;
        self.rules.rules.extend(set.rules);
        Ok(self)
    }

    /// Add a single rule.
    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.rules.push(rule);
        self
    }

    /// Add a step evaluating the named rule.
    pub fn step<F>(mut self, rule: impl Into<String>, assertion_fn: F) -> Self
    where
        F: FnOnce(AssertionBuilder) -> AssertionBuilder,
    {
        let assertion = assertion_fn(AssertionBuilder::new()).build();
        self.steps.push(Step {
            rule: rule.into(),
            assertion,
        });
        self
    }

    /// Run every step in order, stopping at the first failed assertion.
    pub fn run(&self) -> TestResult<()> {
        init_tracing();
        let model = self
            .model
            .as_ref()
            .ok_or_else(|| TestError::missing_model(&self.name))?;
        let engine = RuleEngine::new(model);

        for step in &self.steps {
            let rule = self
                .rules
                .get(&step.rule)
                .ok_or_else(|| TestError::rule_not_found(&self.name, &step.rule))?;
            let result = engine.evaluate(rule);
            step.assertion.verify(&step.rule, &result)?;
        }
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }
}

/// Route rule logs to the test harness. Filtered by `RUST_LOG`; silent by
/// default.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off"));
    // Only the first call in a test binary installs the subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scenario_builder() {
        let scenario = Scenario::new("test")
            .rules_json(
                r#"{ "rules": [{ "name": "one project",
                    "then": { "instance_count": { "constraint": "at_least", "count": 1, "entity": "IfcProject" } } }] }"#,
            )
            .unwrap()
            .step("one project", |a| a.passes());

        assert_eq!(scenario.name(), "test");
        assert_eq!(scenario.steps().len(), 1);
    }

    #[test]
    fn test_missing_model() {
        let result = Scenario::new("empty").run();

        assert!(matches!(result, Err(TestError::MissingModel { .. })));
    }
}
