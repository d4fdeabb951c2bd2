//! Assertion types and builders for verifying rule outcomes.

use bimv_rule::{OutputFormat, RuleError, RuleOutcome};

use crate::error::{TestError, TestResult};

/// A complete assertion for a step outcome.
#[derive(Debug, Default)]
pub struct Assertion {
    // Status assertions
    pub passed: Option<bool>,
    pub applicable: Option<bool>,

    // Finding assertions
    pub findings: Option<usize>,
    pub kinds: Vec<String>,
    pub messages: Vec<String>,
    pub message_patterns: Vec<String>,
    pub subjects: Option<Vec<u64>>,

    // Error assertions
    pub error: Option<String>,
}

impl Assertion {
    /// Create a new empty assertion.
    pub fn new() -> Self {
        Self::default()
    }

    /// Verify the assertion against an outcome.
    pub fn verify(&self, step: &str, result: &Result<RuleOutcome, RuleError>) -> TestResult<()> {
        // Check error expectations first
        if let Some(ref expected_error) = self.error {
            return match result {
                Err(e) if e.to_string().contains(expected_error) => Ok(()),
                Err(e) => Err(TestError::assertion_failed(
                    step,
                    format!("expected error containing '{}', got: {}", expected_error, e),
                )),
                Ok(_) => Err(TestError::assertion_failed(
                    step,
                    format!("expected error containing '{}', but step succeeded", expected_error),
                )),
            };
        }

        let outcome = match result {
            Ok(outcome) => outcome,
            Err(e) => {
                return Err(TestError::assertion_failed(step, format!("unexpected error: {}", e)))
            }
        };

        if let Some(expected) = self.passed {
            if outcome.passed() != expected {
                return Err(TestError::assertion_failed(
                    step,
                    format!(
                        "expected {}, got:\n{}",
                        if expected { "pass" } else { "failure" },
                        describe(outcome)
                    ),
                ));
            }
        }

        if let Some(expected) = self.applicable {
            if outcome.applicable != expected {
                return Err(TestError::assertion_failed(
                    step,
                    format!("expected applicable={}, got {}", expected, outcome.applicable),
                ));
            }
        }

        if let Some(expected) = self.findings {
            if outcome.findings.len() != expected {
                return Err(TestError::assertion_failed(
                    step,
                    format!(
                        "expected {} findings, got {}:\n{}",
                        expected,
                        outcome.findings.len(),
                        describe(outcome)
                    ),
                ));
            }
        }

        for kind in &self.kinds {
            if !outcome.findings.iter().any(|f| f.kind() == kind.as_str()) {
                return Err(TestError::assertion_failed(
                    step,
                    format!("expected a '{}' finding, got:\n{}", kind, describe(outcome)),
                ));
            }
        }

        let messages: Vec<String> = outcome.findings.iter().map(|f| f.to_string()).collect();

        for expected in &self.messages {
            if !messages.iter().any(|m| m.contains(expected.as_str())) {
                return Err(TestError::assertion_failed(
                    step,
                    format!("no finding message contains '{}', got:\n{}", expected, describe(outcome)),
                ));
            }
        }

        for pattern in &self.message_patterns {
            let re = regex_lite::Regex::new(pattern).map_err(|e| {
                TestError::assertion_failed(step, format!("invalid regex pattern: {}", e))
            })?;
            if !messages.iter().any(|m| re.is_match(m)) {
                return Err(TestError::assertion_failed(
                    step,
                    format!("no finding message matches /{}/, got:\n{}", pattern, describe(outcome)),
                ));
            }
        }

        if let Some(ref expected) = self.subjects {
            let actual: Vec<u64> = outcome
                .findings
                .iter()
                .filter_map(|f| f.subject())
                .map(|s| s.id.raw())
                .collect();
            if &actual != expected {
                return Err(TestError::assertion_failed(
                    step,
                    format!("expected subjects {:?}, got {:?}", expected, actual),
                ));
            }
        }

        Ok(())
    }
}

fn describe(outcome: &RuleOutcome) -> String {
    outcome
        .render(OutputFormat::Plain)
        .unwrap_or_else(|e| format!("<unrenderable outcome: {}>", e))
}

/// Builder for creating assertions fluently.
#[derive(Debug, Default)]
pub struct AssertionBuilder {
    assertion: Assertion,
}

impl AssertionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assert the rule produced no findings.
    pub fn passes(mut self) -> Self {
        self.assertion.passed = Some(true);
        self
    }

    /// Assert the rule produced exactly `n` findings.
    pub fn fails(mut self, n: usize) -> Self {
        self.assertion.passed = Some(false);
        self.assertion.findings = Some(n);
        self
    }

    /// Assert a file condition excluded the model.
    pub fn not_applicable(mut self) -> Self {
        self.assertion.applicable = Some(false);
        self
    }

    /// Assert at least one finding of the given kind.
    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.assertion.kinds.push(kind.into());
        self
    }

    /// Assert some finding message contains the substring.
    pub fn message(mut self, substring: impl Into<String>) -> Self {
        self.assertion.messages.push(substring.into());
        self
    }

    /// Assert some finding message matches the regex.
    pub fn message_matches(mut self, pattern: impl Into<String>) -> Self {
        self.assertion.message_patterns.push(pattern.into());
        self
    }

    /// Assert the subject instance ids of all findings, in order.
    pub fn subjects(mut self, ids: &[u64]) -> Self {
        self.assertion.subjects = Some(ids.to_vec());
        self
    }

    /// Assert the rule aborted with an error containing the substring.
    pub fn error(mut self, substring: impl Into<String>) -> Self {
        self.assertion.error = Some(substring.into());
        self
    }

    pub fn build(self) -> Assertion {
        self.assertion
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_collects_expectations() {
        let assertion = AssertionBuilder::new()
            .fails(2)
            .kind("edge_usage")
            .message("referenced 1 times")
            .build();

        assert_eq!(assertion.passed, Some(false));
        assert_eq!(assertion.findings, Some(2));
        assert_eq!(assertion.kinds, vec!["edge_usage".to_string()]);
    }

    #[test]
    fn test_verify_reports_unexpected_findings() {
        let outcome = RuleOutcome::not_applicable("ifc2x3 only");

        let ok = AssertionBuilder::new().passes().not_applicable().build();
        let wrong = AssertionBuilder::new().fails(1).build();

        assert!(ok.verify("step", &Ok(outcome.clone())).is_ok());
        assert!(matches!(
            wrong.verify("step", &Ok(outcome)),
            Err(TestError::AssertionFailed { .. })
        ));
    }
}
