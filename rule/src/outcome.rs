//! Rule outcomes and their rendering.

use crate::error::{RuleError, RuleResult};
use bimv_constraint::{Finding, Findings};
use serde::Deserialize;
use serde_json::Value as JsonValue;

/// Output format of a rendered outcome.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Status line followed by one message per finding.
    #[default]
    Plain,
    /// One JSON record per finding.
    JsonLines,
}

/// Result of evaluating one rule.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleOutcome {
    pub rule: String,
    /// False when a file condition excluded the model.
    pub applicable: bool,
    pub findings: Findings,
}

impl RuleOutcome {
    pub fn new(rule: impl Into<String>, findings: Findings) -> Self {
        Self {
            rule: rule.into(),
            applicable: true,
            findings,
        }
    }

    pub fn not_applicable(rule: impl Into<String>) -> Self {
        Self {
            rule: rule.into(),
            applicable: false,
            findings: Findings::new(),
        }
    }

    pub fn passed(&self) -> bool {
        self.findings.is_empty()
    }

    /// Render the outcome, listing every finding.
    pub fn render(&self, format: OutputFormat) -> RuleResult<String> {
        match format {
            OutputFormat::Plain => Ok(self.render_plain()),
            OutputFormat::JsonLines => self.render_json_lines(),
        }
    }

    fn render_plain(&self) -> String {
        let status = if !self.applicable {
            "PASS (not applicable)".to_string()
        } else if self.passed() {
            "PASS".to_string()
        } else {
            format!("FAIL ({} findings)", self.findings.len())
        };

        let mut out = format!("{}: {}", self.rule, status);
        for finding in &self.findings {
            out.push_str("\n  ");
            out.push_str(&finding.to_string());
        }
        out
    }

    fn render_json_lines(&self) -> RuleResult<String> {
        let lines = self
            .findings
            .iter()
            .map(|finding| self.record(finding))
            .collect::<RuleResult<Vec<_>>>()?;
        Ok(lines.join("\n"))
    }

    fn record(&self, finding: &Finding) -> RuleResult<String> {
        let mut record = finding
            .to_record()
            .map_err(|e| RuleError::render_failed(e.to_string()))?;
        if let JsonValue::Object(map) = &mut record {
            map.insert("rule".into(), JsonValue::String(self.rule.clone()));
        }
        serde_json::to_string(&record).map_err(|e| RuleError::render_failed(e.to_string()))
    }
}
