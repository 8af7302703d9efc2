//! Deterministic risk detection: a fixed catalog of weighted legal risk
//! patterns and the matcher that evaluates clause text against it.

mod aggregate;
mod catalog;

pub use aggregate::{aggregate_findings, RuleBreakdown};

use regex::Regex;

use super::domain::{Finding, RiskLevel};

/// One named risk pattern. Defined once at process start, never mutated.
#[derive(Debug)]
pub struct Rule {
    pub id: &'static str,
    pub category: &'static str,
    pub pattern: Regex,
    pub base_level: RiskLevel,
    pub severity_weight: f64,
    pub description: &'static str,
}

impl Rule {
    fn finding(&self) -> Finding {
        Finding {
            rule_id: self.id.to_string(),
            description: self.description.to_string(),
            risk_level: self.base_level,
            category: self.category.to_string(),
            severity_weight: self.severity_weight,
        }
    }
}

/// Immutable table of risk rules.
#[derive(Debug)]
pub struct RuleCatalog {
    rules: Vec<Rule>,
}

impl RuleCatalog {
    /// Shared catalog of built-in legal risk patterns.
    pub fn builtin() -> &'static RuleCatalog {
        static CATALOG: std::sync::OnceLock<RuleCatalog> = std::sync::OnceLock::new();
        CATALOG.get_or_init(|| RuleCatalog {
            rules: catalog::builtin_rules(),
        })
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Evaluate clause text against every rule, returning a finding for
    /// each pattern that matches anywhere in the text. Empty or
    /// whitespace-only input yields no findings rather than an error.
    pub fn evaluate(&self, clause_text: &str) -> Vec<Finding> {
        let text = clause_text.trim();
        if text.is_empty() {
            return Vec::new();
        }

        self.rules
            .iter()
            .filter(|rule| rule.pattern.is_match(text))
            .map(Rule::finding)
            .collect()
    }
}
