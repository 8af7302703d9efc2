use std::collections::BTreeMap;

use serde::Serialize;

use crate::analysis::domain::{Finding, RiskLevel};
use crate::config::EscalationThresholds;

/// Combine findings into a single rule-based verdict.
///
/// Policy, evaluated in order: no findings is `Low`; any `High` finding is
/// absorbing; otherwise Medium findings escalate to `High` once their count
/// or combined severity weight crosses the configured thresholds. Many
/// independently weak signals are treated like one strong signal, modeling
/// cumulative legal risk.
pub fn aggregate_findings(findings: &[Finding], thresholds: &EscalationThresholds) -> RiskLevel {
    if findings.is_empty() {
        return RiskLevel::Low;
    }

    if findings
        .iter()
        .any(|finding| finding.risk_level == RiskLevel::High)
    {
        return RiskLevel::High;
    }

    let medium: Vec<&Finding> = findings
        .iter()
        .filter(|finding| finding.risk_level == RiskLevel::Medium)
        .collect();

    if medium.is_empty() {
        return RiskLevel::Low;
    }

    let total_weight: f64 = medium.iter().map(|finding| finding.severity_weight).sum();

    if medium.len() >= thresholds.escalation_count || total_weight >= thresholds.escalation_weight {
        return RiskLevel::High;
    }

    RiskLevel::Medium
}

/// Per-category rollup for a finding set, used for document-level logging
/// and CLI output.
#[derive(Debug, Clone, Serialize)]
pub struct RuleBreakdown {
    pub total_matches: usize,
    pub risk_level: RiskLevel,
    pub categories: BTreeMap<String, CategoryStats>,
    pub high_risk_count: usize,
    pub medium_risk_count: usize,
    pub total_severity: f64,
    pub top_concerns: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CategoryStats {
    pub count: usize,
    pub rules: Vec<String>,
    pub severity: f64,
}

const TOP_CONCERN_LIMIT: usize = 5;

impl RuleBreakdown {
    pub fn from_findings(findings: &[Finding], thresholds: &EscalationThresholds) -> Self {
        let mut categories: BTreeMap<String, CategoryStats> = BTreeMap::new();
        for finding in findings {
            let stats = categories.entry(finding.category.clone()).or_default();
            stats.count += 1;
            stats.rules.push(finding.rule_id.clone());
            stats.severity += finding.severity_weight;
        }

        let mut ranked: Vec<&Finding> = findings.iter().collect();
        ranked.sort_by(|a, b| {
            b.risk_level
                .cmp(&a.risk_level)
                .then(b.severity_weight.total_cmp(&a.severity_weight))
        });

        RuleBreakdown {
            total_matches: findings.len(),
            risk_level: aggregate_findings(findings, thresholds),
            high_risk_count: findings
                .iter()
                .filter(|finding| finding.risk_level == RiskLevel::High)
                .count(),
            medium_risk_count: findings
                .iter()
                .filter(|finding| finding.risk_level == RiskLevel::Medium)
                .count(),
            total_severity: findings
                .iter()
                .map(|finding| finding.severity_weight)
                .sum(),
            top_concerns: ranked
                .into_iter()
                .take(TOP_CONCERN_LIMIT)
                .map(|finding| finding.description.clone())
                .collect(),
            categories,
        }
    }
}
