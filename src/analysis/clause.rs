use tracing::{debug, warn};

use super::domain::{ClauseResult, Finding, OutputLanguage, RiskLevel};
use super::gateway::{salvage_json, sanitize_text, ChatTransport, ReasoningGateway};
use super::opinion::ClauseOpinion;
use super::prompts;
use super::rules::{aggregate_findings, RuleCatalog};
use super::score::clause_risk_score;
use crate::config::EngineConfig;

/// Clauses shorter than this (after trimming) skip the reasoning call and
/// receive the fixed advisory result. A policy branch, not an error.
const MIN_CLAUSE_CHARS: usize = 10;

const FALLBACK_RISK_SCORE: f64 = 50.0;

/// Per-clause orchestrator composing the rule matcher, the reasoning
/// gateway, and the risk aggregation into one `ClauseResult`.
pub struct ClauseAnalyzer<'a, T: ChatTransport> {
    gateway: &'a ReasoningGateway<T>,
    catalog: &'static RuleCatalog,
    config: &'a EngineConfig,
}

impl<'a, T: ChatTransport> ClauseAnalyzer<'a, T> {
    pub fn new(
        gateway: &'a ReasoningGateway<T>,
        catalog: &'static RuleCatalog,
        config: &'a EngineConfig,
    ) -> Self {
        Self {
            gateway,
            catalog,
            config,
        }
    }

    /// Analyze one clause. Always yields a result: short or empty clauses
    /// and reasoning failures produce the fixed advisory fallback, tagged
    /// with whatever rule-based risk was computed.
    pub async fn analyze(
        &self,
        clause_text: &str,
        clause_index: usize,
        anonymised_text: &str,
        language: OutputLanguage,
    ) -> ClauseResult {
        if clause_text.trim().chars().count() < MIN_CLAUSE_CHARS {
            warn!(clause_index, "clause too short for reasoning analysis");
            return self.fallback_result(clause_index, clause_text, anonymised_text);
        }

        let clause_text = sanitize_text(clause_text);
        let findings = self.catalog.evaluate(&clause_text);
        let rules_risk = aggregate_findings(&findings, &self.config.escalation);
        debug!(
            clause_index,
            rule_hits = findings.len(),
            rules_risk = rules_risk.label(),
            "rule evaluation complete"
        );

        let system = prompts::system_prompt(language);
        let user = prompts::clause_prompt(&clause_text);

        let raw = match self.gateway.converse(&system, &user).await {
            Ok(raw) => raw,
            Err(err) => {
                warn!(clause_index, error = %err, "reasoning unavailable, emitting advisory result");
                return Self::advisory_result(
                    clause_index,
                    clause_text,
                    anonymised_text.to_string(),
                    findings,
                    rules_risk,
                );
            }
        };

        let opinion = match salvage_json(&raw) {
            Some(value) => ClauseOpinion::from_value(&value, ClauseOpinion::fallback()),
            None => {
                warn!(clause_index, "unparseable reply, using fallback payload");
                ClauseOpinion::fallback()
            }
        };

        let final_risk = opinion.risk_level.escalate(rules_risk);
        let risk_score = clause_risk_score(
            final_risk,
            opinion.confidence_percentage,
            findings.len(),
            opinion.legal_concerns.len(),
            opinion.missing_protections.len(),
            &self.config.scoring,
        );

        ClauseResult {
            clause_index,
            original_text: clause_text,
            anonymised_text: anonymised_text.to_string(),
            plain_english_explanation: opinion.plain_english_explanation,
            risk_level_llm: opinion.risk_level,
            risk_level_rules: rules_risk,
            risk_level_final: final_risk,
            risk_reason_llm: opinion.risk_reason,
            suggested_alternative_clause: opinion.suggested_alternative_clause,
            affected_party: opinion.affected_party,
            final_risk_score: risk_score,
            negotiation_insight: opinion.negotiation_insight,
            rule_hits: findings,
        }
    }

    /// Fallback path that still runs the deterministic rules, so the
    /// advisory result carries any rule-based risk that was detectable.
    pub(crate) fn fallback_result(
        &self,
        clause_index: usize,
        clause_text: &str,
        anonymised_text: &str,
    ) -> ClauseResult {
        let findings = self.catalog.evaluate(clause_text);
        let rules_risk = aggregate_findings(&findings, &self.config.escalation);
        Self::advisory_result(
            clause_index,
            clause_text.to_string(),
            anonymised_text.to_string(),
            findings,
            rules_risk,
        )
    }

    fn advisory_result(
        clause_index: usize,
        original_text: String,
        anonymised_text: String,
        findings: Vec<Finding>,
        rules_risk: RiskLevel,
    ) -> ClauseResult {
        let final_risk = if rules_risk != RiskLevel::Low {
            rules_risk
        } else {
            RiskLevel::Medium
        };

        ClauseResult {
            clause_index,
            original_text,
            anonymised_text,
            plain_english_explanation:
                "This clause requires professional legal review for comprehensive analysis. \
                 Automated assessment is limited due to complex legal language or formatting issues."
                    .to_string(),
            risk_level_llm: RiskLevel::Medium,
            risk_level_rules: rules_risk,
            risk_level_final: final_risk,
            risk_reason_llm: "Automated analysis unavailable. Manual legal review recommended."
                .to_string(),
            suggested_alternative_clause:
                "Consult legal counsel for alternative drafting recommendations.".to_string(),
            affected_party: "Unclear".to_string(),
            final_risk_score: FALLBACK_RISK_SCORE,
            negotiation_insight: "Seek professional legal advice for negotiation strategy."
                .to_string(),
            rule_hits: findings,
        }
    }
}
