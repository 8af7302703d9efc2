use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{info, warn};

use super::clause::ClauseAnalyzer;
use super::domain::{ContractReport, ContractSummary, OutputLanguage, RiskLevel};
use super::gateway::{
    salvage_json, sanitize_text, ChatTransport, HttpChatTransport, ReasoningGateway,
    TransportError,
};
use super::opinion::SummaryOpinion;
use super::pacing::{AnalysisPacer, FixedIntervalPacer};
use super::prompts;
use super::rules::{aggregate_findings, RuleBreakdown, RuleCatalog};
use crate::config::EngineConfig;

/// Top-level analysis engine. Clauses are processed strictly in input
/// order; the only shared mutable state is the gateway's response cache,
/// scoped to this instance.
pub struct ContractRiskEngine<T: ChatTransport> {
    gateway: ReasoningGateway<T>,
    catalog: &'static RuleCatalog,
    pacer: Arc<dyn AnalysisPacer>,
}

impl ContractRiskEngine<HttpChatTransport> {
    /// Engine backed by the HTTP reasoning transport.
    pub fn new(config: EngineConfig) -> Result<Self, TransportError> {
        let transport = HttpChatTransport::new(&config)?;
        Ok(Self::with_transport(transport, config))
    }
}

impl<T: ChatTransport> ContractRiskEngine<T> {
    pub fn with_transport(transport: T, config: EngineConfig) -> Self {
        Self {
            gateway: ReasoningGateway::new(transport, config),
            catalog: RuleCatalog::builtin(),
            pacer: Arc::new(FixedIntervalPacer::default()),
        }
    }

    pub fn with_pacer(mut self, pacer: Arc<dyn AnalysisPacer>) -> Self {
        self.pacer = pacer;
        self
    }

    fn config(&self) -> &EngineConfig {
        self.gateway.config()
    }

    /// Run the full analysis pipeline over order-aligned clause lists.
    /// Every clause yields a result; a failure in one clause or in the
    /// document summary never discards the rest.
    pub async fn analyze(
        &self,
        original_clauses: &[String],
        anonymised_clauses: &[String],
        full_text: &str,
        language: OutputLanguage,
    ) -> ContractReport {
        let total = original_clauses.len().min(anonymised_clauses.len());
        info!(
            clauses = total,
            language = language.label(),
            "starting contract analysis"
        );

        let analyzer = ClauseAnalyzer::new(&self.gateway, self.catalog, self.config());
        let mut clause_results = Vec::with_capacity(total);

        for (idx, (original, anonymised)) in original_clauses
            .iter()
            .zip(anonymised_clauses.iter())
            .enumerate()
        {
            let clause_index = idx + 1;
            info!(clause = clause_index, total, "analyzing clause");
            let result = analyzer
                .analyze(original, clause_index, anonymised, language)
                .await;
            clause_results.push(result);
            self.pacer.clause_completed(clause_index).await;
        }

        // Document-wide verdict is recomputed from the union of findings,
        // so cross-clause weight accumulation can escalate even when no
        // single clause does.
        let mut all_findings = Vec::new();
        for clause in original_clauses {
            all_findings.extend(self.catalog.evaluate(clause));
        }
        let overall_rules_risk = aggregate_findings(&all_findings, &self.config().escalation);
        let breakdown = RuleBreakdown::from_findings(&all_findings, &self.config().escalation);
        info!(
            rule_matches = breakdown.total_matches,
            high = breakdown.high_risk_count,
            medium = breakdown.medium_risk_count,
            verdict = overall_rules_risk.label(),
            "document-wide rule verdict"
        );

        info!("generating contract summary");
        let summary = self
            .summarize_contract(full_text, overall_rules_risk, language)
            .await;

        info!("analysis complete");
        ContractReport {
            summary,
            clauses: clause_results,
            anonymisation_map: BTreeMap::new(),
            generated_at: chrono::Utc::now(),
        }
    }

    /// Document-level summary. Degrades to a fixed fallback seeded with the
    /// rule-based verdict on any failure.
    async fn summarize_contract(
        &self,
        full_text: &str,
        overall_rules_risk: RiskLevel,
        language: OutputLanguage,
    ) -> ContractSummary {
        let full_text = sanitize_text(full_text);
        let word_count = full_text.split_whitespace().count();

        let system = prompts::system_prompt(language);
        let user = prompts::summary_prompt(&full_text, word_count);
        let fallback = SummaryOpinion::fallback(overall_rules_risk, word_count);

        let opinion = match self.gateway.converse(&system, &user).await {
            Ok(raw) => match salvage_json(&raw) {
                Some(value) => SummaryOpinion::from_value(&value, fallback),
                None => {
                    warn!("unparseable summary reply, using fallback");
                    fallback
                }
            },
            Err(err) => {
                warn!(error = %err, "summary unavailable, seeding fallback with rule verdict");
                fallback
            }
        };

        let final_overall = opinion.overall_risk.escalate(overall_rules_risk);
        let contract_completeness_score = opinion.completeness_score();

        ContractSummary {
            business_summary: opinion.business_summary,
            overall_risk_llm: opinion.overall_risk,
            overall_risk_rules: overall_rules_risk,
            overall_risk_final: final_overall,
            top_risks: opinion.top_risks,
            missing_critical_clauses: opinion.missing_critical_clauses,
            contract_completeness_score,
            completeness_breakdown: opinion.completeness_breakdown,
            conflicting_clauses: opinion.conflicting_clauses,
            duplicate_or_ambiguous_terms: opinion.duplicate_or_ambiguous_terms,
            negotiation_insights: opinion.negotiation_recommendations,
            document_length_words: opinion.document_length_words,
        }
    }

    /// Rule breakdown over an arbitrary set of clause texts, for reporting
    /// surfaces that want the deterministic view on its own.
    pub fn rule_breakdown(&self, clause_texts: &[String]) -> RuleBreakdown {
        let mut findings = Vec::new();
        for clause in clause_texts {
            findings.extend(self.catalog.evaluate(clause));
        }
        RuleBreakdown::from_findings(&findings, &self.config().escalation)
    }
}
