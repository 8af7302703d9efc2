//! Hybrid risk assessment: deterministic rule findings and an external
//! reasoning opinion, reconciled into a single conservative verdict per
//! clause and per contract.

mod clause;
mod contract;
pub mod domain;
pub mod gateway;
mod opinion;
mod pacing;
pub mod prompts;
pub mod rules;
mod score;

#[cfg(test)]
mod tests;

pub use clause::ClauseAnalyzer;
pub use contract::ContractRiskEngine;
pub use domain::{
    ClauseResult, CompletenessBreakdown, ContractReport, ContractSummary, Finding, OutputLanguage,
    RiskLevel,
};
pub use gateway::{
    ChatRequest, ChatTransport, GatewayError, HttpChatTransport, ReasoningGateway, TransportError,
};
pub use opinion::{ClauseOpinion, SummaryOpinion};
pub use pacing::{AnalysisPacer, FixedIntervalPacer, NoopPacer};
pub use rules::{aggregate_findings, RuleBreakdown, RuleCatalog};
pub use score::clause_risk_score;
