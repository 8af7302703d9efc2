use serde::{Deserialize, Serialize};

/// Ordinal severity scale used across rule findings, model opinions, and
/// final verdicts. The derived ordering (`Low < Medium < High`) is load
/// bearing: verdict combination relies on `Ord`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub enum RiskLevel {
    #[default]
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Conservative combination: either source may raise the verdict,
    /// neither may lower it.
    pub fn escalate(self, other: RiskLevel) -> RiskLevel {
        self.max(other)
    }

    /// Parse a free-form token from an external reply. Unknown or
    /// missing values are treated as `Medium` rather than rejected.
    pub fn from_token(token: &str) -> RiskLevel {
        match token.trim().to_ascii_lowercase().as_str() {
            "low" => RiskLevel::Low,
            "high" => RiskLevel::High,
            _ => RiskLevel::Medium,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }
}

/// Natural language for the narrative report fields. Enumerated fields
/// (risk level, confidence, affected party) stay English regardless.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OutputLanguage {
    #[default]
    English,
    Hindi,
}

impl OutputLanguage {
    pub fn label(self) -> &'static str {
        match self {
            OutputLanguage::English => "English",
            OutputLanguage::Hindi => "Hindi",
        }
    }
}

/// One rule firing against one clause.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    pub rule_id: String,
    pub description: String,
    pub risk_level: RiskLevel,
    pub category: String,
    pub severity_weight: f64,
}

/// Per-clause analysis record. Field names are the persisted export
/// contract; downstream report rendering depends on them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClauseResult {
    pub clause_index: usize,
    pub original_text: String,
    pub anonymised_text: String,
    pub plain_english_explanation: String,
    pub risk_level_llm: RiskLevel,
    pub risk_level_rules: RiskLevel,
    pub risk_level_final: RiskLevel,
    pub risk_reason_llm: String,
    pub suggested_alternative_clause: String,
    pub affected_party: String,
    pub final_risk_score: f64,
    pub negotiation_insight: String,
    pub rule_hits: Vec<Finding>,
}

/// Fixed ten-dimension completeness breakdown. The dimensions sum to the
/// completeness score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CompletenessBreakdown {
    pub parties: u8,
    pub scope: u8,
    pub payment: u8,
    pub duration: u8,
    pub termination: u8,
    pub liability: u8,
    pub ip_rights: u8,
    pub disputes: u8,
    pub confidentiality: u8,
    pub warranties: u8,
}

impl CompletenessBreakdown {
    pub fn total(&self) -> u32 {
        [
            self.parties,
            self.scope,
            self.payment,
            self.duration,
            self.termination,
            self.liability,
            self.ip_rights,
            self.disputes,
            self.confidentiality,
            self.warranties,
        ]
        .iter()
        .map(|dim| u32::from(*dim))
        .sum()
    }
}

/// Document-level analysis record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractSummary {
    pub business_summary: String,
    pub overall_risk_llm: RiskLevel,
    pub overall_risk_rules: RiskLevel,
    pub overall_risk_final: RiskLevel,
    pub top_risks: Vec<String>,
    pub missing_critical_clauses: Vec<String>,
    pub contract_completeness_score: u32,
    pub completeness_breakdown: CompletenessBreakdown,
    pub conflicting_clauses: Vec<String>,
    pub duplicate_or_ambiguous_terms: Vec<String>,
    pub negotiation_insights: Vec<String>,
    pub document_length_words: usize,
}

/// Aggregate analysis root returned by the engine. Clause order matches
/// the input clause order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractReport {
    pub summary: ContractSummary,
    pub clauses: Vec<ClauseResult>,
    pub anonymisation_map: std::collections::BTreeMap<String, String>,
    pub generated_at: chrono::DateTime<chrono::Utc>,
}
