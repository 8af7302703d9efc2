//! Typed views over the reasoning service's loosely structured replies.
//! Every field access carries a typed default so a partially valid reply
//! still produces a complete record.

use serde_json::Value;

use super::domain::{CompletenessBreakdown, RiskLevel};

fn text_field(value: &Value, key: &str, default: String) -> String {
    match value.get(key).and_then(Value::as_str) {
        Some(text) if !text.trim().is_empty() => text.to_string(),
        _ => default,
    }
}

fn list_field(value: &Value, key: &str, default: Vec<String>) -> Vec<String> {
    match value.get(key).and_then(Value::as_array) {
        Some(items) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        None => default,
    }
}

fn int_field(value: &Value, key: &str, default: i64) -> i64 {
    value
        .get(key)
        .and_then(Value::as_i64)
        .or_else(|| value.get(key).and_then(Value::as_f64).map(|n| n as i64))
        .unwrap_or(default)
}

fn level_field(value: &Value, key: &str, default: RiskLevel) -> RiskLevel {
    match value.get(key).and_then(Value::as_str) {
        Some(token) => RiskLevel::from_token(token),
        None => default,
    }
}

/// Model-derived clause assessment.
#[derive(Debug, Clone)]
pub struct ClauseOpinion {
    pub plain_english_explanation: String,
    pub risk_level: RiskLevel,
    pub risk_reason: String,
    pub confidence_percentage: i64,
    pub affected_party: String,
    pub suggested_alternative_clause: String,
    pub negotiation_insight: String,
    pub legal_concerns: Vec<String>,
    pub missing_protections: Vec<String>,
}

impl ClauseOpinion {
    /// Fixed advisory payload used when the reply cannot be parsed.
    pub fn fallback() -> Self {
        Self {
            plain_english_explanation: "This clause establishes specific contractual obligations, rights, or conditions \
                 that require careful legal review. The language used may create binding commitments \
                 or limitations that could affect the business relationship between the parties."
                .to_string(),
            risk_level: RiskLevel::Medium,
            risk_reason: "Standard contractual provision requiring detailed analysis of obligations, \
                 performance requirements, and potential liability exposure. Legal counsel should \
                 review to ensure terms are acceptable and enforceable."
                .to_string(),
            confidence_percentage: 75,
            affected_party: "Both Parties".to_string(),
            suggested_alternative_clause: "Revise to include: (1) clear definitions of key terms, (2) specific performance \
                 timelines and metrics, (3) balanced obligations for both parties, (4) reasonable \
                 liability limitations, and (5) explicit termination or modification procedures."
                .to_string(),
            negotiation_insight: "Ensure all terms are clearly defined with measurable criteria. Request specific \
                 timelines and performance standards. Negotiate balanced liability provisions."
                .to_string(),
            legal_concerns: vec![
                "Ambiguous language".to_string(),
                "Undefined terms".to_string(),
            ],
            missing_protections: vec![
                "Limitation of liability".to_string(),
                "Termination rights".to_string(),
            ],
        }
    }

    /// Overlay a parsed reply on a fallback payload, field by field.
    pub fn from_value(value: &Value, fallback: ClauseOpinion) -> Self {
        Self {
            plain_english_explanation: text_field(
                value,
                "plain_english_explanation",
                fallback.plain_english_explanation,
            ),
            risk_level: level_field(value, "risk_level", fallback.risk_level),
            risk_reason: text_field(value, "risk_reason", fallback.risk_reason),
            confidence_percentage: int_field(
                value,
                "confidence_percentage",
                fallback.confidence_percentage,
            ),
            affected_party: text_field(value, "affected_party", "Unclear".to_string()),
            suggested_alternative_clause: text_field(
                value,
                "suggested_alternative_clause",
                fallback.suggested_alternative_clause,
            ),
            negotiation_insight: text_field(
                value,
                "negotiation_insight",
                fallback.negotiation_insight,
            ),
            legal_concerns: list_field(value, "legal_concerns", fallback.legal_concerns),
            missing_protections: list_field(
                value,
                "missing_protections",
                fallback.missing_protections,
            ),
        }
    }
}

/// Model-derived document assessment.
#[derive(Debug, Clone)]
pub struct SummaryOpinion {
    pub business_summary: String,
    pub overall_risk: RiskLevel,
    pub top_risks: Vec<String>,
    pub completeness_breakdown: CompletenessBreakdown,
    pub conflicting_clauses: Vec<String>,
    pub duplicate_or_ambiguous_terms: Vec<String>,
    pub missing_critical_clauses: Vec<String>,
    pub negotiation_recommendations: Vec<String>,
    pub document_length_words: usize,
}

impl SummaryOpinion {
    /// Fixed advisory payload seeded with the already computed rule-based
    /// verdict, so a failed summary call never discards clause results.
    pub fn fallback(rules_risk: RiskLevel, word_count: usize) -> Self {
        Self {
            business_summary: "This is a commercial agreement establishing business terms between parties. \
                 Key provisions cover obligations, payment terms, duration, liability, \
                 termination rights, and dispute resolution. Comprehensive legal review is \
                 recommended to ensure all terms align with business objectives and risk tolerance."
                .to_string(),
            overall_risk: rules_risk,
            top_risks: vec![
                "Potential liability exposure requiring review of indemnification provisions"
                    .to_string(),
                "Termination conditions may not adequately protect business interests".to_string(),
                "Payment terms and dispute resolution mechanism require clarification".to_string(),
            ],
            completeness_breakdown: CompletenessBreakdown {
                parties: 8,
                scope: 7,
                payment: 6,
                duration: 7,
                termination: 6,
                liability: 6,
                ip_rights: 5,
                disputes: 6,
                confidentiality: 4,
                warranties: 5,
            },
            conflicting_clauses: Vec::new(),
            duplicate_or_ambiguous_terms: Vec::new(),
            missing_critical_clauses: Vec::new(),
            negotiation_recommendations: vec![
                "Clarify all material obligations with specific performance metrics".to_string(),
                "Negotiate balanced liability limitations and indemnification provisions"
                    .to_string(),
                "Ensure termination rights are mutual and include reasonable notice periods"
                    .to_string(),
            ],
            document_length_words: word_count,
        }
    }

    pub fn from_value(value: &Value, fallback: SummaryOpinion) -> Self {
        let breakdown = match value.get("completeness_breakdown") {
            Some(raw) => {
                let base = fallback.completeness_breakdown;
                CompletenessBreakdown {
                    parties: dim(raw, "parties", base.parties),
                    scope: dim(raw, "scope", base.scope),
                    payment: dim(raw, "payment", base.payment),
                    duration: dim(raw, "duration", base.duration),
                    termination: dim(raw, "termination", base.termination),
                    liability: dim(raw, "liability", base.liability),
                    ip_rights: dim(raw, "ip_rights", base.ip_rights),
                    disputes: dim(raw, "disputes", base.disputes),
                    confidentiality: dim(raw, "confidentiality", base.confidentiality),
                    warranties: dim(raw, "warranties", base.warranties),
                }
            }
            None => fallback.completeness_breakdown,
        };

        Self {
            business_summary: text_field(value, "business_summary", fallback.business_summary),
            overall_risk: level_field(value, "overall_risk", fallback.overall_risk),
            top_risks: list_field(value, "top_3_business_risks", fallback.top_risks),
            completeness_breakdown: breakdown,
            conflicting_clauses: list_field(
                value,
                "conflicting_clauses",
                fallback.conflicting_clauses,
            ),
            duplicate_or_ambiguous_terms: list_field(
                value,
                "duplicate_or_ambiguous_terms",
                fallback.duplicate_or_ambiguous_terms,
            ),
            missing_critical_clauses: list_field(
                value,
                "missing_critical_clauses",
                fallback.missing_critical_clauses,
            ),
            negotiation_recommendations: list_field(
                value,
                "negotiation_recommendations",
                fallback.negotiation_recommendations,
            ),
            document_length_words: int_field(
                value,
                "document_length_words",
                fallback.document_length_words as i64,
            )
            .max(0) as usize,
        }
    }

    /// The exported completeness score is the breakdown total, keeping the
    /// ten dimensions and the headline number consistent even when the
    /// reply disagrees with itself.
    pub fn completeness_score(&self) -> u32 {
        self.completeness_breakdown.total().min(100)
    }
}

fn dim(raw: &Value, key: &str, default: u8) -> u8 {
    raw.get(key)
        .and_then(Value::as_u64)
        .map(|n| n.min(u64::from(u8::MAX)) as u8)
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn clause_opinion_overlays_present_fields_only() {
        let reply = json!({
            "risk_level": "high",
            "confidence_percentage": 92,
            "legal_concerns": ["uncapped exposure"]
        });
        let opinion = ClauseOpinion::from_value(&reply, ClauseOpinion::fallback());

        assert_eq!(opinion.risk_level, RiskLevel::High);
        assert_eq!(opinion.confidence_percentage, 92);
        assert_eq!(opinion.legal_concerns, vec!["uncapped exposure"]);
        // Absent fields keep the advisory defaults.
        assert!(opinion.risk_reason.contains("Legal counsel"));
        assert_eq!(opinion.affected_party, "Unclear");
    }

    #[test]
    fn unknown_risk_tokens_default_to_medium() {
        let reply = json!({ "risk_level": "catastrophic" });
        let opinion = ClauseOpinion::from_value(&reply, ClauseOpinion::fallback());
        assert_eq!(opinion.risk_level, RiskLevel::Medium);
    }

    #[test]
    fn summary_score_tracks_breakdown_total() {
        let reply = json!({
            "contract_completeness_score": 95,
            "completeness_breakdown": {
                "parties": 10, "scope": 10, "payment": 10, "duration": 10,
                "termination": 15, "liability": 10, "ip_rights": 5,
                "disputes": 5, "confidentiality": 5, "warranties": 5
            }
        });
        let opinion = SummaryOpinion::from_value(&reply, SummaryOpinion::fallback(RiskLevel::Low, 100));
        assert_eq!(opinion.completeness_score(), 85);
    }

    #[test]
    fn summary_fallback_carries_rule_verdict() {
        let fallback = SummaryOpinion::fallback(RiskLevel::High, 420);
        assert_eq!(fallback.overall_risk, RiskLevel::High);
        assert_eq!(fallback.document_length_words, 420);
        assert_eq!(fallback.completeness_score(), 60);
    }
}
