use super::domain::RiskLevel;
use crate::config::ScoringWeights;

/// Derive the bounded clause score from the final verdict plus capped
/// add-ons for low confidence, rule hits, concerns, and missing
/// protections. Monotone non-decreasing in every input and clamped to the
/// configured maximum, so the number stays explainable.
pub fn clause_risk_score(
    final_level: RiskLevel,
    confidence_percentage: i64,
    rule_hit_count: usize,
    concern_count: usize,
    missing_protection_count: usize,
    weights: &ScoringWeights,
) -> f64 {
    let mut score = match final_level {
        RiskLevel::Low => weights.base_low,
        RiskLevel::Medium => weights.base_medium,
        RiskLevel::High => weights.base_high,
    };

    if confidence_percentage < weights.low_confidence_threshold {
        score += weights.low_confidence_bonus;
    }

    score += (rule_hit_count as f64 * weights.rule_hit_weight).min(weights.rule_hit_cap);
    score += (concern_count as f64 * weights.concern_weight).min(weights.concern_cap);
    score += (missing_protection_count as f64 * weights.missing_protection_weight)
        .min(weights.missing_protection_cap);

    score.min(weights.max_score)
}
