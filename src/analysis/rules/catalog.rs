//! Built-in legal risk patterns, grouped by contract concern. Matching is
//! case-insensitive; severity weights feed the escalation policy in
//! `aggregate`.

use regex::Regex;

use super::Rule;
use crate::analysis::domain::RiskLevel;

fn rule(
    id: &'static str,
    category: &'static str,
    pattern: &str,
    base_level: RiskLevel,
    severity_weight: f64,
    description: &'static str,
) -> Rule {
    let pattern = Regex::new(&format!("(?i){pattern}"))
        .expect("built-in rule pattern must compile");
    Rule {
        id,
        category,
        pattern,
        base_level,
        severity_weight,
        description,
    }
}

pub(super) fn builtin_rules() -> Vec<Rule> {
    vec![
        // Liability & indemnification
        rule(
            "unlimited_liability",
            "Liability",
            r"\b(unlimited|unbounded|without limit of) liability\b|\bliable for all (damages|losses|claims)\b|\bno cap on liability\b",
            RiskLevel::High,
            2.5,
            "Unlimited or uncapped liability exposure for one party, creating potentially catastrophic financial risk.",
        ),
        rule(
            "one_sided_indemnity",
            "Liability",
            r"\b(shall|must|agrees to) indemnify.+(and hold harmless|from and against all|defend.*against any)\b",
            RiskLevel::High,
            2.0,
            "Strong unilateral indemnification obligation favoring one party without reciprocal protection.",
        ),
        rule(
            "broad_consequential_damages",
            "Liability",
            r"\bliable for (any|all) consequential damages\b|\bincluding.*lost profits.*lost revenue\b|\bindirect.*special.*incidental damages\b",
            RiskLevel::High,
            2.0,
            "Broad liability for consequential damages including lost profits, revenue, or business opportunities.",
        ),
        // Termination & duration
        rule(
            "no_termination_right",
            "Termination",
            r"\b(may not|cannot|shall not) terminate\b|\bno right to terminate\b|\bnon-terminable\b",
            RiskLevel::High,
            2.5,
            "Explicitly removes or severely restricts termination rights, potentially locking party into unfavorable agreement.",
        ),
        rule(
            "unilateral_termination",
            "Termination",
            r"\bmay terminate (this )?agreement at any time( without (notice|cause))?\b|\bat.*sole discretion.*terminate\b|\bterminate.*immediately.*without (reason|cause)\b",
            RiskLevel::High,
            2.0,
            "Unilateral termination rights granted to one party, creating business instability and relationship imbalance.",
        ),
        rule(
            "perpetual_term",
            "Duration",
            r"\bperpetual\b|\bin perpetuity\b|\bno expiration\b|\bunlimited duration\b",
            RiskLevel::High,
            1.8,
            "Perpetual or indefinite contract term without clear exit mechanism or review period.",
        ),
        // Payment & financial
        rule(
            "automatic_renewal",
            "Financial",
            r"\b(automatically|auto-) renew(s|al)?\b|\bshall be renewed automatically\b|\bunless.*notice.*renew\b",
            RiskLevel::Medium,
            1.5,
            "Automatic renewal provision without explicit opt-in, potentially creating unwanted long-term obligations.",
        ),
        rule(
            "vague_payment_terms",
            "Financial",
            r"\bpayment.*(as mutually agreed|to be determined|from time to time)\b|\breasonable (fee|price|compensation)\b|\bpayment terms.*subject to change\b",
            RiskLevel::Medium,
            1.5,
            "Unclear, variable, or undefined payment terms creating uncertainty in financial obligations.",
        ),
        rule(
            "penalty_interest_high",
            "Financial",
            r"\binterest.*(rate|charge).*(2[4-9]|[3-9][0-9])\s?%|\bpenalty.*(2[0-9]|[3-9][0-9])\s?%",
            RiskLevel::Medium,
            1.5,
            "Excessive interest rates or financial penalties for late payment or breach.",
        ),
        rule(
            "price_escalation",
            "Financial",
            r"\bprice.*increase.*without (notice|limit)\b|\bunilateral.*pricing.*adjustment\b|\bsubject to.*price.*changes.*discretion\b",
            RiskLevel::Medium,
            1.5,
            "Unilateral price increase provisions without reasonable caps or notice requirements.",
        ),
        // Intellectual property
        rule(
            "broad_ip_assignment",
            "Intellectual Property",
            r"\bassigns? all (intellectual property|IP|rights)\b|\ball rights?,? title,? and interest\b|\bexclusive.*ownership.*all.*work\b",
            RiskLevel::Medium,
            1.8,
            "Very broad assignment of intellectual property rights without limitations or exceptions.",
        ),
        rule(
            "work_for_hire",
            "Intellectual Property",
            r"\bwork (made )?for hire\b|\ball.*work.*deemed.*property of\b|\bcreated.*course of.*automatically owned\b",
            RiskLevel::Medium,
            1.6,
            "Work-for-hire provision transferring all IP rights without compensation or credit.",
        ),
        rule(
            "no_derivative_works",
            "Intellectual Property",
            r"\bno derivative works\b|\bcannot.*modify.*create.*based on\b|\bprohibited.*from.*creating.*adaptations\b",
            RiskLevel::Medium,
            1.3,
            "Restrictive prohibition on creating derivative works or modifications.",
        ),
        // Confidentiality & data
        rule(
            "broad_confidentiality",
            "Confidentiality",
            r"\bperpetual confidentiality\b|\bconfidentiality.*(without time limitation|in perpetuity)\b|\bconfidential.*forever\b",
            RiskLevel::Medium,
            1.5,
            "Overly broad or perpetual confidentiality obligations restricting future business operations.",
        ),
        rule(
            "broad_nda_scope",
            "Confidentiality",
            r"\ball information.*deemed confidential\b|\bany and all.*confidential\b|\beverything.*disclosed.*confidential\b",
            RiskLevel::Medium,
            1.4,
            "Excessively broad definition of confidential information without reasonable exceptions.",
        ),
        // Performance & obligations
        rule(
            "ambiguous_terms",
            "Performance",
            r"\breasonable efforts\b|\bcommercially reasonable\b|\bbest efforts\b|\bto the extent (possible|practicable)\b|\bif (reasonably|commercially) feasible\b",
            RiskLevel::Medium,
            1.2,
            "Ambiguous or subjective performance standards that may be difficult to enforce or measure.",
        ),
        rule(
            "open_ended_obligations",
            "Performance",
            r"\band any other.*as.*may require\b|\bincluding but not limited to\b.*\bany\b|\bsuch other (duties|obligations).*determined\b",
            RiskLevel::Medium,
            1.5,
            "Open-ended obligations allowing unilateral expansion of responsibilities.",
        ),
        rule(
            "no_limitation_period",
            "Performance",
            r"\bno (time )?limit.*obligations\b|\bobligations.*survive.*indefinitely\b|\bperpetual obligations\b",
            RiskLevel::Medium,
            1.4,
            "Obligations that survive indefinitely without reasonable time limitations.",
        ),
        // Dispute resolution
        rule(
            "mandatory_arbitration",
            "Dispute Resolution",
            r"\b(shall|must) (be )?resolved? (by|through) (binding )?arbitration\b|\bexclusive.*arbitration\b|\bwaive.*right.*jury trial\b",
            RiskLevel::Medium,
            1.3,
            "Mandatory arbitration clause potentially limiting access to courts and jury trials.",
        ),
        rule(
            "unfavorable_jurisdiction",
            "Dispute Resolution",
            r"\bexclusive jurisdiction.*(in|of)\b|\bvenue.*limited to\b|\bmust.*file.*in\b",
            RiskLevel::Medium,
            1.2,
            "Exclusive jurisdiction clause that may create inconvenience or disadvantage in disputes.",
        ),
        // Representations & warranties
        rule(
            "limited_warranties",
            "Warranties",
            r"\bas is\b.*\bwithout (any )?warranties\b|\bdisclaims all warranties\b|\bno (express|implied) warranties\b",
            RiskLevel::Medium,
            1.3,
            "Broad disclaimer of warranties limiting recourse for defects or non-performance.",
        ),
        rule(
            "seller_representation_only",
            "Warranties",
            r"\bmakes no representations\b|\bbuyer.*acknowledges.*no.*representations\b|\bexcept.*expressly.*stated.*no representations\b",
            RiskLevel::Medium,
            1.2,
            "Limitation on representations potentially leaving party without recourse for misstatements.",
        ),
        // Change control
        rule(
            "unilateral_modification",
            "Modifications",
            r"\bmay.*modify.*(at any time|without notice)\b|\breserves? (the )?right.*amend.*sole discretion\b|\bchanges?.*effective immediately\b",
            RiskLevel::Medium,
            1.5,
            "Unilateral modification rights allowing one party to change terms without consent or notice.",
        ),
    ]
}
