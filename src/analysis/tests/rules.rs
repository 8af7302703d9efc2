use crate::analysis::domain::RiskLevel;
use crate::analysis::rules::{RuleBreakdown, RuleCatalog};
use crate::config::EscalationThresholds;

#[test]
fn unlimited_liability_fires_high_risk_rule() {
    let catalog = RuleCatalog::builtin();
    let findings = catalog
        .evaluate("The Supplier accepts unlimited liability for defects in the delivered goods.");

    let hit = findings
        .iter()
        .find(|finding| finding.rule_id == "unlimited_liability")
        .expect("unlimited liability rule fires");
    assert_eq!(hit.risk_level, RiskLevel::High);
    assert_eq!(hit.category, "Liability");
    assert_eq!(hit.severity_weight, 2.5);
}

#[test]
fn matching_is_case_insensitive() {
    let catalog = RuleCatalog::builtin();
    let upper = catalog.evaluate("THE PARTIES AGREE TO UNLIMITED LIABILITY FOR ALL OBLIGATIONS.");
    let lower = catalog.evaluate("the parties agree to unlimited liability for all obligations.");
    assert!(!upper.is_empty());
    assert_eq!(
        upper.iter().map(|f| &f.rule_id).collect::<Vec<_>>(),
        lower.iter().map(|f| &f.rule_id).collect::<Vec<_>>()
    );
}

#[test]
fn empty_and_whitespace_input_yield_no_findings() {
    let catalog = RuleCatalog::builtin();
    assert!(catalog.evaluate("").is_empty());
    assert!(catalog.evaluate("   \n\t  ").is_empty());
}

#[test]
fn benign_clause_yields_no_findings() {
    let catalog = RuleCatalog::builtin();
    let findings =
        catalog.evaluate("The parties will meet quarterly to review delivery schedules.");
    assert!(findings.is_empty());
}

#[test]
fn multiple_rules_can_fire_on_one_clause() {
    let catalog = RuleCatalog::builtin();
    let findings = catalog.evaluate(
        "Vendor shall use commercially reasonable efforts, and this agreement shall \
         automatically renew for successive terms.",
    );

    let ids: Vec<&str> = findings.iter().map(|f| f.rule_id.as_str()).collect();
    assert!(ids.contains(&"ambiguous_terms"));
    assert!(ids.contains(&"automatic_renewal"));
}

#[test]
fn each_rule_fires_at_most_once_per_clause() {
    let catalog = RuleCatalog::builtin();
    // Two distinct phrasings of the same ambiguity rule.
    let findings =
        catalog.evaluate("Vendor shall use best efforts and commercially reasonable efforts.");
    let ambiguous = findings
        .iter()
        .filter(|f| f.rule_id == "ambiguous_terms")
        .count();
    assert_eq!(ambiguous, 1);
}

#[test]
fn catalog_carries_full_builtin_rule_set() {
    let catalog = RuleCatalog::builtin();
    assert_eq!(catalog.len(), 23);
    assert!(catalog
        .rules()
        .iter()
        .all(|rule| rule.severity_weight > 0.0));
}

#[test]
fn breakdown_groups_by_category_and_ranks_concerns() {
    let catalog = RuleCatalog::builtin();
    let findings = catalog.evaluate(
        "Customer shall have unlimited liability for all damages, all disputes shall be \
         resolved through binding arbitration, and payment shall be a reasonable fee.",
    );
    let breakdown = RuleBreakdown::from_findings(&findings, &EscalationThresholds::default());

    assert_eq!(breakdown.risk_level, RiskLevel::High);
    assert!(breakdown.high_risk_count >= 1);
    assert!(breakdown.categories.contains_key("Liability"));
    assert!(breakdown.categories.contains_key("Dispute Resolution"));
    // High-level findings rank ahead of Medium ones.
    assert!(breakdown.top_concerns[0].contains("liability"));
    assert!(breakdown.total_severity > 0.0);
}
