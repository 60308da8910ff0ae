use super::common::*;

#[test]
fn hot_lead_summary_reads_end_to_end() {
    let outcome = engine().score(&hot_lead());

    assert_eq!(
        outcome.summary,
        "Cash buyer, budget \u{a3}500K-\u{a3}600K, 2 bedrooms, buying a primary residence, \
         ready to complete within 28 days. Hot lead - prioritise immediate contact."
    );
}

#[test]
fn unset_payment_method_reads_as_mortgage_buyer() {
    let outcome = engine().score(&minimal_lead("s-unset"));

    assert!(outcome.summary.starts_with("Mortgage buyer"));
}

#[test]
fn single_budget_bound_is_rendered_alone() {
    let mut lead = minimal_lead("s-single");
    lead.requirements.budget_min = Some(450_000);

    let outcome = engine().score(&lead);
    assert!(outcome.summary.contains("budget \u{a3}450K"));
    assert!(!outcome.summary.contains("K-\u{a3}"));
}

#[test]
fn equal_bounds_collapse_to_one_value() {
    let mut lead = minimal_lead("s-equal");
    lead.requirements.budget_min = Some(500_000);
    lead.requirements.budget_max = Some(500_000);

    let outcome = engine().score(&lead);
    assert!(outcome.summary.contains("budget \u{a3}500K"));
    assert!(!outcome.summary.contains("\u{a3}500K-\u{a3}500K"));
}

#[test]
fn millions_render_with_one_decimal() {
    let mut lead = minimal_lead("s-millions");
    lead.requirements.budget_max = Some(2_500_000);

    let outcome = engine().score(&lead);
    assert!(outcome.summary.contains("\u{a3}2.5M"));
}

#[test]
fn small_amounts_render_unscaled() {
    let mut lead = minimal_lead("s-small");
    lead.requirements.budget_max = Some(950);

    let outcome = engine().score(&lead);
    assert!(outcome.summary.contains("budget \u{a3}950"));
}

#[test]
fn thousands_are_rounded() {
    let mut lead = minimal_lead("s-rounded");
    lead.requirements.budget_max = Some(449_600);

    let outcome = engine().score(&lead);
    assert!(outcome.summary.contains("\u{a3}450K"));
}

#[test]
fn one_bedroom_is_singular() {
    let mut lead = minimal_lead("s-singular");
    lead.requirements.bedrooms = Some(1);

    let outcome = engine().score(&lead);
    assert!(outcome.summary.contains("1 bedroom"));
    assert!(!outcome.summary.contains("1 bedrooms"));
}

#[test]
fn raw_timeline_text_is_carried_through() {
    let mut lead = minimal_lead("s-timeline");
    lead.requirements.timeline = Some("3-6 months".to_string());

    let outcome = engine().score(&lead);
    assert!(outcome.summary.contains("3-6 months"));
}

#[test]
fn messy_timeline_whitespace_is_normalized() {
    let mut lead = minimal_lead("s-whitespace");
    lead.requirements.timeline = Some("  within   3   months ".to_string());

    let outcome = engine().score(&lead);
    assert!(outcome.summary.contains("within 3 months"));
    assert!(!outcome.summary.contains("  "));
}

#[test]
fn disqualified_assessment_warns_off_pursuit() {
    let outcome = engine().score(&disqualified_lead());

    assert!(outcome.summary.ends_with("do not pursue."));
}
