use super::config::ScoringConfig;
use super::{clamp_total, QualityScore, ScoreBreakdown};
use crate::scoring::domain::{LeadSubmission, PaymentMethod, PurchasePurpose};

pub(crate) const DISQUALIFICATION_FACTOR: &str = "Auto-Disqualification";
pub(crate) const DISQUALIFICATION_REASON: &str =
    "Budget of 2M+ paired with 1 bedroom or fewer indicates a fake or test enquiry";

/// "Can they complete?" Additive point tables over financing and purpose,
/// short-circuited by the fake-lead disqualification check.
pub(crate) fn score(lead: &LeadSubmission, config: &ScoringConfig) -> QualityScore {
    if is_disqualified(lead, config) {
        return QualityScore {
            total: 0,
            breakdown: vec![ScoreBreakdown {
                factor: DISQUALIFICATION_FACTOR.to_string(),
                points: 0,
                reason: DISQUALIFICATION_REASON.to_string(),
            }],
            is_disqualified: true,
            disqualification_reason: Some(DISQUALIFICATION_REASON.to_string()),
        };
    }

    let mut breakdown = Vec::new();

    match lead.financial.method() {
        PaymentMethod::Cash => breakdown.push(ScoreBreakdown {
            factor: "Cash Buyer".to_string(),
            points: 30,
            reason: "cash purchase carries no financing contingency".to_string(),
        }),
        PaymentMethod::Mortgage => match lead.financial.connect_to_broker {
            Some(true) => breakdown.push(ScoreBreakdown {
                factor: "Mortgage + Wants Broker".to_string(),
                points: 15,
                reason: "financing not arranged yet but open to our broker".to_string(),
            }),
            Some(false) => breakdown.push(ScoreBreakdown {
                factor: "Mortgage + Has Broker".to_string(),
                points: 20,
                reason: "financing already arranged independently".to_string(),
            }),
            None => breakdown.push(ScoreBreakdown {
                factor: "Mortgage Buyer".to_string(),
                points: 10,
                reason: "mortgage purchase, broker situation unknown".to_string(),
            }),
        },
        PaymentMethod::Other | PaymentMethod::Unspecified => {}
    }

    match lead.requirements.purpose() {
        PurchasePurpose::PrimaryResidence => breakdown.push(ScoreBreakdown {
            factor: "Primary Residence".to_string(),
            points: 15,
            reason: "buying a home to live in".to_string(),
        }),
        PurchasePurpose::DependentStudying => breakdown.push(ScoreBreakdown {
            factor: "Dependent Studying".to_string(),
            points: 15,
            reason: "buying for a dependent studying nearby".to_string(),
        }),
        PurchasePurpose::Investment => breakdown.push(ScoreBreakdown {
            factor: "Investment".to_string(),
            points: 10,
            reason: "buy-to-let or capital growth purchase".to_string(),
        }),
        PurchasePurpose::HolidayHome => breakdown.push(ScoreBreakdown {
            factor: "Holiday Home".to_string(),
            points: 5,
            reason: "discretionary second-home purchase".to_string(),
        }),
        PurchasePurpose::Other | PurchasePurpose::Unspecified => {}
    }

    if lead.context.has_any_detail() {
        breakdown.push(ScoreBreakdown {
            factor: "Complete Context".to_string(),
            points: 10,
            reason: "development, channel, or campaign attribution present".to_string(),
        });
    }

    QualityScore {
        total: clamp_total(&breakdown),
        breakdown,
        is_disqualified: false,
        disqualification_reason: None,
    }
}

fn is_disqualified(lead: &LeadSubmission, config: &ScoringConfig) -> bool {
    let budget = lead.requirements.budget();
    match lead.requirements.bedrooms {
        Some(bedrooms) => {
            budget >= config.disqualify_budget_floor && bedrooms <= config.disqualify_bedroom_cap
        }
        None => false,
    }
}
