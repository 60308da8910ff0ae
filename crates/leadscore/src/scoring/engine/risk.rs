use super::config::ScoringConfig;
use crate::scoring::domain::{LeadSubmission, PaymentMethod, PurchasePurpose};
use serde::{Deserialize, Serialize};

/// Hints surfaced beside the scores that do not modify any of them. Rendered
/// on the wire as snake_case tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskFlag {
    LikelyFakeLead,
    NoFinanceConfirmation,
    LowUrgency,
    IncompleteProfile,
    TimeSensitiveVisa,
}

impl RiskFlag {
    pub const fn label(self) -> &'static str {
        match self {
            RiskFlag::LikelyFakeLead => "likely_fake_lead",
            RiskFlag::NoFinanceConfirmation => "no_finance_confirmation",
            RiskFlag::LowUrgency => "low_urgency",
            RiskFlag::IncompleteProfile => "incomplete_profile",
            RiskFlag::TimeSensitiveVisa => "time_sensitive_visa",
        }
    }
}

/// Timeline hints that make a holiday-home purchase look far out.
const FAR_OUT_HINTS: [&str; 3] = ["6 month", "12 month", "year"];

/// Each rule fires independently of the others; a lead can carry several
/// flags. Exception: the three missing-field checks are one else-if chain by
/// design, so `incomplete_profile` appears at most once.
pub(crate) fn flags(lead: &LeadSubmission, config: &ScoringConfig) -> Vec<RiskFlag> {
    let mut flags = Vec::new();

    if let Some(bedrooms) = lead.requirements.bedrooms {
        if lead.requirements.budget() >= config.disqualify_budget_floor
            && bedrooms <= config.disqualify_bedroom_cap
        {
            flags.push(RiskFlag::LikelyFakeLead);
        }
    }

    if lead.financial.method() == PaymentMethod::Mortgage
        && lead.financial.connect_to_broker == Some(false)
    {
        flags.push(RiskFlag::NoFinanceConfirmation);
    }

    if lead.requirements.purpose() == PurchasePurpose::HolidayHome {
        if let Some(timeline) = lead.requirements.timeline.as_deref() {
            let timeline = timeline.to_lowercase();
            if FAR_OUT_HINTS.iter().any(|hint| timeline.contains(hint)) {
                flags.push(RiskFlag::LowUrgency);
            }
        }
    }

    if !lead.requirements.has_budget() {
        flags.push(RiskFlag::IncompleteProfile);
    } else if lead.requirements.purchase_purpose.is_none() {
        flags.push(RiskFlag::IncompleteProfile);
    } else if lead.financial.payment_method.is_none() {
        flags.push(RiskFlag::IncompleteProfile);
    }

    if lead.requirements.purpose() == PurchasePurpose::DependentStudying {
        flags.push(RiskFlag::TimeSensitiveVisa);
    }

    flags
}
