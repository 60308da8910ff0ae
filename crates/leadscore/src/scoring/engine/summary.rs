use super::classify::Classification;
use crate::scoring::domain::{LeadSubmission, PaymentMethod, PurchasePurpose};

/// One human-readable sentence for the sales queue: payment label, budget,
/// bedrooms, purpose, urgency, then a fixed assessment per classification.
/// An unset payment method reads as a mortgage buyer.
pub(crate) fn summarize(lead: &LeadSubmission, classification: Classification) -> String {
    let mut parts: Vec<String> = Vec::new();

    let payment_label = match lead.financial.method() {
        PaymentMethod::Cash => "Cash buyer",
        _ => "Mortgage buyer",
    };
    parts.push(payment_label.to_string());

    if let Some(budget) = budget_phrase(lead) {
        parts.push(format!("budget {budget}"));
    }

    if let Some(bedrooms) = lead.requirements.bedrooms {
        if bedrooms == 1 {
            parts.push("1 bedroom".to_string());
        } else {
            parts.push(format!("{bedrooms} bedrooms"));
        }
    }

    if let Some(purpose) = purpose_phrase(lead.requirements.purpose()) {
        parts.push(purpose.to_string());
    }

    if lead.financial.buying_within_28_days == Some(true) {
        parts.push("ready to complete within 28 days".to_string());
    } else if let Some(timeline) = lead.requirements.timeline.as_deref() {
        parts.push(timeline.to_string());
    }

    let sentence = format!("{}. {}", parts.join(", "), assessment(classification));

    // Timeline text is caller-supplied, so normalize whitespace at the end.
    sentence.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn budget_phrase(lead: &LeadSubmission) -> Option<String> {
    match (lead.requirements.budget_min, lead.requirements.budget_max) {
        (Some(min), Some(max)) if min != max => {
            Some(format!("{}-{}", format_amount(min), format_amount(max)))
        }
        (_, Some(single)) | (Some(single), None) => Some(format_amount(single)),
        (None, None) => None,
    }
}

fn format_amount(amount: u64) -> String {
    if amount >= 1_000_000 {
        format!("\u{a3}{:.1}M", amount as f64 / 1_000_000.0)
    } else if amount >= 1_000 {
        format!("\u{a3}{}K", (amount as f64 / 1_000.0).round() as u64)
    } else {
        format!("\u{a3}{amount}")
    }
}

fn purpose_phrase(purpose: PurchasePurpose) -> Option<&'static str> {
    match purpose {
        PurchasePurpose::PrimaryResidence => Some("buying a primary residence"),
        PurchasePurpose::DependentStudying => Some("buying for a dependent studying here"),
        PurchasePurpose::Investment => Some("buying as an investment"),
        PurchasePurpose::HolidayHome => Some("looking for a holiday home"),
        PurchasePurpose::Other | PurchasePurpose::Unspecified => None,
    }
}

fn assessment(classification: Classification) -> &'static str {
    match classification {
        Classification::HotLead => "Hot lead - prioritise immediate contact.",
        Classification::Qualified => "Qualified lead worth a prompt follow-up.",
        Classification::NeedsQualification => "Key details missing - qualify before investing time.",
        Classification::Nurture => "Good profile without urgency - keep warm.",
        Classification::LowPriority => "Low engagement expected.",
        Classification::Disqualified => "Profile flagged as not genuine - do not pursue.",
    }
}
