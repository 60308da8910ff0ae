use super::{clamp_total, ConfidenceScore, ScoreBreakdown};
use crate::scoring::domain::LeadSubmission;

const POINTS_PER_FIELD: u8 = 20;

/// "How complete is the data?" Five independent binary checks, 20 points
/// each. A value of zero or `false` still counts as provided.
pub(crate) fn score(lead: &LeadSubmission) -> ConfidenceScore {
    let mut breakdown = Vec::new();

    let mut check = |provided: bool, factor: &str, reason: &str| {
        if provided {
            breakdown.push(ScoreBreakdown {
                factor: factor.to_string(),
                points: POINTS_PER_FIELD,
                reason: reason.to_string(),
            });
        }
    };

    check(
        lead.requirements.has_budget(),
        "Budget Provided",
        "budget range or single bound present",
    );
    check(
        lead.requirements.bedrooms.is_some(),
        "Bedrooms Provided",
        "bedroom requirement stated",
    );
    check(
        lead.requirements.purchase_purpose.is_some(),
        "Purpose Provided",
        "purchase purpose stated",
    );
    check(
        lead.financial.payment_method.is_some(),
        "Payment Method Provided",
        "financing route stated",
    );
    check(
        lead.requirements.timeline.is_some() || lead.financial.buying_within_28_days.is_some(),
        "Timeline Provided",
        "timeline or 28-day answer present",
    );

    ConfidenceScore {
        total: clamp_total(&breakdown),
        breakdown,
    }
}
