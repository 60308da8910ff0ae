use super::{clamp_total, IntentScore, ScoreBreakdown};
use crate::scoring::domain::{Channel, LeadSubmission, PurchasePurpose};

/// Free-text timeline hints indicating a purchase inside three months.
const SHORT_TERM_HINTS: [&str; 5] = ["3 month", "1-3", "2-3", "short", "soon"];
/// Hints indicating roughly a six month horizon.
const MID_TERM_HINTS: [&str; 3] = ["6 month", "3-6", "half"];

/// "How urgent?" The explicit 28-day flag dominates and skips the free-text
/// timeline entirely; the rest is additive.
pub(crate) fn score(lead: &LeadSubmission) -> IntentScore {
    let mut breakdown = Vec::new();
    let is_28_day_buyer = lead.financial.buying_within_28_days == Some(true);

    if is_28_day_buyer {
        breakdown.push(ScoreBreakdown {
            factor: "28-Day Purchase Intent".to_string(),
            points: 40,
            reason: "confirmed ready to complete within 28 days".to_string(),
        });
    } else if let Some(timeline) = lead.requirements.timeline.as_deref() {
        if matches_any(timeline, &SHORT_TERM_HINTS) {
            breakdown.push(ScoreBreakdown {
                factor: "Short Timeline".to_string(),
                points: 25,
                reason: "stated timeline suggests purchase within three months".to_string(),
            });
        } else if matches_any(timeline, &MID_TERM_HINTS) {
            breakdown.push(ScoreBreakdown {
                factor: "Medium Timeline".to_string(),
                points: 5,
                reason: "stated timeline suggests roughly six months out".to_string(),
            });
        }
    }

    match lead.requirements.purpose() {
        PurchasePurpose::DependentStudying => breakdown.push(ScoreBreakdown {
            factor: "Dependent Studying".to_string(),
            points: 25,
            reason: "term dates impose a hard move-in deadline".to_string(),
        }),
        PurchasePurpose::PrimaryResidence => breakdown.push(ScoreBreakdown {
            factor: "Primary Residence".to_string(),
            points: 20,
            reason: "own-home purchases move faster than discretionary ones".to_string(),
        }),
        PurchasePurpose::Investment => breakdown.push(ScoreBreakdown {
            factor: "Investment".to_string(),
            points: 10,
            reason: "investors transact on opportunity, not need".to_string(),
        }),
        PurchasePurpose::HolidayHome => breakdown.push(ScoreBreakdown {
            factor: "Holiday Home".to_string(),
            points: 5,
            reason: "second-home purchases rarely carry urgency".to_string(),
        }),
        PurchasePurpose::Other | PurchasePurpose::Unspecified => {}
    }

    if lead.financial.connect_to_broker == Some(true) {
        breakdown.push(ScoreBreakdown {
            factor: "Wants Broker Connection".to_string(),
            points: 10,
            reason: "asked to be connected to a mortgage broker".to_string(),
        });
    }

    match lead.context.channel() {
        Channel::Form | Channel::Website => breakdown.push(ScoreBreakdown {
            factor: "Direct Channel".to_string(),
            points: 10,
            reason: "came in through the site rather than a broadcast channel".to_string(),
        }),
        Channel::Whatsapp => breakdown.push(ScoreBreakdown {
            factor: "WhatsApp Channel".to_string(),
            points: 5,
            reason: "conversational channel, moderate engagement".to_string(),
        }),
        Channel::Other | Channel::Unspecified => {}
    }

    IntentScore {
        total: clamp_total(&breakdown),
        breakdown,
        is_28_day_buyer,
    }
}

fn matches_any(timeline: &str, hints: &[&str]) -> bool {
    let timeline = timeline.to_lowercase();
    hints.iter().any(|hint| timeline.contains(hint))
}
