use super::config::ScoringConfig;
use super::{ConfidenceScore, IntentScore, QualityScore};
use serde::{Deserialize, Serialize};

/// Bucket a scored lead lands in. Drives priority and next action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    HotLead,
    Qualified,
    NeedsQualification,
    Nurture,
    LowPriority,
    Disqualified,
}

impl Classification {
    pub const fn label(self) -> &'static str {
        match self {
            Classification::HotLead => "hot_lead",
            Classification::Qualified => "qualified",
            Classification::NeedsQualification => "needs_qualification",
            Classification::Nurture => "nurture",
            Classification::LowPriority => "low_priority",
            Classification::Disqualified => "disqualified",
        }
    }

    pub const fn priority(self) -> Priority {
        match self {
            Classification::HotLead | Classification::Qualified => Priority::High,
            Classification::NeedsQualification => Priority::Medium,
            Classification::Nurture | Classification::LowPriority => Priority::Low,
            Classification::Disqualified => Priority::None,
        }
    }

    pub const fn next_action(self) -> &'static str {
        match self {
            Classification::HotLead => "Schedule viewing within 24 hours",
            Classification::Qualified => "Send development brochure + follow up in 48 hours",
            Classification::NeedsQualification => {
                "WhatsApp to confirm budget, timeline, and requirements"
            }
            Classification::Nurture => "Add to 3-month email sequence",
            Classification::LowPriority => "Monitor for re-engagement",
            Classification::Disqualified => "Archive - do not pursue",
        }
    }
}

/// Work-queue priority derived from the classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    Low,
    None,
}

impl Priority {
    pub const fn label(self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
            Priority::None => "none",
        }
    }
}

/// Ordered decision list; the first matching rule wins and the order is
/// load-bearing. Disqualification outranks the 28-day override, the 28-day
/// override outranks every threshold gate, and the low-confidence rule must
/// run before the nurture split.
pub(crate) fn classify(
    quality: &QualityScore,
    intent: &IntentScore,
    confidence: &ConfidenceScore,
    config: &ScoringConfig,
) -> Classification {
    if quality.is_disqualified {
        return Classification::Disqualified;
    }
    if intent.is_28_day_buyer {
        return Classification::HotLead;
    }
    if quality.total >= config.hot_lead.quality
        && intent.total >= config.hot_lead.intent
        && confidence.total >= config.hot_lead.confidence
    {
        return Classification::HotLead;
    }
    if quality.total >= config.qualified.quality
        && intent.total >= config.qualified.intent
        && confidence.total >= config.qualified.confidence
    {
        return Classification::Qualified;
    }
    if confidence.total < config.confidence_floor {
        return Classification::NeedsQualification;
    }
    if intent.total < config.qualified.intent && quality.total >= config.nurture_quality_floor {
        return Classification::Nurture;
    }
    Classification::LowPriority
}
