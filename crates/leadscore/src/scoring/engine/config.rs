use serde::{Deserialize, Serialize};

/// Score floors a lead must clear on all three axes at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreGate {
    pub quality: u8,
    pub intent: u8,
    pub confidence: u8,
}

/// Threshold configuration for the scoring engine.
///
/// `Default` is the production rule book; tests tweak individual dials.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Budget at or above which a low bedroom count disqualifies the lead.
    pub disqualify_budget_floor: u64,
    /// Bedroom count at or below which the budget floor above applies.
    pub disqualify_bedroom_cap: u8,
    pub hot_lead: ScoreGate,
    pub qualified: ScoreGate,
    /// Below this confidence the lead always needs qualification.
    pub confidence_floor: u8,
    /// Quality required for a low-intent lead to be worth nurturing.
    pub nurture_quality_floor: u8,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            disqualify_budget_floor: 2_000_000,
            disqualify_bedroom_cap: 1,
            hot_lead: ScoreGate {
                quality: 70,
                intent: 70,
                confidence: 60,
            },
            qualified: ScoreGate {
                quality: 60,
                intent: 50,
                confidence: 50,
            },
            confidence_floor: 50,
            nurture_quality_floor: 50,
        }
    }
}
