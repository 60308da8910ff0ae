mod classify;
mod confidence;
mod config;
mod intent;
mod quality;
mod risk;
mod summary;

pub use classify::{Classification, Priority};
pub use config::{ScoreGate, ScoringConfig};
pub use risk::RiskFlag;

use crate::scoring::domain::LeadSubmission;
use serde::{Deserialize, Serialize};

/// Version tag persisted beside every score so historical rows can be
/// re-evaluated when the rule book changes.
pub const MODEL_VERSION: &str = "1.0";

/// Stateless rules evaluator. Pure over its input: the same submission
/// always produces the same result, so it is safe to share and to call
/// concurrently.
pub struct ScoringEngine {
    config: ScoringConfig,
}

impl ScoringEngine {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Run the calculators, then classification, flags, action, and summary.
    /// Total over any well-formed submission; missing optional fields are
    /// data, not errors.
    pub fn score(&self, lead: &LeadSubmission) -> LeadScore {
        let quality = quality::score(lead, &self.config);
        let intent = intent::score(lead);
        let confidence = confidence::score(lead);

        let classification = classify::classify(&quality, &intent, &confidence, &self.config);
        let priority = classification.priority();
        let risk_flags = risk::flags(lead, &self.config);
        let next_action = classification.next_action().to_string();
        let summary = summary::summarize(lead, classification);

        LeadScore {
            quality,
            intent,
            confidence,
            classification,
            priority,
            risk_flags,
            next_action,
            summary,
        }
    }
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self::new(ScoringConfig::default())
    }
}

/// Discrete contribution to one of the three scores, kept for audits. Never
/// read back by any rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub factor: String,
    pub points: u8,
    pub reason: String,
}

/// "Can they complete?" result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityScore {
    pub total: u8,
    pub breakdown: Vec<ScoreBreakdown>,
    pub is_disqualified: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disqualification_reason: Option<String>,
}

/// "How urgent?" result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentScore {
    pub total: u8,
    pub breakdown: Vec<ScoreBreakdown>,
    pub is_28_day_buyer: bool,
}

/// Data-completeness result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfidenceScore {
    pub total: u8,
    pub breakdown: Vec<ScoreBreakdown>,
}

/// Full engine output for one lead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadScore {
    pub quality: QualityScore,
    pub intent: IntentScore,
    pub confidence: ConfidenceScore,
    pub classification: Classification,
    pub priority: Priority,
    pub risk_flags: Vec<RiskFlag>,
    pub next_action: String,
    pub summary: String,
}

/// Sum a breakdown and clamp into [0, 100]. The tables cannot exceed 100
/// today, but the clamp is part of the contract.
fn clamp_total(breakdown: &[ScoreBreakdown]) -> u8 {
    let sum: u32 = breakdown.iter().map(|entry| u32::from(entry.points)).sum();
    sum.min(100) as u8
}
