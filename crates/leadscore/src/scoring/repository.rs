use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{LeadKey, LeadSubmission, OutcomeStatus};
use super::engine::{Classification, LeadScore, Priority, RiskFlag};

/// A scored lead as handed to the repository: the untouched submission kept
/// as the audit payload, the engine output, and the scoring metadata the
/// persistence layer stamps on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredLead {
    pub submission: LeadSubmission,
    pub score: LeadScore,
    pub model_version: String,
    /// Wall-clock duration of the scoring call. Observability only.
    pub score_time_ms: u64,
    pub scored_at: DateTime<Utc>,
}

/// Repository row: the scored lead plus the storage-assigned id and any
/// terminal outcome recorded later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadRecord {
    pub id: u64,
    #[serde(flatten)]
    pub scored: ScoredLead,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<LeadOutcome>,
}

impl LeadRecord {
    pub fn key(&self) -> LeadKey {
        self.scored.submission.key()
    }

    /// Flattened view returned by the scoring endpoints.
    pub fn response_view(&self) -> ScoreResponse {
        let score = &self.scored.score;
        ScoreResponse {
            id: self.id,
            external_id: self.scored.submission.external_id.clone(),
            external_source: self.scored.submission.external_source.clone(),
            scores: ScoreTotals {
                quality_score: score.quality.total,
                intent_score: score.intent.total,
                confidence_score: score.confidence.total,
            },
            classification: score.classification,
            priority: score.priority,
            risk_flags: score.risk_flags.clone(),
            next_action: score.next_action.clone(),
            summary: score.summary.clone(),
            model_version: self.scored.model_version.clone(),
            scored_at: self.scored.scored_at,
        }
    }
}

/// Terminal outcome bookkeeping; never re-runs the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadOutcome {
    pub status: OutcomeStatus,
    pub recorded_at: DateTime<Utc>,
    /// Whole days between scoring and the outcome.
    pub days_to_outcome: i64,
}

/// Storage abstraction so the service module can be exercised in isolation.
/// `upsert` is keyed by `external_id` + `external_source`: re-scoring an
/// existing lead overwrites the row but keeps its id.
pub trait LeadRepository: Send + Sync {
    fn upsert(&self, lead: ScoredLead) -> Result<LeadRecord, RepositoryError>;
    fn fetch(&self, key: &LeadKey) -> Result<Option<LeadRecord>, RepositoryError>;
    fn record_outcome(&self, key: &LeadKey, outcome: LeadOutcome)
        -> Result<LeadRecord, RepositoryError>;
    fn recent(&self, limit: usize) -> Result<Vec<LeadRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("lead not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Wire shape of a scored lead on the single and batch endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResponse {
    pub id: u64,
    pub external_id: String,
    pub external_source: String,
    pub scores: ScoreTotals,
    pub classification: Classification,
    pub priority: Priority,
    pub risk_flags: Vec<RiskFlag>,
    pub next_action: String,
    pub summary: String,
    pub model_version: String,
    pub scored_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreTotals {
    pub quality_score: u8,
    pub intent_score: u8,
    pub confidence_score: u8,
}
