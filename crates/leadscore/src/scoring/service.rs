use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::domain::{LeadKey, LeadSubmission, OutcomeStatus, DEFAULT_EXTERNAL_SOURCE};
use super::engine::{ScoringConfig, ScoringEngine, MODEL_VERSION};
use super::repository::{
    LeadOutcome, LeadRecord, LeadRepository, RepositoryError, ScoreResponse, ScoredLead,
};

/// Default ceiling on batch size; callers can lower or raise it via config.
pub const DEFAULT_MAX_BATCH_SIZE: usize = 100;

/// Service facade composing the scoring engine with a repository. Scoring
/// itself is pure; everything clock- or storage-shaped happens here.
pub struct LeadScoringService<R> {
    repository: Arc<R>,
    engine: Arc<ScoringEngine>,
    api_key: Option<String>,
    max_batch_size: usize,
}

impl<R> LeadScoringService<R>
where
    R: LeadRepository + 'static,
{
    pub fn new(repository: Arc<R>, config: ScoringConfig) -> Self {
        Self {
            repository,
            engine: Arc::new(ScoringEngine::new(config)),
            api_key: None,
            max_batch_size: DEFAULT_MAX_BATCH_SIZE,
        }
    }

    /// Require `x-api-key` equality on every call routed through `authorize`.
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key;
        self
    }

    pub fn with_max_batch_size(mut self, max_batch_size: usize) -> Self {
        self.max_batch_size = max_batch_size;
        self
    }

    pub fn max_batch_size(&self) -> usize {
        self.max_batch_size
    }

    /// Check a presented API key against the configured one. A service with
    /// no key configured accepts every caller.
    pub fn authorize(&self, presented: Option<&str>) -> Result<(), LeadServiceError> {
        match &self.api_key {
            None => Ok(()),
            Some(expected) if presented == Some(expected.as_str()) => Ok(()),
            Some(_) => Err(LeadServiceError::InvalidApiKey),
        }
    }

    /// Score one lead and upsert the result. The repository keeps the id
    /// stable when the same `external_id` + `external_source` is re-scored.
    pub fn score(&self, mut submission: LeadSubmission) -> Result<ScoreResponse, LeadServiceError> {
        if submission.external_id.trim().is_empty() {
            return Err(LeadServiceError::MissingExternalId);
        }
        if submission.external_source.trim().is_empty() {
            submission.external_source = DEFAULT_EXTERNAL_SOURCE.to_string();
        }

        let started = Instant::now();
        let score = self.engine.score(&submission);
        let score_time_ms = started.elapsed().as_millis() as u64;

        let record = self.repository.upsert(ScoredLead {
            submission,
            score,
            model_version: MODEL_VERSION.to_string(),
            score_time_ms,
            scored_at: Utc::now(),
        })?;

        info!(
            external_id = %record.scored.submission.external_id,
            classification = record.scored.score.classification.label(),
            score_time_ms,
            "lead scored"
        );

        Ok(record.response_view())
    }

    /// Score up to `max_batch_size` leads with per-lead error isolation: a
    /// failing element becomes an error entry and never aborts its siblings.
    pub fn score_batch(
        &self,
        submissions: Vec<LeadSubmission>,
    ) -> Result<BatchScoreSummary, LeadServiceError> {
        if submissions.len() > self.max_batch_size {
            return Err(LeadServiceError::BatchTooLarge {
                limit: self.max_batch_size,
                submitted: submissions.len(),
            });
        }

        let mut results = Vec::with_capacity(submissions.len());
        let mut errors = Vec::new();

        for submission in submissions {
            let external_id = submission.external_id.clone();
            match self.score(submission) {
                Ok(response) => results.push(response),
                Err(error) => errors.push(BatchScoreError {
                    external_id,
                    error: error.to_string(),
                }),
            }
        }

        Ok(BatchScoreSummary {
            processed: results.len(),
            results,
            errors,
        })
    }

    pub fn get(&self, key: &LeadKey) -> Result<LeadRecord, LeadServiceError> {
        self.repository
            .fetch(key)?
            .ok_or(LeadServiceError::NotFound)
    }

    /// Record a terminal outcome against a scored lead. `days_to_outcome` is
    /// the whole-day difference from the original scoring time.
    pub fn record_outcome(
        &self,
        key: &LeadKey,
        status: OutcomeStatus,
        occurred_at: Option<DateTime<Utc>>,
    ) -> Result<LeadRecord, LeadServiceError> {
        let record = self.get(key)?;
        let recorded_at = occurred_at.unwrap_or_else(Utc::now);
        let days_to_outcome = recorded_at
            .signed_duration_since(record.scored.scored_at)
            .num_days();

        let updated = self.repository.record_outcome(
            key,
            LeadOutcome {
                status,
                recorded_at,
                days_to_outcome,
            },
        )?;

        info!(
            external_id = %key.external_id,
            outcome = status.label(),
            days_to_outcome,
            "lead outcome recorded"
        );

        Ok(updated)
    }

    pub fn recent(&self, limit: usize) -> Result<Vec<LeadRecord>, LeadServiceError> {
        Ok(self.repository.recent(limit)?)
    }
}

/// Outcome of a batch call; failures ride alongside the successes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchScoreSummary {
    pub results: Vec<ScoreResponse>,
    pub processed: usize,
    pub errors: Vec<BatchScoreError>,
}

/// One failed batch element, keyed by the id the caller sent (possibly
/// blank, which is itself the usual failure).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchScoreError {
    pub external_id: String,
    pub error: String,
}

/// Error raised by the scoring service.
#[derive(Debug, thiserror::Error)]
pub enum LeadServiceError {
    #[error("invalid or missing API key")]
    InvalidApiKey,
    #[error("external_id is required")]
    MissingExternalId,
    #[error("batch of {submitted} exceeds the {limit}-lead limit")]
    BatchTooLarge { limit: usize, submitted: usize },
    #[error("lead not found")]
    NotFound,
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
