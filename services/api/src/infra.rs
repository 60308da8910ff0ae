use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use leadscore::scoring::{
    LeadKey, LeadOutcome, LeadRecord, LeadRepository, RepositoryError, ScoredLead,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Map-backed repository standing in for the lead table. Ids are assigned on
/// first insert and survive re-scores of the same key.
#[derive(Default)]
pub(crate) struct InMemoryLeadRepository {
    records: Mutex<HashMap<LeadKey, LeadRecord>>,
    sequence: AtomicU64,
}

impl LeadRepository for InMemoryLeadRepository {
    fn upsert(&self, lead: ScoredLead) -> Result<LeadRecord, RepositoryError> {
        let key = lead.submission.key();
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        let id = match guard.get(&key) {
            Some(existing) => existing.id,
            None => self.sequence.fetch_add(1, Ordering::Relaxed) + 1,
        };
        let record = LeadRecord {
            id,
            scored: lead,
            outcome: None,
        };
        guard.insert(key, record.clone());
        Ok(record)
    }

    fn fetch(&self, key: &LeadKey) -> Result<Option<LeadRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(key).cloned())
    }

    fn record_outcome(
        &self,
        key: &LeadKey,
        outcome: LeadOutcome,
    ) -> Result<LeadRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        let record = guard.get_mut(key).ok_or(RepositoryError::NotFound)?;
        record.outcome = Some(outcome);
        Ok(record.clone())
    }

    fn recent(&self, limit: usize) -> Result<Vec<LeadRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        let mut records: Vec<_> = guard.values().cloned().collect();
        records.sort_by(|a, b| b.scored.scored_at.cmp(&a.scored.scored_at));
        records.truncate(limit);
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use leadscore::scoring::{LeadSubmission, ScoringConfig, ScoringEngine, MODEL_VERSION};

    fn scored(external_id: &str) -> ScoredLead {
        let submission = LeadSubmission {
            external_id: external_id.to_string(),
            external_source: "api".to_string(),
            ..LeadSubmission::default()
        };
        let score = ScoringEngine::new(ScoringConfig::default()).score(&submission);
        ScoredLead {
            submission,
            score,
            model_version: MODEL_VERSION.to_string(),
            score_time_ms: 0,
            scored_at: Utc::now(),
        }
    }

    #[test]
    fn upsert_preserves_ids_across_rescores() {
        let repository = InMemoryLeadRepository::default();

        let first = repository.upsert(scored("infra-1")).expect("insert");
        let second = repository.upsert(scored("infra-1")).expect("overwrite");
        let third = repository.upsert(scored("infra-2")).expect("insert");

        assert_eq!(first.id, second.id);
        assert_ne!(first.id, third.id);
    }

    #[test]
    fn outcome_updates_require_an_existing_record() {
        let repository = InMemoryLeadRepository::default();
        let missing = LeadKey::new("ghost", "api");

        let error = repository
            .record_outcome(
                &missing,
                LeadOutcome {
                    status: leadscore::scoring::OutcomeStatus::Lost,
                    recorded_at: Utc::now(),
                    days_to_outcome: 0,
                },
            )
            .expect_err("missing record");

        assert!(matches!(error, RepositoryError::NotFound));
    }
}
