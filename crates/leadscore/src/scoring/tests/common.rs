use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::scoring::domain::{LeadKey, LeadSubmission};
use crate::scoring::engine::{ScoringConfig, ScoringEngine};
use crate::scoring::repository::{
    LeadOutcome, LeadRecord, LeadRepository, RepositoryError, ScoredLead,
};
use crate::scoring::service::LeadScoringService;

pub(super) fn engine() -> ScoringEngine {
    ScoringEngine::new(ScoringConfig::default())
}

pub(super) fn minimal_lead(id: &str) -> LeadSubmission {
    LeadSubmission {
        external_id: id.to_string(),
        external_source: "api".to_string(),
        ..LeadSubmission::default()
    }
}

/// High-budget studio enquiry; trips the auto-disqualification rule.
pub(super) fn disqualified_lead() -> LeadSubmission {
    let mut lead = minimal_lead("lead-disqualified");
    lead.requirements.budget_max = Some(2_500_000);
    lead.requirements.bedrooms = Some(1);
    lead.financial.payment_method = Some("cash".to_string());
    lead
}

/// Cash buyer with a confirmed 28-day window; the canonical hot lead.
pub(super) fn hot_lead() -> LeadSubmission {
    let mut lead = minimal_lead("lead-hot");
    lead.requirements.budget_min = Some(500_000);
    lead.requirements.budget_max = Some(600_000);
    lead.requirements.bedrooms = Some(2);
    lead.requirements.purchase_purpose = Some("primary_residence".to_string());
    lead.financial.payment_method = Some("cash".to_string());
    lead.financial.buying_within_28_days = Some(true);
    lead.context.channel = Some("form".to_string());
    lead
}

/// Mortgage buyer who already has their own broker and told us nothing else.
pub(super) fn mortgage_no_broker_lead() -> LeadSubmission {
    let mut lead = minimal_lead("lead-mortgage");
    lead.financial.payment_method = Some("mortgage".to_string());
    lead.financial.connect_to_broker = Some(false);
    lead
}

pub(super) fn build_service() -> (LeadScoringService<MemoryRepository>, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::default());
    let service = LeadScoringService::new(repository.clone(), ScoringConfig::default());
    (service, repository)
}

#[derive(Default)]
pub(super) struct MemoryRepository {
    records: Mutex<HashMap<LeadKey, LeadRecord>>,
    sequence: AtomicU64,
}

impl LeadRepository for MemoryRepository {
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

pub(super) struct UnavailableRepository;

impl LeadRepository for UnavailableRepository {
    fn upsert(&self, _lead: ScoredLead) -> Result<LeadRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _key: &LeadKey) -> Result<Option<LeadRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn record_outcome(
        &self,
        _key: &LeadKey,
        _outcome: LeadOutcome,
    ) -> Result<LeadRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn recent(&self, _limit: usize) -> Result<Vec<LeadRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
