//! Integration specifications for the lead scoring workflow.
//!
//! Scenarios run end-to-end through the public service facade and HTTP
//! router so classification, persistence, and error mapping are validated
//! together without reaching into private modules.

mod common {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::{Arc, Mutex};

    use leadscore::scoring::{
        LeadKey, LeadOutcome, LeadRecord, LeadRepository, LeadScoringService, LeadSubmission,
        RepositoryError, ScoredLead, ScoringConfig,
    };

    #[derive(Default)]
    pub struct MemoryRepository {
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

    pub fn build_service() -> (LeadScoringService<MemoryRepository>, Arc<MemoryRepository>) {
        let repository = Arc::new(MemoryRepository::default());
        let service = LeadScoringService::new(repository.clone(), ScoringConfig::default());
        (service, repository)
    }

    pub fn lead(external_id: &str) -> LeadSubmission {
        LeadSubmission {
            external_id: external_id.to_string(),
            external_source: "api".to_string(),
            ..LeadSubmission::default()
        }
    }
}

use common::{build_service, lead};
use leadscore::scoring::{lead_router, Classification, OutcomeStatus, Priority, RiskFlag};
use std::sync::Arc;
use tower::ServiceExt;

#[test]
fn high_budget_studio_enquiry_is_disqualified() {
    let (service, _) = build_service();

    let mut submission = lead("1");
    submission.requirements.budget_max = Some(2_500_000);
    submission.requirements.bedrooms = Some(1);
    submission.financial.payment_method = Some("cash".to_string());

    let response = service.score(submission).expect("scores");

    assert_eq!(response.classification, Classification::Disqualified);
    assert_eq!(response.scores.quality_score, 0);
    assert_eq!(response.priority, Priority::None);
    assert!(response.risk_flags.contains(&RiskFlag::LikelyFakeLead));
    assert_eq!(response.next_action, "Archive - do not pursue");
}

#[test]
fn confirmed_28_day_cash_buyer_is_hot() {
    let (service, _) = build_service();

    let mut submission = lead("2");
    submission.requirements.budget_min = Some(500_000);
    submission.requirements.budget_max = Some(600_000);
    submission.requirements.bedrooms = Some(2);
    submission.requirements.purchase_purpose = Some("primary_residence".to_string());
    submission.financial.payment_method = Some("cash".to_string());
    submission.financial.buying_within_28_days = Some(true);
    submission.context.channel = Some("form".to_string());

    let response = service.score(submission).expect("scores");

    assert_eq!(response.classification, Classification::HotLead);
    assert_eq!(response.priority, Priority::High);
    // cash 30 + primary residence 15 + channel attribution 10
    assert_eq!(response.scores.quality_score, 55);
    assert_eq!(response.scores.intent_score, 70);
    assert_eq!(response.scores.confidence_score, 100);
    assert_eq!(response.next_action, "Schedule viewing within 24 hours");
}

#[test]
fn own_broker_mortgage_with_no_details_is_flagged() {
    let (service, _) = build_service();

    let mut submission = lead("3");
    submission.financial.payment_method = Some("mortgage".to_string());
    submission.financial.connect_to_broker = Some(false);

    let response = service.score(submission).expect("scores");

    assert!(response
        .risk_flags
        .contains(&RiskFlag::NoFinanceConfirmation));
    assert!(response.risk_flags.contains(&RiskFlag::IncompleteProfile));
}

#[test]
fn empty_record_needs_qualification() {
    let (service, _) = build_service();

    let response = service.score(lead("4")).expect("scores");

    assert_eq!(response.scores.confidence_score, 0);
    assert_eq!(response.classification, Classification::NeedsQualification);
    assert_eq!(
        response.next_action,
        "WhatsApp to confirm budget, timeline, and requirements"
    );
}

#[test]
fn scoring_twice_returns_identical_results() {
    let (service, _) = build_service();

    let mut submission = lead("5");
    submission.requirements.budget_max = Some(800_000);
    submission.requirements.purchase_purpose = Some("investment".to_string());
    submission.financial.payment_method = Some("mortgage".to_string());

    let first = service.score(submission.clone()).expect("first");
    let second = service.score(submission).expect("second");

    assert_eq!(first.scores, second.scores);
    assert_eq!(first.classification, second.classification);
    assert_eq!(first.risk_flags, second.risk_flags);
    assert_eq!(first.summary, second.summary);
    assert_eq!(first.id, second.id, "re-scoring keeps the stored id");
}

#[test]
fn totals_stay_inside_the_clamp_bounds() {
    let (service, _) = build_service();

    let mut submission = lead("6");
    submission.requirements.budget_min = Some(100_000);
    submission.requirements.budget_max = Some(900_000);
    submission.requirements.bedrooms = Some(4);
    submission.requirements.purchase_purpose = Some("dependent_studying".to_string());
    submission.requirements.timeline = Some("moving soon".to_string());
    submission.financial.payment_method = Some("cash".to_string());
    submission.financial.connect_to_broker = Some(true);
    submission.financial.buying_within_28_days = Some(true);
    submission.context.channel = Some("form".to_string());
    submission.context.development_name = Some("Marina Heights".to_string());
    submission.context.source_campaign = Some("spring_launch".to_string());

    let response = service.score(submission).expect("scores");

    assert!(response.scores.quality_score <= 100);
    assert!(response.scores.intent_score <= 100);
    assert!(response.scores.confidence_score <= 100);
}

#[test]
fn scored_lead_can_be_closed_out_with_an_outcome() {
    let (service, _) = build_service();

    let response = service.score(lead("7")).expect("scores");
    let key = leadscore::scoring::LeadKey::new("7", "api");

    let occurred_at = response.scored_at + chrono::Duration::days(14);
    let record = service
        .record_outcome(&key, OutcomeStatus::Lost, Some(occurred_at))
        .expect("outcome recorded");

    let outcome = record.outcome.expect("outcome present");
    assert_eq!(outcome.status, OutcomeStatus::Lost);
    assert_eq!(outcome.days_to_outcome, 14);
}

#[tokio::test]
async fn batch_endpoint_isolates_the_bad_element() {
    let (service, _) = build_service();
    let router = lead_router(Arc::new(service));

    let mut first = lead("batch-1");
    first.financial.payment_method = Some("cash".to_string());
    let second = lead("");
    let third = lead("batch-3");

    let body = serde_json::to_vec(&vec![first, second, third]).unwrap();
    let response = router
        .oneshot(
            axum::http::Request::post("/api/v1/leads/score/batch")
                .header(axum::http::header::CONTENT_TYPE, "application/json")
                .body(axum::body::Body::from(body))
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), axum::http::StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    let payload: serde_json::Value = serde_json::from_slice(&bytes).expect("json payload");

    assert_eq!(payload["processed"], 2);
    assert_eq!(payload["errors"].as_array().unwrap().len(), 1);
    let ids: Vec<_> = payload["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|result| result["external_id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(ids, vec!["batch-1", "batch-3"]);
}
