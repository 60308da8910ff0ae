//! Lead intake, scoring, and outcome bookkeeping.
//!
//! `engine` is the pure rules evaluator; everything else here is the
//! plumbing that feeds it (domain model, CSV import) and carries its output
//! (repository, service facade, HTTP router).

pub mod domain;
pub(crate) mod engine;
pub mod import;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    BuyerContact, Channel, Financial, LeadContext, LeadKey, LeadSubmission, OutcomeStatus,
    PaymentMethod, PurchasePurpose, Requirements, DEFAULT_EXTERNAL_SOURCE,
};
pub use engine::{
    Classification, ConfidenceScore, IntentScore, LeadScore, Priority, QualityScore, RiskFlag,
    ScoreBreakdown, ScoreGate, ScoringConfig, ScoringEngine, MODEL_VERSION,
};
pub use import::{CsvLeadImporter, LeadImportError, CSV_IMPORT_SOURCE};
pub use repository::{
    LeadOutcome, LeadRecord, LeadRepository, RepositoryError, ScoreResponse, ScoreTotals,
    ScoredLead,
};
pub use router::{lead_router, ErrorCode};
pub use service::{
    BatchScoreError, BatchScoreSummary, LeadScoringService, LeadServiceError,
    DEFAULT_MAX_BATCH_SIZE,
};
