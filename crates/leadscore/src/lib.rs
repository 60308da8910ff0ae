//! Lead scoring engine and the intake plumbing around it.
//!
//! The `scoring` module holds the deterministic engine (quality, intent, and
//! confidence calculators plus classification) together with the service
//! facade, repository abstraction, HTTP router, and CSV importer that expose
//! it. `config`, `telemetry`, and `error` carry the application-level
//! scaffolding shared with the API service.

pub mod config;
pub mod error;
pub mod scoring;
pub mod telemetry;
