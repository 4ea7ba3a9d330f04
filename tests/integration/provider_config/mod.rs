//! ProviderConfig reconciliation tests
//!
//! Drive full reconciliation cycles against an in-memory store, static
//! credential extractors and local HTTP/HTTPS targets:
//! - Ready condition for every validation outcome
//! - Status persistence and its failures
//! - Cancellation
//! - Requeue and backoff decisions

pub mod availability;
pub mod common;
