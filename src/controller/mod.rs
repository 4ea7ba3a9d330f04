//! # Controller
//!
//! ProviderConfig reconciler, its error backoff, the controller registry and the
//! metrics/probe server.

pub mod backoff;
pub mod reconciler;
pub mod server;
pub mod setup;
