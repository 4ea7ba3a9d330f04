//! # Reconciler Types
//!
//! Reconciler context, cycle outcomes and error types.

use super::credentials::CredentialsError;
use super::endpoint::EndpointError;
use super::extractor::{CredentialExtractor, ExtractionError};
use super::probe::ProbeError;
use super::store::ProviderConfigStore;
use crate::config::ControllerConfig;
use crate::controller::backoff::FibonacciBackoff;
use crate::crd::Condition;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

/// Errors raised to the scheduler.
///
/// Validation failures never appear here; they are recorded in status instead.
#[derive(Debug, Error)]
pub enum ReconcilerError {
    #[error("cannot get ProviderConfig: {0:#}")]
    GetProviderConfig(anyhow::Error),
    #[error("cannot update status: {0:#}")]
    UpdateStatus(anyhow::Error),
    #[error("reconciliation cancelled")]
    Cancelled,
}

/// Why a ProviderConfig was marked unavailable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Credential source unreachable or payload undecodable
    Extraction,
    /// Required field missing or optional flag unparseable
    Shape,
    /// `minio_server` already carries a scheme
    Endpoint,
    /// Network or TLS failure while probing
    Reachability,
}

impl FailureKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Extraction => "extraction",
            Self::Shape => "shape",
            Self::Endpoint => "endpoint",
            Self::Reachability => "reachability",
        }
    }
}

/// Validation failure, recorded as an Unavailable condition
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error(transparent)]
    Extraction(#[from] ExtractionError),
    #[error(transparent)]
    Credentials(#[from] CredentialsError),
    #[error(transparent)]
    Endpoint(#[from] EndpointError),
    #[error(transparent)]
    Probe(#[from] ProbeError),
}

impl ValidationError {
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Extraction(_) | Self::Credentials(CredentialsError::Decode(_)) => {
                FailureKind::Extraction
            }
            Self::Credentials(_) => FailureKind::Shape,
            Self::Endpoint(_) => FailureKind::Endpoint,
            Self::Probe(_) => FailureKind::Reachability,
        }
    }
}

/// Result of one completed cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// The object is gone; nothing was written
    NotFound,
    /// Marked available; `validated` is false when validation was skipped in test mode
    Available { validated: bool },
    /// Marked unavailable with `message`
    Unavailable { kind: FailureKind, message: String },
}

impl ReconcileOutcome {
    /// Condition persisted for this outcome, `None` for `NotFound`
    pub fn condition(&self) -> Option<Condition> {
        match self {
            Self::NotFound => None,
            Self::Available { .. } => Some(Condition::available()),
            Self::Unavailable { message, .. } => Some(Condition::unavailable(message.clone())),
        }
    }

    /// Label used by the validation outcome metric
    pub fn metric_label(&self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::Available { validated: true } => "available",
            Self::Available { validated: false } => "skipped",
            Self::Unavailable { kind, .. } => kind.as_str(),
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available { .. })
    }
}

/// Tunables handed to the reconciler at construction
#[derive(Debug, Clone)]
pub struct ReconcilerOptions {
    /// TEST ONLY. Report well-formed credentials as available without any
    /// network validation. Never enable in a real deployment.
    pub skip_credential_validation: bool,
    pub probe_timeout: Duration,
    pub resync_interval: Duration,
    pub backoff_min_secs: u64,
    pub backoff_max_secs: u64,
}

impl Default for ReconcilerOptions {
    fn default() -> Self {
        Self::from(&ControllerConfig::default())
    }
}

impl From<&ControllerConfig> for ReconcilerOptions {
    fn from(config: &ControllerConfig) -> Self {
        Self {
            skip_credential_validation: config.skip_credential_validation,
            probe_timeout: config.probe_timeout(),
            resync_interval: config.resync_interval(),
            backoff_min_secs: config.backoff_min_secs,
            backoff_max_secs: config.backoff_max_secs,
        }
    }
}

/// Backoff state for a specific ProviderConfig
#[derive(Debug, Clone)]
pub struct BackoffState {
    pub backoff: FibonacciBackoff,
    pub error_count: u32,
}

impl BackoffState {
    pub fn new(min_secs: u64, max_secs: u64) -> Self {
        Self {
            backoff: FibonacciBackoff::new(min_secs, max_secs),
            error_count: 0,
        }
    }

    pub fn increment_error(&mut self) {
        self.error_count = self.error_count.saturating_add(1);
    }
}

/// Reconciler context shared by every cycle.
///
/// Holds no per-object state besides the error backoff; each cycle builds its
/// own HTTP client.
pub struct Reconciler {
    pub(super) store: Arc<dyn ProviderConfigStore>,
    pub(super) extractor: Arc<dyn CredentialExtractor>,
    pub options: ReconcilerOptions,
    /// Cancelled on process shutdown; every cycle runs under a child token
    pub shutdown: CancellationToken,
    /// Backoff per ProviderConfig name, driven by the error policy
    pub backoff_states: Mutex<HashMap<String, BackoffState>>,
}

impl std::fmt::Debug for Reconciler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reconciler")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl Reconciler {
    pub fn new(
        store: Arc<dyn ProviderConfigStore>,
        extractor: Arc<dyn CredentialExtractor>,
        options: ReconcilerOptions,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            store,
            extractor,
            options,
            shutdown,
            backoff_states: Mutex::new(HashMap::new()),
        }
    }

    /// Forget accumulated errors for `name` after a cycle completes
    pub fn reset_backoff(&self, name: &str) {
        if let Ok(mut states) = self.backoff_states.lock() {
            states.remove(name);
        }
    }
}
