//! # Reconciler Configuration
//!
//! Settings for the ProviderConfig reconciler and its watch loop.

use super::{env_lookup, var_or_default};
use crate::constants::{
    DEFAULT_BACKOFF_MAX_SECS, DEFAULT_BACKOFF_MIN_SECS, DEFAULT_MAX_CONCURRENT_RECONCILES,
    DEFAULT_PROBE_TIMEOUT_SECS, DEFAULT_RESYNC_INTERVAL_SECS, TEST_MODE_ENV_VAR,
};
use std::time::Duration;

/// Controller configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerConfig {
    /// Upper bound on one reachability probe (seconds)
    pub probe_timeout_secs: u64,
    /// Requeue interval after every completed cycle (seconds)
    pub resync_interval_secs: u64,
    /// First retry delay after a raised error (seconds)
    pub backoff_min_secs: u64,
    /// Retry delay cap (seconds)
    pub backoff_max_secs: u64,
    /// ProviderConfigs reconciled in parallel
    pub max_concurrent_reconciles: u16,
    /// TEST ONLY. Skips credential validation and reports every well-formed
    /// ProviderConfig as available without touching the network.
    pub skip_credential_validation: bool,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            probe_timeout_secs: DEFAULT_PROBE_TIMEOUT_SECS,
            resync_interval_secs: DEFAULT_RESYNC_INTERVAL_SECS,
            backoff_min_secs: DEFAULT_BACKOFF_MIN_SECS,
            backoff_max_secs: DEFAULT_BACKOFF_MAX_SECS,
            max_concurrent_reconciles: DEFAULT_MAX_CONCURRENT_RECONCILES,
            skip_credential_validation: false,
        }
    }
}

impl ControllerConfig {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        Self::from_lookup(env_lookup)
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let backoff_min_secs =
            var_or_default(&lookup, "BACKOFF_MIN_SECS", DEFAULT_BACKOFF_MIN_SECS).max(1);
        let backoff_max_secs =
            var_or_default(&lookup, "BACKOFF_MAX_SECS", DEFAULT_BACKOFF_MAX_SECS)
                .max(backoff_min_secs);

        Self {
            probe_timeout_secs: var_or_default(
                &lookup,
                "PROBE_TIMEOUT_SECS",
                DEFAULT_PROBE_TIMEOUT_SECS,
            ),
            resync_interval_secs: var_or_default(
                &lookup,
                "RESYNC_INTERVAL_SECS",
                DEFAULT_RESYNC_INTERVAL_SECS,
            ),
            backoff_min_secs,
            backoff_max_secs,
            max_concurrent_reconciles: var_or_default(
                &lookup,
                "MAX_CONCURRENT_RECONCILES",
                DEFAULT_MAX_CONCURRENT_RECONCILES,
            )
            .max(1),
            skip_credential_validation: lookup(TEST_MODE_ENV_VAR)
                .is_some_and(|value| !value.is_empty()),
        }
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }

    pub fn resync_interval(&self) -> Duration {
        Duration::from_secs(self.resync_interval_secs)
    }
}
