//! # Constants
//!
//! Defaults shared by configuration, the reconciler and the runtime.

/// Default port for the metrics and health probe server
pub const DEFAULT_METRICS_PORT: u16 = 8080;

/// How long to wait for the HTTP server to bind before giving up (seconds)
pub const DEFAULT_SERVER_STARTUP_TIMEOUT_SECS: u64 = 10;

/// How often to poll the HTTP server readiness flag during startup (milliseconds)
pub const DEFAULT_SERVER_POLL_INTERVAL_MS: u64 = 50;

/// Upper bound on a single reachability probe (seconds)
pub const DEFAULT_PROBE_TIMEOUT_SECS: u64 = 10;

/// Periodic resync interval for ProviderConfigs (seconds)
pub const DEFAULT_RESYNC_INTERVAL_SECS: u64 = 60;

/// First retry delay after a raised reconciliation error (seconds)
pub const DEFAULT_BACKOFF_MIN_SECS: u64 = 5;

/// Maximum retry delay after repeated reconciliation errors (seconds)
pub const DEFAULT_BACKOFF_MAX_SECS: u64 = 300;

/// Fallback requeue when backoff state cannot be read (seconds)
pub const DEFAULT_RECONCILIATION_ERROR_REQUEUE_SECS: u64 = 30;

/// Number of ProviderConfigs reconciled in parallel
pub const DEFAULT_MAX_CONCURRENT_RECONCILES: u16 = 4;

/// Test-only switch: any non-empty value disables credential validation entirely.
pub const TEST_MODE_ENV_VAR: &str = "UPTEST_CLOUD_CREDENTIALS";

/// Field manager used for status patches
pub const FIELD_MANAGER: &str = "minio-provider-controller";

/// Annotation stamped by `mpcctl reconcile` to request an immediate cycle
pub const RECONCILE_REQUESTED_ANNOTATION: &str = "minio.crossplane.io/reconcile-requested-at";
