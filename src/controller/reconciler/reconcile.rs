//! # Reconciliation Cycle
//!
//! fetch → extract → decode → shape-check → (test-mode short-circuit) → flags →
//! endpoint → probe → status.
//!
//! Validation failures end the cycle with an Unavailable condition and are not
//! raised. Only reading the object, writing its status and cancellation surface
//! as errors.

use super::credentials::MinioCredentials;
use super::endpoint::build_endpoint;
use super::probe::probe_endpoint;
use super::types::{ReconcileOutcome, Reconciler, ReconcilerError, ValidationError};
use crate::crd::ProviderConfig;
use crate::observability;
use kube_runtime::controller::Action;
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, Instrument};
use zeroize::Zeroizing;

/// What validation established
enum Validation {
    /// Test mode: network validation skipped
    Skipped,
    /// The endpoint answered
    Reachable { endpoint: String, status: u16 },
}

impl Reconciler {
    /// Run one reconciliation cycle for the named ProviderConfig.
    pub async fn reconcile_provider_config(
        &self,
        name: &str,
        cancel: &CancellationToken,
    ) -> Result<ReconcileOutcome, ReconcilerError> {
        let span = tracing::info_span!("provider_config.reconcile", provider_config = name);
        async {
            debug!("Reconciling");

            let config = match cancellable(cancel, self.store.get(name)).await? {
                Ok(Some(config)) => config,
                Ok(None) => {
                    debug!("ProviderConfig not found, ending cycle");
                    return Ok(ReconcileOutcome::NotFound);
                }
                Err(e) => {
                    debug!(error = %format!("{e:#}"), "cannot get ProviderConfig");
                    return Err(ReconcilerError::GetProviderConfig(e));
                }
            };

            let outcome = match cancellable(cancel, self.validate(&config)).await? {
                Ok(Validation::Skipped) => {
                    debug!("Skipping credential validation in test mode");
                    ReconcileOutcome::Available { validated: false }
                }
                Ok(Validation::Reachable { endpoint, status }) => {
                    info!(endpoint = %endpoint, status, "MinIO credentials validated");
                    ReconcileOutcome::Available { validated: true }
                }
                Err(e) => {
                    let kind = e.kind();
                    debug!(reason = kind.as_str(), error = %e, "ProviderConfig unavailable");
                    ReconcileOutcome::Unavailable {
                        kind,
                        message: e.to_string(),
                    }
                }
            };

            if let Some(condition) = outcome.condition() {
                cancellable(cancel, self.write_condition(name, &config, condition)).await??;
            }
            observability::metrics::increment_validation_outcome(outcome.metric_label());

            Ok::<_, ReconcilerError>(outcome)
        }
        .instrument(span)
        .await
    }

    async fn validate(&self, config: &ProviderConfig) -> Result<Validation, ValidationError> {
        let payload = Zeroizing::new(self.extractor.extract(&config.spec.credentials).await?);
        let credentials = MinioCredentials::from_payload(&payload)?;

        if self.options.skip_credential_validation {
            return Ok(Validation::Skipped);
        }

        let settings = credentials.connection_settings()?;
        let endpoint = build_endpoint(&credentials.server, settings.use_ssl)?;

        let started = Instant::now();
        let probed = probe_endpoint(
            &endpoint,
            settings.skip_tls_verify(),
            self.options.probe_timeout,
        )
        .await;
        observability::metrics::observe_probe_duration(started.elapsed().as_secs_f64());

        let status = probed?;
        Ok(Validation::Reachable { endpoint, status })
    }
}

/// Race `fut` against cancellation; cancellation wins ties
async fn cancellable<F: Future>(
    cancel: &CancellationToken,
    fut: F,
) -> Result<F::Output, ReconcilerError> {
    tokio::select! {
        biased;
        () = cancel.cancelled() => Err(ReconcilerError::Cancelled),
        output = fut => Ok(output),
    }
}

/// kube-runtime entry point.
///
/// The object handed in by the watch only supplies the identity; the cycle
/// re-reads the latest version itself.
pub async fn reconcile(
    config: Arc<ProviderConfig>,
    ctx: Arc<Reconciler>,
) -> Result<Action, ReconcilerError> {
    let name = config.name().to_string();
    let started = Instant::now();
    observability::metrics::increment_reconciliations();

    let cancel = ctx.shutdown.child_token();
    let result = ctx.reconcile_provider_config(&name, &cancel).await;
    observability::metrics::observe_reconciliation_duration(started.elapsed().as_secs_f64());

    let outcome = result?;
    ctx.reset_backoff(&name);

    match outcome {
        ReconcileOutcome::NotFound => Ok(Action::await_change()),
        ReconcileOutcome::Available { .. } | ReconcileOutcome::Unavailable { .. } => {
            observability::metrics::increment_requeues_total("resync");
            Ok(Action::requeue(ctx.options.resync_interval))
        }
    }
}
