//! # Watch Loop
//!
//! Builds the controllers from the registry and drives them until shutdown.

use crate::catalog;
use crate::controller::reconciler::{reconcile, Reconciler};
use crate::controller::setup::{ControllerRegistry, ControllerTask};
use crate::crd::ProviderConfig;
use crate::runtime::error_policy::handle_reconciliation_error;
use anyhow::Result;
use futures::{FutureExt, StreamExt};
use kube::{Api, Client};
use kube_runtime::controller::Config as ControllerRuntimeConfig;
use kube_runtime::watcher::Config as WatcherConfig;
use kube_runtime::Controller;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Watcher timeout (seconds), kept below the client read timeout so idle
/// watches are closed by the API server first
const WATCH_TIMEOUT_SECS: u32 = 25;

/// Everything the registry's initializers need
#[derive(Clone)]
pub struct SetupContext {
    pub client: Client,
    pub reconciler: Arc<Reconciler>,
    pub shutdown: CancellationToken,
    pub max_concurrent_reconciles: u16,
}

impl std::fmt::Debug for SetupContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SetupContext")
            .field("reconciler", &self.reconciler)
            .field("max_concurrent_reconciles", &self.max_concurrent_reconciles)
            .finish_non_exhaustive()
    }
}

/// Resource catalog first, then the ProviderConfig controller
pub fn default_registry() -> ControllerRegistry<SetupContext> {
    ControllerRegistry::new()
        .register("catalog", |_| {
            catalog::validate_catalog()?;
            info!(
                "- Resource catalog: {} kinds, {} external-name strategies",
                catalog::RESOURCE_KINDS.len(),
                catalog::EXTERNAL_NAME_CONFIGS.len()
            );
            Ok(None)
        })
        .register("providerconfig", |ctx| {
            info!("- ProviderConfig controller");
            Ok(Some(provider_config_controller(ctx)))
        })
}

fn provider_config_controller(ctx: &SetupContext) -> ControllerTask {
    let configs: Api<ProviderConfig> = Api::all(ctx.client.clone());

    Controller::new(configs, WatcherConfig::default().timeout(WATCH_TIMEOUT_SECS))
        .with_config(ControllerRuntimeConfig::default().concurrency(ctx.max_concurrent_reconciles))
        .graceful_shutdown_on(ctx.shutdown.clone().cancelled_owned())
        .run(reconcile, handle_reconciliation_error, ctx.reconciler.clone())
        .for_each(|result| async move {
            match result {
                Ok((obj, _action)) => debug!(provider_config = %obj.name, "Reconciled"),
                Err(e) => warn!(error = %e, "ProviderConfig controller error"),
            }
        })
        .boxed()
}

/// Set up every registered controller and run them until shutdown
///
/// # Errors
///
/// Fails when an initializer fails; controllers are not started in that case.
pub async fn run_watch_loop(
    registry: ControllerRegistry<SetupContext>,
    ctx: &SetupContext,
) -> Result<()> {
    let tasks = registry.setup_all(ctx)?;
    info!("Starting {} controller(s)", tasks.len());

    futures::future::join_all(tasks).await;

    info!("Controllers stopped");
    Ok(())
}
