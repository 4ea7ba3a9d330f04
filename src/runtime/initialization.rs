//! # Initialization
//!
//! Controller startup: rustls provider, tracing, metrics, the probe server,
//! the Kubernetes client and the shared reconciler context.

use crate::config::{ControllerConfig, ServerConfig};
use crate::controller::reconciler::{
    KubeCredentialExtractor, KubeProviderConfigStore, Reconciler, ReconcilerOptions,
};
use crate::controller::server::{start_server, ServerState};
use crate::crd::ProviderConfig;
use crate::observability;
use crate::runtime::watch_loop::SetupContext;
use anyhow::{Context, Result};
use kube::{api::Api, api::ListParams, Client};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn, Instrument};

/// Components needed to run the watch loop
#[derive(Debug)]
pub struct InitializationResult {
    pub setup: SetupContext,
    pub server_state: Arc<ServerState>,
}

/// Initialize the controller runtime
///
/// # Errors
///
/// Fails when the probe server cannot start or no Kubernetes client can be built.
pub async fn initialize(
    controller_config: ControllerConfig,
    server_config: ServerConfig,
) -> Result<InitializationResult> {
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        warn!("rustls crypto provider was already installed");
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "minio_provider_controller=info".into()),
        )
        .init();

    info!("Starting MinIO provider controller");
    info!(
        "Build info: timestamp={}, datetime={}, git_hash={}",
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_DATETIME"),
        env!("BUILD_GIT_HASH")
    );
    info!(?controller_config, ?server_config, "Loaded configuration");
    if controller_config.skip_credential_validation {
        warn!("Test mode enabled: ProviderConfigs become available without contacting MinIO");
    }

    observability::metrics::register_metrics()?;

    let server_state = Arc::new(ServerState::default());
    let server_state_clone = server_state.clone();
    let server_port = server_config.metrics_port;
    let server_handle = tokio::spawn(async move {
        if let Err(e) = start_server(server_port, server_state_clone).await {
            error!("HTTP server error: {:#}", e);
        }
    });
    wait_for_server_ready(&server_state, &server_handle, &server_config).await?;

    let client = Client::try_default()
        .await
        .context("failed to create Kubernetes client")?;

    let shutdown = CancellationToken::new();
    spawn_shutdown_handler(shutdown.clone());

    let reconciler = Arc::new(Reconciler::new(
        Arc::new(KubeProviderConfigStore::new(client.clone())),
        Arc::new(KubeCredentialExtractor::new(client.clone())),
        ReconcilerOptions::from(&controller_config),
        shutdown.clone(),
    ));

    summarize_existing_resources(&Api::all(client.clone())).await;

    info!("Controller initialized, starting watch loop...");

    Ok(InitializationResult {
        setup: SetupContext {
            client,
            reconciler,
            shutdown,
            max_concurrent_reconciles: controller_config.max_concurrent_reconciles,
        },
        server_state,
    })
}

/// Wait for the HTTP server to become ready
async fn wait_for_server_ready(
    server_state: &Arc<ServerState>,
    server_handle: &tokio::task::JoinHandle<()>,
    server_config: &ServerConfig,
) -> Result<()> {
    let startup_timeout = Duration::from_secs(server_config.startup_timeout_secs);
    let poll_interval = Duration::from_millis(server_config.poll_interval_ms);
    let start_time = Instant::now();

    loop {
        if server_handle.is_finished() {
            return Err(anyhow::anyhow!("HTTP server failed to start"));
        }

        if server_state.is_ready.load(Ordering::Relaxed) {
            info!("HTTP server is ready and accepting connections");
            return Ok(());
        }

        if start_time.elapsed() > startup_timeout {
            return Err(anyhow::anyhow!(
                "HTTP server failed to become ready within {} seconds",
                startup_timeout.as_secs()
            ));
        }

        tokio::time::sleep(poll_interval).await;
    }
}

/// Cancel `token` on SIGINT or SIGTERM
fn spawn_shutdown_handler(token: CancellationToken) {
    tokio::spawn(async move {
        shutdown_signal().await;
        info!("Shutdown signal received, cancelling in-flight reconciliations");
        token.cancel();
    });
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}

/// Log the ProviderConfigs present at startup
///
/// The watch picks every one of them up on its initial list, so this only
/// checks that the CRD is queryable.
async fn summarize_existing_resources(configs: &Api<ProviderConfig>) {
    let listed = configs
        .list(&ListParams::default())
        .instrument(tracing::info_span!("controller.startup.summary"))
        .await;

    match listed {
        Ok(list) => {
            let mut names: Vec<&str> = list.items.iter().map(ProviderConfig::name).collect();
            names.sort_unstable();

            info!("Resource Kind: ProviderConfig");
            info!("Total Resources: {}", names.len());
            if !names.is_empty() {
                info!(
                    "  Resources: {}",
                    if names.len() <= 3 {
                        names.join(", ")
                    } else {
                        format!("{}, ... ({} total)", names[..3].join(", "), names.len())
                    }
                );
            }
        }
        Err(e) => {
            error!("CRD is not queryable; {}. Is the CRD installed?", e);
            error!("Installation: crdgen | kubectl apply -f -");
            warn!("Continuing despite CRD queryability check failure - controller will retry");
        }
    }
}
