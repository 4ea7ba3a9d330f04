//! # MPCCTL CLI
//!
//! Command-line interface for the MinIO provider controller.
//!
//! ## Usage
//!
//! ```bash
//! # List all ProviderConfig resources with their Ready condition
//! mpcctl list
//!
//! # Show the status of a ProviderConfig
//! mpcctl status --name default
//!
//! # Ask the controller to validate a ProviderConfig again right away
//! mpcctl reconcile --name default
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use kube::{
    api::{Api, ListParams, Patch, PatchParams},
    Client,
};
use minio_provider_controller::constants::RECONCILE_REQUESTED_ANNOTATION;
use minio_provider_controller::{CredentialsSource, ProviderConfig};
use serde_json::json;

/// MinIO provider controller CLI
#[derive(Parser)]
#[command(name = "mpcctl")]
#[command(about = "MinIO provider controller CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Trigger reconciliation for a ProviderConfig resource
    Reconcile {
        /// Name of the ProviderConfig resource
        #[arg(short, long)]
        name: String,
    },
    /// List all ProviderConfig resources
    List,
    /// Show status of a ProviderConfig resource
    Status {
        /// Name of the ProviderConfig resource
        #[arg(short, long)]
        name: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mpcctl=info".into()),
        )
        .init();

    let cli = Cli::parse();

    let client = Client::try_default()
        .await
        .context("Failed to create Kubernetes client. Ensure kubeconfig is configured.")?;
    let api: Api<ProviderConfig> = Api::all(client);

    match cli.command {
        Commands::Reconcile { name } => reconcile_command(&api, &name).await,
        Commands::List => list_command(&api).await,
        Commands::Status { name } => status_command(&api, &name).await,
    }
}

/// Trigger reconciliation by updating an annotation; the watch picks up the change
async fn reconcile_command(api: &Api<ProviderConfig>, name: &str) -> Result<()> {
    println!("Triggering reconciliation for ProviderConfig '{}'...", name);

    let timestamp = chrono::Utc::now().to_rfc3339();
    let patch = json!({
        "metadata": {
            "annotations": {
                RECONCILE_REQUESTED_ANNOTATION: timestamp
            }
        }
    });

    api.patch(name, &PatchParams::default(), &Patch::Merge(patch))
        .await
        .with_context(|| format!("Failed to trigger reconciliation for '{}'", name))?;

    println!("Reconciliation triggered successfully");
    println!("   Resource: {}", name);
    println!("   Timestamp: {}", timestamp);
    println!("\nThe controller will reconcile this resource shortly.");

    Ok(())
}

/// Ready status, reason and message of a ProviderConfig
fn ready_columns(config: &ProviderConfig) -> (&str, &str, &str) {
    match config.ready_condition() {
        Some(condition) => (
            condition.status.as_str(),
            condition.reason.as_deref().unwrap_or("-"),
            condition.message.as_deref().unwrap_or("-"),
        ),
        None => ("Unknown", "-", "-"),
    }
}

/// List all ProviderConfig resources
async fn list_command(api: &Api<ProviderConfig>) -> Result<()> {
    let configs = api
        .list(&ListParams::default())
        .await
        .context("Failed to list ProviderConfig resources")?;

    if configs.items.is_empty() {
        println!("No ProviderConfig resources found.");
        return Ok(());
    }

    println!(
        "\n{:<30} {:<18} {:<10} {:<15} MESSAGE",
        "NAME", "SOURCE", "READY", "REASON"
    );
    println!("{}", "-".repeat(100));

    for config in &configs.items {
        let (ready, reason, message) = ready_columns(config);
        println!(
            "{:<30} {:<18} {:<10} {:<15} {}",
            config.name(),
            config.spec.credentials.source.to_string(),
            ready,
            reason,
            message
        );
    }

    Ok(())
}

/// Show detailed status of a ProviderConfig resource
async fn status_command(api: &Api<ProviderConfig>, name: &str) -> Result<()> {
    let config = api
        .get(name)
        .await
        .with_context(|| format!("Failed to get ProviderConfig '{}'", name))?;

    println!("Status for ProviderConfig '{}':\n", name);

    println!("Metadata:");
    println!("  Name: {}", config.name());
    if let Some(generation) = config.metadata.generation {
        println!("  Generation: {}", generation);
    }
    if let Some(requested) = config
        .metadata
        .annotations
        .as_ref()
        .and_then(|a| a.get(RECONCILE_REQUESTED_ANNOTATION))
    {
        println!("  Reconcile Requested At: {}", requested);
    }

    let credentials = &config.spec.credentials;
    println!("\nCredentials:");
    println!("  Source: {}", credentials.source);
    match credentials.source {
        CredentialsSource::Secret => {
            if let Some(ref selector) = credentials.secret_ref {
                println!(
                    "  Secret: {}/{} (key: {})",
                    selector.namespace, selector.name, selector.key
                );
            }
        }
        CredentialsSource::Environment => {
            if let Some(ref selector) = credentials.env {
                println!("  Environment Variable: {}", selector.name);
            }
        }
        CredentialsSource::Filesystem => {
            if let Some(ref selector) = credentials.fs {
                println!("  Path: {}", selector.path);
            }
        }
        CredentialsSource::None | CredentialsSource::InjectedIdentity => {}
    }

    match config.status {
        Some(ref status) if !status.conditions.is_empty() => {
            println!("\nConditions:");
            for condition in &status.conditions {
                println!("  {}: {}", condition.r#type, condition.status);
                if let Some(ref reason) = condition.reason {
                    println!("    Reason: {}", reason);
                }
                if let Some(ref message) = condition.message {
                    println!("    Message: {}", message);
                }
                if let Some(ref time) = condition.last_transition_time {
                    println!("    Last Transition: {}", time);
                }
            }
        }
        _ => println!(
            "\nStatus: No status available (resource may not have been reconciled yet)"
        ),
    }

    Ok(())
}
