//! # MinIO Provider Controller
//!
//! Process entry point. See the library crate for the reconciliation flow.

use anyhow::Result;
use minio_provider_controller::config::load_config;
use minio_provider_controller::runtime::{default_registry, initialize, run_watch_loop};

#[tokio::main]
async fn main() -> Result<()> {
    let (controller_config, server_config) = load_config();

    let init_result = initialize(controller_config, server_config).await?;

    run_watch_loop(default_registry(), &init_result.setup).await
}
