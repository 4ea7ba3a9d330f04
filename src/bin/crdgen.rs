//! Print the ProviderConfig CRD as YAML
//!
//! ```bash
//! cargo run --bin crdgen | kubectl apply -f -
//! ```

use anyhow::{Context, Result};
use kube::CustomResourceExt;
use minio_provider_controller::ProviderConfig;

fn main() -> Result<()> {
    let crd = serde_yaml::to_string(&ProviderConfig::crd()).context("Failed to serialize CRD")?;
    print!("{crd}");
    Ok(())
}
