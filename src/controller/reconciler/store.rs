//! # ProviderConfig Store
//!
//! Reads ProviderConfigs and persists their status.

use crate::constants::FIELD_MANAGER;
use crate::crd::{ProviderConfig, ProviderConfigStatus};
use anyhow::{Context, Result};
use async_trait::async_trait;
use kube::api::{Patch, PatchParams};
use kube::{Api, Client};

/// Persistence used by the reconciler
#[async_trait]
pub trait ProviderConfigStore: Send + Sync {
    /// Current object, `None` when it no longer exists
    async fn get(&self, name: &str) -> Result<Option<ProviderConfig>>;

    /// Replace the object's status in a single write
    async fn update_status(&self, name: &str, status: &ProviderConfigStatus) -> Result<()>;
}

/// Store backed by the cluster-scoped ProviderConfig API
#[derive(Clone)]
pub struct KubeProviderConfigStore {
    api: Api<ProviderConfig>,
}

impl KubeProviderConfigStore {
    pub fn new(client: Client) -> Self {
        Self {
            api: Api::all(client),
        }
    }
}

impl std::fmt::Debug for KubeProviderConfigStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KubeProviderConfigStore").finish_non_exhaustive()
    }
}

#[async_trait]
impl ProviderConfigStore for KubeProviderConfigStore {
    async fn get(&self, name: &str) -> Result<Option<ProviderConfig>> {
        self.api
            .get_opt(name)
            .await
            .with_context(|| format!("failed to get ProviderConfig {name}"))
    }

    async fn update_status(&self, name: &str, status: &ProviderConfigStatus) -> Result<()> {
        let patch = serde_json::json!({
            "status": status
        });

        self.api
            .patch_status(name, &PatchParams::apply(FIELD_MANAGER), &Patch::Merge(patch))
            .await
            .with_context(|| format!("failed to update status of ProviderConfig {name}"))?;

        Ok(())
    }
}
