//! # Custom Resource Definitions
//!
//! CRD types for the MinIO provider controller.
//!
//! `ProviderConfig` is the only resource this controller reconciles. It points at
//! externally stored MinIO credentials and reports whether they are usable.

mod credentials;
mod status;

pub use credentials::*;
pub use status::*;

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// ProviderConfig Custom Resource Definition
///
/// Cluster-scoped configuration naming where the MinIO connection credentials live.
///
/// # Example
///
/// ```yaml
/// apiVersion: minio.crossplane.io/v1beta1
/// kind: ProviderConfig
/// metadata:
///   name: default
/// spec:
///   credentials:
///     source: Secret
///     secretRef:
///       namespace: crossplane-system
///       name: minio-creds
///       key: credentials
/// ```
///
/// The referenced key holds a flat JSON object:
///
/// ```json
/// {"minio_server": "minio.example.com:9000", "minio_user": "admin", "minio_password": "...", "minio_ssl": "true"}
/// ```
#[derive(CustomResource, Debug, Clone, Deserialize, Serialize, JsonSchema)]
#[kube(
    kind = "ProviderConfig",
    group = "minio.crossplane.io",
    version = "v1beta1",
    status = "ProviderConfigStatus",
    shortname = "mpc",
    category = "crossplane",
    printcolumn = r#"{"name":"Source", "type":"string", "jsonPath":".spec.credentials.source"}, {"name":"Ready", "type":"string", "jsonPath":".status.conditions[?(@.type==\"Ready\")].status"}, {"name":"Reason", "type":"string", "jsonPath":".status.conditions[?(@.type==\"Ready\")].reason"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct ProviderConfigSpec {
    /// Credentials required to authenticate to the MinIO server
    pub credentials: ProviderCredentials,
}

impl ProviderConfig {
    /// Name of the object, empty when unset
    pub fn name(&self) -> &str {
        self.metadata.name.as_deref().unwrap_or_default()
    }

    /// Ready condition from the current status, if any
    pub fn ready_condition(&self) -> Option<&Condition> {
        self.status
            .as_ref()
            .and_then(|status| status.condition(CONDITION_TYPE_READY))
    }
}
