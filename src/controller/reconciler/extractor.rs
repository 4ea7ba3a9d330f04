//! # Credential Extraction
//!
//! Fetches the raw credential blob a ProviderConfig points at.

use crate::crd::{CredentialsSource, EnvSelector, FsSelector, ProviderCredentials};
use async_trait::async_trait;
use k8s_openapi::api::core::v1::Secret;
use kube::{Api, Client};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("cannot extract from secret key when none specified")]
    MissingSecretRef,
    #[error("cannot extract from environment variable when none specified")]
    MissingEnvSelector,
    #[error("cannot extract from filesystem when no path specified")]
    MissingFsSelector,
    #[error("cannot get credentials secret {namespace}/{name}: {source}")]
    SecretUnavailable {
        namespace: String,
        name: String,
        #[source]
        source: kube::Error,
    },
    #[error("credentials secret {namespace}/{name} has no key {key}")]
    SecretKeyMissing {
        namespace: String,
        name: String,
        key: String,
    },
    #[error("cannot read credentials file {path}: {source}")]
    FileUnreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("no extraction handler registered for source: {0}")]
    UnsupportedSource(CredentialsSource),
}

/// Fetches credential bytes for a credentials reference
#[async_trait]
pub trait CredentialExtractor: Send + Sync {
    async fn extract(&self, credentials: &ProviderCredentials) -> Result<Vec<u8>, ExtractionError>;
}

/// Extractor backed by the Kubernetes API, the process environment and the local filesystem
#[derive(Clone)]
pub struct KubeCredentialExtractor {
    client: Client,
}

impl KubeCredentialExtractor {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    async fn extract_secret(
        &self,
        credentials: &ProviderCredentials,
    ) -> Result<Vec<u8>, ExtractionError> {
        let selector = credentials
            .secret_ref
            .as_ref()
            .ok_or(ExtractionError::MissingSecretRef)?;

        let secrets: Api<Secret> = Api::namespaced(self.client.clone(), &selector.namespace);
        let secret = secrets.get(&selector.name).await.map_err(|source| {
            ExtractionError::SecretUnavailable {
                namespace: selector.namespace.clone(),
                name: selector.name.clone(),
                source,
            }
        })?;

        secret
            .data
            .and_then(|mut data| data.remove(&selector.key))
            .map(|bytes| bytes.0)
            .ok_or_else(|| ExtractionError::SecretKeyMissing {
                namespace: selector.namespace.clone(),
                name: selector.name.clone(),
                key: selector.key.clone(),
            })
    }
}

impl std::fmt::Debug for KubeCredentialExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KubeCredentialExtractor").finish_non_exhaustive()
    }
}

#[async_trait]
impl CredentialExtractor for KubeCredentialExtractor {
    async fn extract(&self, credentials: &ProviderCredentials) -> Result<Vec<u8>, ExtractionError> {
        match credentials.source {
            CredentialsSource::Secret => self.extract_secret(credentials).await,
            CredentialsSource::Environment => {
                extract_env(credentials.env.as_ref(), |name| std::env::var(name).ok())
            }
            CredentialsSource::Filesystem => extract_fs(credentials.fs.as_ref()).await,
            // Nothing to extract; the empty payload fails decoding downstream
            CredentialsSource::None => Ok(Vec::new()),
            CredentialsSource::InjectedIdentity => {
                Err(ExtractionError::UnsupportedSource(credentials.source))
            }
        }
    }
}

/// Value of the selected environment variable; unset reads as empty
pub fn extract_env<F>(selector: Option<&EnvSelector>, lookup: F) -> Result<Vec<u8>, ExtractionError>
where
    F: Fn(&str) -> Option<String>,
{
    let selector = selector.ok_or(ExtractionError::MissingEnvSelector)?;
    Ok(lookup(&selector.name).unwrap_or_default().into_bytes())
}

/// Contents of the selected file
pub async fn extract_fs(selector: Option<&FsSelector>) -> Result<Vec<u8>, ExtractionError> {
    let selector = selector.ok_or(ExtractionError::MissingFsSelector)?;
    tokio::fs::read(&selector.path)
        .await
        .map_err(|source| ExtractionError::FileUnreadable {
            path: selector.path.clone(),
            source,
        })
}
