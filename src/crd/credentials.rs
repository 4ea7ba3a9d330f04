//! # Credential Source
//!
//! Where a ProviderConfig's credential payload is fetched from.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Credentials reference of a ProviderConfig
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProviderCredentials {
    /// Source of the provider credentials
    pub source: CredentialsSource,
    /// Secret key holding the credentials (source: Secret)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_ref: Option<SecretKeySelector>,
    /// Environment variable holding the credentials (source: Environment)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env: Option<EnvSelector>,
    /// File holding the credentials (source: Filesystem)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fs: Option<FsSelector>,
}

/// Supported credential sources
#[derive(Debug, Clone, Copy, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
pub enum CredentialsSource {
    None,
    Secret,
    InjectedIdentity,
    Environment,
    Filesystem,
}

impl fmt::Display for CredentialsSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::None => "None",
            Self::Secret => "Secret",
            Self::InjectedIdentity => "InjectedIdentity",
            Self::Environment => "Environment",
            Self::Filesystem => "Filesystem",
        };
        f.write_str(name)
    }
}

/// Selects a key of a Secret in a namespace
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
pub struct SecretKeySelector {
    pub namespace: String,
    pub name: String,
    /// Key within the Secret's data
    pub key: String,
}

/// Selects an environment variable of the controller process
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
pub struct EnvSelector {
    pub name: String,
}

/// Selects a file readable by the controller process
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
pub struct FsSelector {
    pub path: String,
}

impl ProviderCredentials {
    /// Credentials read from a Secret key
    pub fn from_secret(namespace: &str, name: &str, key: &str) -> Self {
        Self {
            source: CredentialsSource::Secret,
            secret_ref: Some(SecretKeySelector {
                namespace: namespace.to_string(),
                name: name.to_string(),
                key: key.to_string(),
            }),
            env: None,
            fs: None,
        }
    }
}
