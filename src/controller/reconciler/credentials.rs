//! # Credential Payload
//!
//! Decodes the raw credential blob and checks its shape.
//!
//! The payload is a flat JSON object of string values:
//!
//! ```json
//! {
//!   "minio_server": "minio.example.com:9000",
//!   "minio_user": "admin",
//!   "minio_password": "secret",
//!   "minio_ssl": "true",
//!   "minio_insecure": "false"
//! }
//! ```

use std::collections::HashMap;
use std::fmt;
use thiserror::Error;
use zeroize::Zeroizing;

pub const KEY_SERVER: &str = "minio_server";
pub const KEY_USER: &str = "minio_user";
pub const KEY_PASSWORD: &str = "minio_password";
pub const KEY_SSL: &str = "minio_ssl";
pub const KEY_INSECURE: &str = "minio_insecure";

#[derive(Debug, Error)]
pub enum CredentialsError {
    /// Payload is not a flat string-to-string JSON object
    #[error("cannot decode credentials: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("missing required credentials: minio_server, minio_user, and minio_password")]
    MissingRequired,
    /// Optional flag present but not a boolean
    #[error("invalid {key} value '{value}': expected true or false")]
    InvalidFlag { key: &'static str, value: String },
}

/// Decoded MinIO credentials
pub struct MinioCredentials {
    pub server: String,
    pub user: String,
    pub password: Zeroizing<String>,
    ssl: Option<String>,
    insecure: Option<String>,
}

/// TLS settings derived from the optional flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConnectionSettings {
    pub use_ssl: bool,
    /// Skip certificate verification; only honoured together with `use_ssl`
    pub insecure: bool,
}

impl ConnectionSettings {
    /// Whether the probe must skip certificate verification
    pub fn skip_tls_verify(&self) -> bool {
        self.use_ssl && self.insecure
    }
}

impl fmt::Debug for MinioCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MinioCredentials")
            .field("server", &self.server)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("ssl", &self.ssl)
            .field("insecure", &self.insecure)
            .finish()
    }
}

impl MinioCredentials {
    /// Decode the payload and require non-empty server, user and password.
    pub fn from_payload(payload: &[u8]) -> Result<Self, CredentialsError> {
        let mut values: HashMap<String, String> = serde_json::from_slice(payload)?;

        let mut take = |key: &str| values.remove(key).filter(|v| !v.is_empty());
        let server = take(KEY_SERVER);
        let user = take(KEY_USER);
        let password = take(KEY_PASSWORD).map(Zeroizing::new);
        let ssl = take(KEY_SSL);
        let insecure = take(KEY_INSECURE);

        match (server, user, password) {
            (Some(server), Some(user), Some(password)) => Ok(Self {
                server,
                user,
                password,
                ssl,
                insecure,
            }),
            _ => Err(CredentialsError::MissingRequired),
        }
    }

    /// Parse `minio_ssl` and `minio_insecure`, both defaulting to false.
    ///
    /// A present value that is not a boolean is rejected rather than defaulted.
    pub fn connection_settings(&self) -> Result<ConnectionSettings, CredentialsError> {
        Ok(ConnectionSettings {
            use_ssl: parse_flag(KEY_SSL, self.ssl.as_deref())?,
            insecure: parse_flag(KEY_INSECURE, self.insecure.as_deref())?,
        })
    }
}

/// Boolean spellings accepted for the optional flags
fn parse_flag(key: &'static str, value: Option<&str>) -> Result<bool, CredentialsError> {
    match value {
        None => Ok(false),
        Some("1" | "t" | "T" | "true" | "TRUE" | "True") => Ok(true),
        Some("0" | "f" | "F" | "false" | "FALSE" | "False") => Ok(false),
        Some(other) => Err(CredentialsError::InvalidFlag {
            key,
            value: other.to_string(),
        }),
    }
}
