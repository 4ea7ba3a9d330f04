//! # Endpoint Builder
//!
//! Derives the MinIO base URL from the bare `minio_server` value.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EndpointError {
    /// `minio_server` already carries a scheme
    #[error("minio_server should not include protocol prefix (http:// or https://), got: {0}")]
    InvalidHostFormat(String),
}

/// Build `scheme://host[:port]` from a bare host.
///
/// The host is concatenated verbatim; no trailing slash is added and nothing is
/// normalised. Hosts that already start with `http://` or `https://` are rejected
/// whatever the TLS setting.
pub fn build_endpoint(host: &str, use_ssl: bool) -> Result<String, EndpointError> {
    if host.starts_with("http://") || host.starts_with("https://") {
        return Err(EndpointError::InvalidHostFormat(host.to_string()));
    }

    let scheme = if use_ssl { "https" } else { "http" };
    Ok(format!("{scheme}://{host}"))
}
