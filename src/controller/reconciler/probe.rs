//! # Reachability Probe
//!
//! A single bounded GET against the MinIO endpoint.
//!
//! The response status is not inspected: any HTTP response proves the server is
//! reachable and, for HTTPS, that the TLS handshake succeeded. Authentication is
//! left to the provisioning engine that uses the credentials.

use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    /// DNS, connection, timeout or TLS handshake failure
    #[error("failed to connect to MinIO server at {endpoint}: {detail}")]
    Unreachable { endpoint: String, detail: String },
}

/// Probe `endpoint + "/"`.
///
/// A fresh client is built for every call so a relaxed TLS setting of one
/// ProviderConfig never leaks into another. Proxies from the environment are
/// ignored: a proxy answering for an unreachable server must not count as
/// reachability. `skip_tls_verify` disables certificate verification and must
/// only be set on explicit request.
pub async fn probe_endpoint(
    endpoint: &str,
    skip_tls_verify: bool,
    timeout: Duration,
) -> Result<u16, ProbeError> {
    let mut builder = reqwest::Client::builder().timeout(timeout).no_proxy();
    if skip_tls_verify {
        warn!(endpoint, "TLS certificate verification disabled for probe");
        builder = builder.danger_accept_invalid_certs(true);
    }
    let client = builder.build().map_err(ProbeError::Client)?;

    let url = format!("{endpoint}/");
    let response = client
        .get(&url)
        .send()
        .await
        .map_err(|err| ProbeError::Unreachable {
            endpoint: endpoint.to_string(),
            detail: error_chain(&err),
        })?;

    let status = response.status().as_u16();
    debug!(endpoint, status, "MinIO endpoint reachable");
    Ok(status)
}

/// Render an error with all of its causes; reqwest hides the transport cause otherwise
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
