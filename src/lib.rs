//! # MinIO Provider Controller
//!
//! Kubernetes controller for the MinIO Crossplane provider. It watches
//! cluster-scoped `ProviderConfig` resources, validates the MinIO credentials
//! they reference and reports the result as a `Ready` condition.
//!
//! ## Overview
//!
//! Each reconciliation:
//!
//! 1. **Loads the ProviderConfig** - absent objects end the cycle quietly
//! 2. **Extracts the credentials** - from a Secret key, an environment variable or a file
//! 3. **Checks their shape** - `minio_server`, `minio_user` and `minio_password` are required
//! 4. **Builds the endpoint** - `http://` or `https://` depending on `minio_ssl`
//! 5. **Probes the server** - a single GET, honoring `minio_insecure` for HTTPS
//! 6. **Writes the Ready condition** - `Available` or `Unavailable` with the failure message
//!
//! Only status persistence failures (and failures to load the object) are
//! retried with backoff; validation failures are reported in the condition.

pub mod catalog;
pub mod config;
pub mod constants;
pub mod controller;
pub mod crd;
pub mod observability;
pub mod runtime;

pub use crd::*;
