//! # Reconciler
//!
//! Validates the MinIO credentials referenced by a ProviderConfig and publishes
//! the result as its Ready condition.

pub mod credentials;
pub mod endpoint;
pub mod extractor;
pub mod probe;
mod reconcile;
mod status;
pub mod store;
mod types;

pub use credentials::{ConnectionSettings, CredentialsError, MinioCredentials};
pub use endpoint::{build_endpoint, EndpointError};
pub use extractor::{CredentialExtractor, ExtractionError, KubeCredentialExtractor};
pub use probe::{probe_endpoint, ProbeError};
pub use reconcile::reconcile;
pub use store::{KubeProviderConfigStore, ProviderConfigStore};
pub use types::*;
