//! Shared fixtures: an in-memory ProviderConfig store, static credential
//! extractors and local HTTP/HTTPS targets for the reachability probe.

use async_trait::async_trait;
use axum::http::StatusCode;
use axum::Router;
use minio_provider_controller::controller::reconciler::{
    CredentialExtractor, ExtractionError, ProviderConfigStore, Reconciler, ReconcilerOptions,
};
use minio_provider_controller::{
    Condition, ProviderConfig, ProviderConfigSpec, ProviderConfigStatus, ProviderCredentials,
};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use rustls::pki_types::{PrivateKeyDer, PrivatePkcs8KeyDer};
use tokio_rustls::TlsAcceptor;
use tokio_util::sync::CancellationToken;

pub const NAME: &str = "default";

/// ProviderConfig pointing at a Secret key
pub fn provider_config(name: &str) -> ProviderConfig {
    ProviderConfig::new(
        name,
        ProviderConfigSpec {
            credentials: ProviderCredentials::from_secret(
                "crossplane-system",
                "minio-creds",
                "credentials",
            ),
        },
    )
}

/// Store holding ProviderConfigs in memory
#[derive(Debug, Default)]
pub struct InMemoryStore {
    configs: Mutex<HashMap<String, ProviderConfig>>,
    fail_get: AtomicBool,
    fail_updates: AtomicBool,
    status_writes: AtomicUsize,
}

impl InMemoryStore {
    pub fn empty() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with(config: ProviderConfig) -> Arc<Self> {
        let store = Self::default();
        store
            .configs
            .lock()
            .unwrap()
            .insert(config.name().to_string(), config);
        Arc::new(store)
    }

    pub fn fail_get(&self) {
        self.fail_get.store(true, Ordering::SeqCst);
    }

    pub fn fail_updates(&self) {
        self.fail_updates.store(true, Ordering::SeqCst);
    }

    pub fn allow_updates(&self) {
        self.fail_updates.store(false, Ordering::SeqCst);
    }

    pub fn status_writes(&self) -> usize {
        self.status_writes.load(Ordering::SeqCst)
    }

    pub fn status(&self, name: &str) -> Option<ProviderConfigStatus> {
        self.configs
            .lock()
            .unwrap()
            .get(name)
            .and_then(|config| config.status.clone())
    }

    pub fn ready(&self, name: &str) -> Option<Condition> {
        self.configs
            .lock()
            .unwrap()
            .get(name)
            .and_then(|config| config.ready_condition().cloned())
    }

    pub fn set_status(&self, name: &str, status: ProviderConfigStatus) {
        if let Some(config) = self.configs.lock().unwrap().get_mut(name) {
            config.status = Some(status);
        }
    }
}

#[async_trait]
impl ProviderConfigStore for InMemoryStore {
    async fn get(&self, name: &str) -> anyhow::Result<Option<ProviderConfig>> {
        if self.fail_get.load(Ordering::SeqCst) {
            anyhow::bail!("connection refused");
        }
        Ok(self.configs.lock().unwrap().get(name).cloned())
    }

    async fn update_status(&self, name: &str, status: &ProviderConfigStatus) -> anyhow::Result<()> {
        if self.fail_updates.load(Ordering::SeqCst) {
            anyhow::bail!("the object has been modified");
        }
        let mut configs = self.configs.lock().unwrap();
        let config = configs
            .get_mut(name)
            .ok_or_else(|| anyhow::anyhow!("providerconfigs \"{name}\" not found"))?;
        config.status = Some(status.clone());
        self.status_writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Extractor returning a fixed payload
#[derive(Debug, Default)]
pub struct StaticExtractor {
    payload: Vec<u8>,
    calls: AtomicUsize,
}

impl StaticExtractor {
    pub fn json(value: serde_json::Value) -> Arc<Self> {
        Self::raw(value.to_string().into_bytes())
    }

    pub fn raw(payload: impl Into<Vec<u8>>) -> Arc<Self> {
        Arc::new(Self {
            payload: payload.into(),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CredentialExtractor for StaticExtractor {
    async fn extract(&self, _credentials: &ProviderCredentials) -> Result<Vec<u8>, ExtractionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.payload.clone())
    }
}

/// Extractor whose credential source is always missing its file
#[derive(Debug, Default)]
pub struct FailingExtractor {
    calls: AtomicUsize,
}

impl FailingExtractor {
    pub const PATH: &'static str = "/etc/minio/credentials.json";

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CredentialExtractor for FailingExtractor {
    async fn extract(&self, _credentials: &ProviderCredentials) -> Result<Vec<u8>, ExtractionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(ExtractionError::FileUnreadable {
            path: Self::PATH.to_string(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        })
    }
}

/// Extractor that never finishes
#[derive(Debug, Default)]
pub struct PendingExtractor;

#[async_trait]
impl CredentialExtractor for PendingExtractor {
    async fn extract(&self, _credentials: &ProviderCredentials) -> Result<Vec<u8>, ExtractionError> {
        std::future::pending().await
    }
}

pub fn options() -> ReconcilerOptions {
    ReconcilerOptions {
        probe_timeout: Duration::from_secs(5),
        ..ReconcilerOptions::default()
    }
}

pub fn test_mode_options() -> ReconcilerOptions {
    ReconcilerOptions {
        skip_credential_validation: true,
        ..options()
    }
}

pub fn reconciler(
    store: Arc<dyn ProviderConfigStore>,
    extractor: Arc<dyn CredentialExtractor>,
    options: ReconcilerOptions,
) -> Arc<Reconciler> {
    Arc::new(Reconciler::new(
        store,
        extractor,
        options,
        CancellationToken::new(),
    ))
}

/// Credentials payload for `server`
pub fn credentials(server: &str) -> serde_json::Value {
    serde_json::json!({
        "minio_server": server,
        "minio_user": "minioadmin",
        "minio_password": "minioadmin",
    })
}

/// Plain HTTP target answering every request with 403, like an anonymous
/// request to MinIO. Returns `host:port` and a request counter.
pub async fn http_target() -> (String, Arc<AtomicUsize>) {
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();
    let app = Router::new().fallback(move || {
        let counter = counter.clone();
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
            (StatusCode::FORBIDDEN, "AccessDenied")
        }
    });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (addr.to_string(), hits)
}

/// HTTPS target with a self-signed certificate. The counter only moves once a
/// TLS handshake completes.
pub async fn https_target() -> (String, Arc<AtomicUsize>) {
    let certified = rcgen::generate_simple_self_signed(vec![
        "localhost".to_string(),
        "127.0.0.1".to_string(),
    ])
    .unwrap();
    let key = PrivateKeyDer::Pkcs8(PrivatePkcs8KeyDer::from(
        certified.key_pair.serialize_der(),
    ));
    let config = rustls::ServerConfig::builder_with_provider(Arc::new(
        rustls::crypto::ring::default_provider(),
    ))
    .with_safe_default_protocol_versions()
    .unwrap()
    .with_no_client_auth()
    .with_single_cert(vec![certified.cert.der().clone()], key)
    .unwrap();
    let acceptor = TlsAcceptor::from(Arc::new(config));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();

    tokio::spawn(async move {
        loop {
            let Ok((stream, _)) = listener.accept().await else {
                break;
            };
            let acceptor = acceptor.clone();
            let counter = counter.clone();
            tokio::spawn(async move {
                let Ok(mut tls) = acceptor.accept(stream).await else {
                    return;
                };
                counter.fetch_add(1, Ordering::SeqCst);
                let mut buf = [0u8; 4096];
                let _ = tls.read(&mut buf).await;
                let _ = tls
                    .write_all(b"HTTP/1.1 200 OK\r\ncontent-length: 0\r\nconnection: close\r\n\r\n")
                    .await;
                let _ = tls.shutdown().await;
            });
        }
    });

    (addr.to_string(), hits)
}

/// `host:port` with nothing listening
pub fn unreachable_target() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr.to_string()
}
