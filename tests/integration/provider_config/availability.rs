//! Credential validation outcomes recorded as the Ready condition

use super::common::*;
use minio_provider_controller::controller::reconciler::{FailureKind, ReconcileOutcome};
use minio_provider_controller::{REASON_AVAILABLE, REASON_UNAVAILABLE};
use serde_json::json;
use std::sync::atomic::Ordering;
use tokio_util::sync::CancellationToken;

async fn run(
    payload: serde_json::Value,
    options: minio_provider_controller::controller::reconciler::ReconcilerOptions,
) -> (ReconcileOutcome, std::sync::Arc<InMemoryStore>) {
    let store = InMemoryStore::with(provider_config(NAME));
    let ctx = reconciler(store.clone(), StaticExtractor::json(payload), options);
    let outcome = ctx
        .reconcile_provider_config(NAME, &CancellationToken::new())
        .await
        .unwrap();
    (outcome, store)
}

fn assert_unavailable(outcome: &ReconcileOutcome, expected_kind: FailureKind) -> String {
    match outcome {
        ReconcileOutcome::Unavailable { kind, message } => {
            assert_eq!(*kind, expected_kind, "unexpected failure: {message}");
            message.clone()
        }
        other => panic!("expected Unavailable, got {other:?}"),
    }
}

#[tokio::test]
async fn test_plain_http_server_is_available() {
    let (host, hits) = http_target().await;

    let (outcome, store) = run(credentials(&host), options()).await;

    assert_eq!(outcome, ReconcileOutcome::Available { validated: true });
    assert_eq!(hits.load(Ordering::SeqCst), 1);
    let ready = store.ready(NAME).unwrap();
    assert_eq!(ready.status, "True");
    assert_eq!(ready.reason.as_deref(), Some(REASON_AVAILABLE));
    assert!(ready.message.is_none());
    assert!(ready.last_transition_time.is_some());
}

#[tokio::test]
async fn test_https_with_insecure_accepts_self_signed_certificate() {
    let (host, hits) = https_target().await;
    let mut payload = credentials(&host);
    payload["minio_ssl"] = json!("true");
    payload["minio_insecure"] = json!("true");

    let (outcome, store) = run(payload, options()).await;

    assert_eq!(outcome, ReconcileOutcome::Available { validated: true });
    assert_eq!(hits.load(Ordering::SeqCst), 1);
    assert!(store.ready(NAME).unwrap().is_available());
}

#[tokio::test]
async fn test_https_without_insecure_rejects_self_signed_certificate() {
    let (host, hits) = https_target().await;
    let mut payload = credentials(&host);
    payload["minio_ssl"] = json!("true");

    let (outcome, store) = run(payload, options()).await;

    let message = assert_unavailable(&outcome, FailureKind::Reachability);
    assert!(
        message.starts_with(&format!("failed to connect to MinIO server at https://{host}: ")),
        "{message}"
    );
    assert_eq!(hits.load(Ordering::SeqCst), 0);

    let ready = store.ready(NAME).unwrap();
    assert_eq!(ready.status, "False");
    assert_eq!(ready.reason.as_deref(), Some(REASON_UNAVAILABLE));
    assert_eq!(ready.message.as_deref(), Some(message.as_str()));
}

#[tokio::test]
async fn test_insecure_without_ssl_probes_plain_http() {
    let (host, hits) = http_target().await;
    let mut payload = credentials(&host);
    payload["minio_insecure"] = json!("true");

    let (outcome, _) = run(payload, options()).await;

    assert_eq!(outcome, ReconcileOutcome::Available { validated: true });
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_unreachable_server_is_unavailable() {
    let host = unreachable_target();

    let (outcome, store) = run(credentials(&host), options()).await;

    let message = assert_unavailable(&outcome, FailureKind::Reachability);
    assert!(message.contains(&format!("http://{host}")), "{message}");
    assert_eq!(store.status_writes(), 1);
}

#[tokio::test]
async fn test_missing_password_never_contacts_server() {
    let (host, hits) = http_target().await;
    let mut payload = credentials(&host);
    payload.as_object_mut().unwrap().remove("minio_password");

    let (outcome, store) = run(payload, options()).await;

    let message = assert_unavailable(&outcome, FailureKind::Shape);
    assert_eq!(
        message,
        "missing required credentials: minio_server, minio_user, and minio_password"
    );
    assert_eq!(hits.load(Ordering::SeqCst), 0);
    assert_eq!(store.ready(NAME).unwrap().status, "False");
}

#[tokio::test]
async fn test_empty_user_counts_as_missing() {
    let (host, hits) = http_target().await;
    let mut payload = credentials(&host);
    payload["minio_user"] = json!("");

    let (outcome, _) = run(payload, options()).await;

    assert_unavailable(&outcome, FailureKind::Shape);
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_unparseable_ssl_flag_is_rejected() {
    let (host, hits) = http_target().await;
    let mut payload = credentials(&host);
    payload["minio_ssl"] = json!("notabool");

    let (outcome, _) = run(payload, options()).await;

    let message = assert_unavailable(&outcome, FailureKind::Shape);
    assert!(message.contains("minio_ssl"), "{message}");
    assert!(message.contains("notabool"), "{message}");
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_server_with_scheme_is_rejected() {
    let (host, hits) = http_target().await;

    let (outcome, _) = run(credentials(&format!("http://{host}")), options()).await;

    let message = assert_unavailable(&outcome, FailureKind::Endpoint);
    assert_eq!(
        message,
        format!(
            "minio_server should not include protocol prefix (http:// or https://), got: http://{host}"
        )
    );
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_undecodable_payload_is_an_extraction_failure() {
    let store = InMemoryStore::with(provider_config(NAME));
    let ctx = reconciler(store.clone(), StaticExtractor::raw("not json"), options());

    let outcome = ctx
        .reconcile_provider_config(NAME, &CancellationToken::new())
        .await
        .unwrap();

    let message = assert_unavailable(&outcome, FailureKind::Extraction);
    assert!(message.starts_with("cannot decode credentials"), "{message}");
}

#[tokio::test]
async fn test_empty_payload_is_an_extraction_failure() {
    let store = InMemoryStore::with(provider_config(NAME));
    let ctx = reconciler(store.clone(), StaticExtractor::raw(Vec::new()), options());

    let outcome = ctx
        .reconcile_provider_config(NAME, &CancellationToken::new())
        .await
        .unwrap();

    assert_unavailable(&outcome, FailureKind::Extraction);
}

#[tokio::test]
async fn test_extraction_failure_is_recorded() {
    let store = InMemoryStore::with(provider_config(NAME));
    let extractor = std::sync::Arc::new(FailingExtractor::default());
    let ctx = reconciler(store.clone(), extractor.clone(), options());

    let outcome = ctx
        .reconcile_provider_config(NAME, &CancellationToken::new())
        .await
        .unwrap();

    let message = assert_unavailable(&outcome, FailureKind::Extraction);
    assert!(
        message.starts_with(&format!("cannot read credentials file {}", FailingExtractor::PATH)),
        "{message}"
    );
    assert_eq!(extractor.calls(), 1);

    let ready = store.ready(NAME).unwrap();
    assert_eq!(ready.status, "False");
    assert_eq!(ready.reason.as_deref(), Some(REASON_UNAVAILABLE));
    assert_eq!(ready.message.as_deref(), Some(message.as_str()));
}

#[tokio::test]
async fn test_extraction_failure_in_test_mode_is_recorded() {
    let store = InMemoryStore::with(provider_config(NAME));
    let ctx = reconciler(
        store.clone(),
        std::sync::Arc::new(FailingExtractor::default()),
        test_mode_options(),
    );

    let outcome = ctx
        .reconcile_provider_config(NAME, &CancellationToken::new())
        .await
        .unwrap();

    assert_unavailable(&outcome, FailureKind::Extraction);
    assert_eq!(store.ready(NAME).unwrap().status, "False");
}

#[tokio::test]
async fn test_test_mode_skips_network_validation() {
    let (host, hits) = http_target().await;

    let (outcome, store) = run(credentials(&host), test_mode_options()).await;

    assert_eq!(outcome, ReconcileOutcome::Available { validated: false });
    assert_eq!(hits.load(Ordering::SeqCst), 0);
    assert!(store.ready(NAME).unwrap().is_available());
}

#[tokio::test]
async fn test_test_mode_still_requires_complete_credentials() {
    let mut payload = credentials("minio.example.com:9000");
    payload.as_object_mut().unwrap().remove("minio_server");

    let (outcome, _) = run(payload, test_mode_options()).await;

    assert_unavailable(&outcome, FailureKind::Shape);
}
