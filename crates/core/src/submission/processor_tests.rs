//! Tests for the submission processor.

use std::sync::Arc;

use bytes::Bytes;

use super::*;
use crate::forms::FormFields;
use crate::submission::{StoreError, Submission};
use crate::test_support::{FakeObjectStore, MemorySubmissionStore, RecordingNotifier};
use crate::upload::{FileGroups, FileItem};

struct Harness {
    storage: Arc<FakeObjectStore>,
    store: Arc<MemorySubmissionStore>,
    notifier: Arc<RecordingNotifier>,
    processor: SubmissionProcessor,
}

fn harness(
    storage: FakeObjectStore,
    store: MemorySubmissionStore,
    notifier: RecordingNotifier,
) -> Harness {
    let storage = Arc::new(storage);
    let store = Arc::new(store);
    let notifier = Arc::new(notifier);
    let processor = SubmissionProcessor::new(
        storage.clone(),
        store.clone(),
        notifier.clone(),
        ProcessorSettings {
            frontend_url: "https://registra.example/".to_string(),
        },
    );
    Harness {
        storage,
        store,
        notifier,
        processor,
    }
}

fn default_harness() -> Harness {
    harness(
        FakeObjectStore::default(),
        MemorySubmissionStore::default(),
        RecordingNotifier::default(),
    )
}

fn company_fields() -> FormFields {
    [
        ("nombre_empresa", "Acme"),
        ("email_empresa", "info@acme.com"),
        ("fondos_licitos", "on"),
    ]
    .into_iter()
    .collect()
}

fn individual_fields() -> FormFields {
    [
        ("nombre", "Ana"),
        ("apellido", "García"),
        ("email", "ana@example.com"),
        ("fondos_licitos", "off"),
    ]
    .into_iter()
    .collect()
}

fn one_file(group: &str, filename: &str) -> FileGroups {
    let mut files = FileGroups::new();
    files.push(group, FileItem::new(Bytes::from_static(b"%PDF"), "application/pdf", filename));
    files
}

fn submission(kind: FormKind, fields: &FormFields, files: FileGroups) -> Submission {
    Submission::parse(kind, fields, files).expect("valid submission")
}

#[tokio::test]
async fn test_company_registration_with_sanitized_file() {
    let h = default_harness();
    let sub = submission(
        FormKind::CompanyRegistration,
        &company_fields(),
        one_file("estatuto_social", "Doc Final.pdf"),
    );

    let receipt = h.processor.process(sub).await.expect("should succeed");
    h.processor.shutdown().await;

    let value = serde_json::to_value(&receipt).expect("serializable");
    assert_eq!(value["message"], FormKind::CompanyRegistration.success_message());
    assert_eq!(value["data"]["fondos_licitos"], true);
    let urls = value["data"]["estatuto_social_urls"]
        .as_array()
        .expect("url column present");
    assert_eq!(urls.len(), 1);
    assert!(urls[0].as_str().unwrap_or_default().contains("Doc_Final.pdf"));
    assert_eq!(h.store.records().len(), 1);
}

#[tokio::test]
async fn test_upload_failure_persists_nothing_and_sends_nothing() {
    let h = harness(
        FakeObjectStore::failing_groups(["estatuto_social"]),
        MemorySubmissionStore::default(),
        RecordingNotifier::default(),
    );
    let sub = submission(
        FormKind::CompanyRegistration,
        &company_fields(),
        one_file("estatuto_social", "Doc Final.pdf"),
    );

    let err = h.processor.process(sub).await.unwrap_err();
    h.processor.shutdown().await;

    let SubmissionError::Upload(upload) = err else {
        panic!("expected upload error, got {err:?}");
    };
    assert_eq!(upload.failed_groups(), vec!["estatuto_social"]);
    assert!(h.store.records().is_empty());
    assert!(h.notifier.sent().is_empty());
}

#[tokio::test]
async fn test_url_columns_match_submitted_groups() {
    let h = default_harness();
    let mut files = FileGroups::new();
    for name in ["a.pdf", "b.pdf", "c.pdf"] {
        files.push(
            "estados_contables",
            FileItem::new(Bytes::from_static(b"x"), "application/pdf", name),
        );
    }
    files.push("logo", FileItem::new(Bytes::from_static(b"x"), "image/png", "logo.png"));

    let receipt = h
        .processor
        .process(submission(FormKind::CompanyRegistration, &company_fields(), files))
        .await
        .expect("should succeed");

    let urls = &receipt.data.record.urls;
    assert_eq!(urls.len(), 2);
    assert_eq!(urls.get("estados_contables").map(<[String]>::len), Some(3));
    assert_eq!(urls.get("logo").map(<[String]>::len), Some(1));
    assert!(urls.get("organigrama").is_none());
}

#[tokio::test]
async fn test_notification_failure_does_not_change_outcome() {
    let h = harness(
        FakeObjectStore::default(),
        MemorySubmissionStore::default(),
        RecordingNotifier::failing(),
    );

    let receipt = h
        .processor
        .process(submission(FormKind::IndividualKyc, &individual_fields(), FileGroups::new()))
        .await
        .expect("should succeed despite notifier");
    h.processor.shutdown().await;

    assert_eq!(receipt.message, FormKind::IndividualKyc.success_message());
    assert_eq!(h.notifier.sent().len(), 1);
    assert_eq!(h.store.records().len(), 1);
}

#[tokio::test]
async fn test_notification_carries_recipient_and_continuation() {
    let h = default_harness();

    let receipt = h
        .processor
        .process(submission(FormKind::IndividualKyc, &individual_fields(), FileGroups::new()))
        .await
        .expect("should succeed");
    h.processor.shutdown().await;

    let sent = h.notifier.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "ana@example.com");
    assert_eq!(sent[0].display_name, "Ana García");
    assert_eq!(sent[0].record_id, receipt.data.id);
    assert_eq!(
        sent[0].continuation_url,
        "https://registra.example/formularios/solicitud-token"
    );
}

#[tokio::test]
async fn test_company_without_email_sends_nothing() {
    let h = default_harness();
    let fields: FormFields = [("nombre_empresa", "Acme")].into_iter().collect();

    h.processor
        .process(submission(FormKind::CompanyRegistration, &fields, FileGroups::new()))
        .await
        .expect("should succeed");
    h.processor.shutdown().await;

    assert!(h.notifier.sent().is_empty());
}

#[tokio::test]
async fn test_kyc_without_files_has_no_url_columns() {
    let h = default_harness();

    let receipt = h
        .processor
        .process(submission(FormKind::IndividualKyc, &individual_fields(), FileGroups::new()))
        .await
        .expect("should succeed");

    let value = serde_json::to_value(&receipt.data).expect("serializable");
    let object = value.as_object().expect("object");
    assert!(object.keys().all(|k| !k.ends_with("_urls")));
    assert_eq!(value["fondos_licitos"], false);
    assert_eq!(value["origen"], "kyc");
    assert_eq!(h.storage.upload_calls(), 0);
}

#[tokio::test]
async fn test_token_interest_never_uploads() {
    let h = default_harness();

    h.processor
        .process(submission(FormKind::TokenInterest, &individual_fields(), FileGroups::new()))
        .await
        .expect("should succeed");

    assert_eq!(h.storage.upload_calls(), 0);
    assert_eq!(h.store.records()[0].kind, FormKind::TokenInterest);
}

#[tokio::test]
async fn test_persistence_failure_discards_uploads() {
    let h = harness(
        FakeObjectStore::default(),
        MemorySubmissionStore::failing(),
        RecordingNotifier::default(),
    );
    let sub = submission(
        FormKind::CompanyRegistration,
        &company_fields(),
        one_file("estatuto_social", "a.pdf"),
    );

    let err = h.processor.process(sub).await.unwrap_err();
    h.processor.shutdown().await;

    assert!(matches!(
        err,
        SubmissionError::Persistence(StoreError::Insert { table: "registros_market", .. })
    ));
    assert_eq!(h.storage.removed_keys(), h.storage.stored_keys());
    assert_eq!(h.storage.removed_keys().len(), 1);
    assert!(h.notifier.sent().is_empty());
}

#[test]
fn test_continuation_url_joins_without_double_slash() {
    let h = default_harness();
    assert_eq!(
        h.processor.continuation_url(FormKind::Contact),
        "https://registra.example/market"
    );
}
