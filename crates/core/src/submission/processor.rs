//! Upload, persist, notify.

use std::sync::Arc;

use futures::future::join_all;
use tokio_util::task::TaskTracker;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use super::error::SubmissionError;
use super::ports::{Notification, Notifier, SubmissionStore};
use super::types::{Receipt, Record, SavedSubmission, Submission};
use crate::forms::FormKind;
use crate::storage::ObjectStore;
use crate::upload::{UploadOrchestrator, UploadedFiles};

/// Settings the processor needs beyond its collaborators.
#[derive(Debug, Clone)]
pub struct ProcessorSettings {
    /// Public site the continuation links point to.
    pub frontend_url: String,
}

/// Runs one submission through upload, persistence and notification.
///
/// Submissions share no mutable state; one processor serves every request.
pub struct SubmissionProcessor {
    orchestrator: UploadOrchestrator,
    storage: Arc<dyn ObjectStore>,
    store: Arc<dyn SubmissionStore>,
    notifier: Arc<dyn Notifier>,
    settings: ProcessorSettings,
    tasks: TaskTracker,
}

impl SubmissionProcessor {
    /// Wire a processor from its collaborators.
    #[must_use]
    pub fn new(
        storage: Arc<dyn ObjectStore>,
        store: Arc<dyn SubmissionStore>,
        notifier: Arc<dyn Notifier>,
        settings: ProcessorSettings,
    ) -> Self {
        Self {
            orchestrator: UploadOrchestrator::new(Arc::clone(&storage)),
            storage,
            store,
            notifier,
            settings,
            tasks: TaskTracker::new(),
        }
    }

    /// Process a validated submission.
    ///
    /// The record is inserted only after every file uploaded. The
    /// confirmation is sent in the background once the insert succeeded and
    /// its outcome never reaches the caller.
    ///
    /// # Errors
    ///
    /// Returns [`SubmissionError::Upload`] if any file failed and
    /// [`SubmissionError::Persistence`] if the insert failed.
    pub async fn process(&self, submission: Submission) -> Result<Receipt, SubmissionError> {
        let kind = submission.kind;
        let target = submission.upload_target();

        let uploaded = match &target {
            Some(target) if !submission.files.is_empty() => {
                self.orchestrator
                    .upload_all(&submission.files, target)
                    .await?
            }
            _ => UploadedFiles::default(),
        };

        let record = Record {
            kind,
            form: submission.form,
            urls: uploaded.urls,
        };

        let saved = match self.store.insert(&record).await {
            Ok(saved) => saved,
            Err(err) => {
                error!(
                    form = kind.slug(),
                    table = kind.table(),
                    error = %err,
                    "failed to persist submission"
                );
                // The store reports every failed insert the same way, so this
                // also runs when the outcome is unknown (connection lost after
                // commit). A row that did land then points at removed objects.
                if let Some(target) = &target {
                    self.discard_uploads(&target.bucket, &uploaded.keys).await;
                }
                return Err(err.into());
            }
        };

        info!(
            form = kind.slug(),
            table = kind.table(),
            id = %saved.id,
            file_groups = record.urls.len(),
            "submission stored"
        );

        self.dispatch_notification(kind, &record, saved.id);

        Ok(Receipt {
            message: kind.success_message().to_string(),
            data: SavedSubmission {
                id: saved.id,
                created_at: saved.created_at,
                record,
            },
        })
    }

    /// Best-effort removal of objects written for a record that was never stored.
    async fn discard_uploads(&self, bucket: &str, keys: &[String]) {
        if keys.is_empty() {
            return;
        }
        let results = join_all(keys.iter().map(|key| self.storage.remove(bucket, key))).await;
        let failed = results.iter().filter(|r| r.is_err()).count();
        if failed == 0 {
            debug!(bucket, removed = keys.len(), "discarded uploads of unsaved submission");
        } else {
            warn!(
                bucket,
                failed,
                total = keys.len(),
                "could not discard every upload of unsaved submission"
            );
        }
    }

    fn dispatch_notification(&self, kind: FormKind, record: &Record, record_id: Uuid) {
        let Some(recipient) = record.form.recipient() else {
            debug!(form = kind.slug(), id = %record_id, "no recipient, skipping confirmation");
            return;
        };

        let notification = Notification {
            kind,
            record_id,
            to: recipient.email,
            display_name: recipient.display_name,
            continuation_url: self.continuation_url(kind),
        };
        let notifier = Arc::clone(&self.notifier);
        self.tasks.spawn(async move {
            if let Err(err) = notifier.notify(&notification).await {
                warn!(
                    form = notification.kind.slug(),
                    id = %notification.record_id,
                    error = %err,
                    "confirmation not delivered"
                );
            }
        });
    }

    /// Absolute link to the next step for `kind`.
    #[must_use]
    pub fn continuation_url(&self, kind: FormKind) -> String {
        format!(
            "{}{}",
            self.settings.frontend_url.trim_end_matches('/'),
            kind.email_copy().continuation_path
        )
    }

    /// Wait for in-flight notifications. Call once, at shutdown.
    pub async fn shutdown(&self) {
        self.tasks.close();
        self.tasks.wait().await;
    }
}

#[cfg(test)]
#[path = "processor_tests.rs"]
mod tests;
