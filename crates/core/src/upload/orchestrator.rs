//! All-or-nothing concurrent upload of a submission's files.

use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, error, warn};

use super::error::{GroupFailure, UploadError};
use super::key::storage_key;
use super::types::{FileGroup, FileGroups, FileItem, UploadTarget, UploadedFiles};
use crate::storage::ObjectStore;

/// Uploads every file of every group at once.
///
/// One future per non-empty group, each joining one future per file, so a
/// batch takes as long as its slowest file. The batch fails if any file
/// fails; objects that did get written are left in place.
#[derive(Clone)]
pub struct UploadOrchestrator {
    storage: Arc<dyn ObjectStore>,
}

struct GroupOutcome<'a> {
    group: &'a str,
    urls: Vec<String>,
    keys: Vec<String>,
    errors: Vec<String>,
}

impl UploadOrchestrator {
    /// Create an orchestrator writing to `storage`.
    #[must_use]
    pub fn new(storage: Arc<dyn ObjectStore>) -> Self {
        Self { storage }
    }

    /// Upload all files and collect their public URLs per group.
    ///
    /// # Errors
    ///
    /// Returns an [`UploadError`] naming every group with a failed file.
    pub async fn upload_all(
        &self,
        groups: &FileGroups,
        target: &UploadTarget,
    ) -> Result<UploadedFiles, UploadError> {
        let outcomes = join_all(
            groups
                .iter()
                .filter(|group| !group.items.is_empty())
                .map(|group| self.upload_group(group, target)),
        )
        .await;

        let mut uploaded = UploadedFiles::default();
        let mut failures = Vec::new();
        for outcome in outcomes {
            uploaded.keys.extend(outcome.keys);
            if outcome.errors.is_empty() {
                uploaded.urls.insert(outcome.group, outcome.urls);
            } else {
                failures.push(GroupFailure {
                    group: outcome.group.to_string(),
                    messages: outcome.errors,
                });
            }
        }

        if failures.is_empty() {
            debug!(
                bucket = %target.bucket,
                files = uploaded.keys.len(),
                "upload batch complete"
            );
            Ok(uploaded)
        } else {
            error!(
                bucket = %target.bucket,
                orphaned = uploaded.keys.len(),
                "upload batch failed, stored objects left in place"
            );
            Err(UploadError { failures })
        }
    }

    async fn upload_group<'a>(
        &self,
        group: &'a FileGroup,
        target: &UploadTarget,
    ) -> GroupOutcome<'a> {
        let results = join_all(
            group
                .items
                .iter()
                .enumerate()
                .map(|(index, item)| self.upload_file(target, &group.name, index, item)),
        )
        .await;

        let mut outcome = GroupOutcome {
            group: &group.name,
            urls: Vec::with_capacity(results.len()),
            keys: Vec::with_capacity(results.len()),
            errors: Vec::new(),
        };
        for result in results {
            match result {
                Ok(Some((url, key))) => {
                    outcome.urls.push(url);
                    outcome.keys.push(key);
                }
                Ok(None) => {}
                Err(message) => outcome.errors.push(message),
            }
        }
        outcome
    }

    /// `Ok(None)` when the backend reports success without a usable path.
    async fn upload_file(
        &self,
        target: &UploadTarget,
        group: &str,
        index: usize,
        item: &FileItem,
    ) -> Result<Option<(String, String)>, String> {
        let key = storage_key(&target.prefix, group, target.timestamp_ms, index, &item.filename);
        let stored = self
            .storage
            .upload(&target.bucket, &key, item.data.clone(), &item.content_type)
            .await
            .map_err(|e| {
                warn!(group, key = %key, error = %e, "file upload failed");
                e.to_string()
            })?;

        if stored.path.is_empty() {
            warn!(group, key = %key, "storage reported success without a path");
            return Ok(None);
        }
        let url = self.storage.public_url(&target.bucket, &stored.path);
        Ok(Some((url, stored.path)))
    }
}
