//! In-memory collaborators for unit tests.

use std::collections::HashSet;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use bytes::Bytes;
use chrono::Utc;
use tokio::sync::Barrier;
use uuid::Uuid;

use crate::storage::{ObjectStore, StorageError, StoredObject};
use crate::submission::{
    Notification, Notifier, NotifyError, Record, SavedRecord, StoreError, SubmissionStore,
};

/// Object store keeping keys in memory.
#[derive(Default)]
pub struct FakeObjectStore {
    stored: Mutex<Vec<String>>,
    removed: Mutex<Vec<String>>,
    calls: AtomicUsize,
    failing_groups: HashSet<String>,
    pathless: bool,
    barrier: Option<Barrier>,
}

impl FakeObjectStore {
    /// Fails every upload whose key sits under one of `groups`.
    pub fn failing_groups<const N: usize>(groups: [&str; N]) -> Self {
        Self {
            failing_groups: groups.iter().map(|g| (*g).to_string()).collect(),
            ..Self::default()
        }
    }

    /// Reports success without a path.
    pub fn pathless() -> Self {
        Self {
            pathless: true,
            ..Self::default()
        }
    }

    /// Holds every upload until `n` uploads are in flight.
    pub fn with_barrier(n: usize) -> Self {
        Self {
            barrier: Some(Barrier::new(n)),
            ..Self::default()
        }
    }

    pub fn stored_keys(&self) -> Vec<String> {
        self.stored.lock().unwrap().clone()
    }

    pub fn removed_keys(&self) -> Vec<String> {
        self.removed.lock().unwrap().clone()
    }

    pub fn upload_calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ObjectStore for FakeObjectStore {
    async fn upload(
        &self,
        _bucket: &str,
        key: &str,
        _data: Bytes,
        _content_type: &str,
    ) -> Result<StoredObject, StorageError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(barrier) = &self.barrier {
            barrier.wait().await;
        }
        let group = key.split('/').nth(1).unwrap_or_default();
        if self.failing_groups.contains(group) {
            return Err(StorageError::operation("simulated outage"));
        }
        self.stored.lock().unwrap().push(key.to_string());
        let path = if self.pathless { String::new() } else { key.to_string() };
        Ok(StoredObject { path })
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        format!("https://storage.test/{bucket}/{path}")
    }

    async fn remove(&self, _bucket: &str, key: &str) -> Result<(), StorageError> {
        self.removed.lock().unwrap().push(key.to_string());
        Ok(())
    }
}

/// Submission store keeping records in memory.
#[derive(Default)]
pub struct MemorySubmissionStore {
    records: Mutex<Vec<Record>>,
    fail: bool,
}

impl MemorySubmissionStore {
    /// Rejects every insert.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn records(&self) -> Vec<Record> {
        self.records.lock().unwrap().clone()
    }
}

#[async_trait]
impl SubmissionStore for MemorySubmissionStore {
    async fn insert(&self, record: &Record) -> Result<SavedRecord, StoreError> {
        if self.fail {
            return Err(StoreError::Insert {
                table: record.kind.table(),
                message: "connection reset".to_string(),
            });
        }
        self.records.lock().unwrap().push(record.clone());
        Ok(SavedRecord {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
        })
    }
}

/// Notifier remembering what it was asked to send.
#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<Notification>>,
    fail: bool,
}

impl RecordingNotifier {
    /// Records the attempt, then fails.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<Notification> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, notification: &Notification) -> Result<(), NotifyError> {
        self.sent.lock().unwrap().push(notification.clone());
        if self.fail {
            return Err(NotifyError::Delivery("provider unavailable".to_string()));
        }
        Ok(())
    }
}
