//! Outbound ports of the submission workflow.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use super::types::Record;
use crate::forms::FormKind;

/// Identity the database assigned to a persisted record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SavedRecord {
    /// Generated primary key.
    pub id: Uuid,
    /// Insert time.
    pub created_at: DateTime<Utc>,
}

/// Database-side failure while persisting a record.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The insert itself was rejected.
    #[error("insert into {table} failed: {message}")]
    Insert {
        /// Target table.
        table: &'static str,
        /// Driver message.
        message: String,
    },

    /// The record cannot be stored in the table it is bound to.
    #[error("record does not fit table {table}")]
    Mismatch {
        /// Target table.
        table: &'static str,
    },
}

/// Persists one record per successful submission.
#[async_trait]
pub trait SubmissionStore: Send + Sync {
    /// Insert `record` into the table of its form kind.
    async fn insert(&self, record: &Record) -> Result<SavedRecord, StoreError>;
}

/// Confirmation to send after a record is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Form the submission came through.
    pub kind: FormKind,
    /// Persisted record.
    pub record_id: Uuid,
    /// Recipient address.
    pub to: String,
    /// Recipient name.
    pub display_name: String,
    /// Where the recipient continues on the public site.
    pub continuation_url: String,
}

/// Notification delivery failure.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// The provider did not accept the message.
    #[error("notification delivery failed: {0}")]
    Delivery(String),
}

/// Sends confirmation notifications.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver one notification.
    async fn notify(&self, notification: &Notification) -> Result<(), NotifyError>;
}
