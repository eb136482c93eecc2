//! The submission workflow: upload files, persist one record, notify.
//!
//! ```text
//! Submission ──► UploadOrchestrator ──► SubmissionStore::insert ──► Notifier (background)
//!                  all or nothing          only after every upload     never affects the result
//! ```

mod error;
mod ports;
mod processor;
mod types;

pub use error::SubmissionError;
pub use ports::{Notification, Notifier, NotifyError, SavedRecord, StoreError, SubmissionStore};
pub use processor::{ProcessorSettings, SubmissionProcessor};
pub use types::{Receipt, Record, SavedSubmission, Submission};
