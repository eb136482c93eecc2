//! Concurrent file upload for form submissions.
//!
//! Files arrive grouped by form field. The orchestrator fans out one upload
//! per file across every group and either returns the public URLs of all of
//! them or fails the whole batch.

mod error;
mod key;
mod orchestrator;
mod types;

pub use error::{GroupFailure, UploadError};
pub use key::{sanitize_filename, storage_key};
pub use orchestrator::UploadOrchestrator;
pub use types::{FileGroup, FileGroups, FileItem, GroupUrls, UploadTarget, UploadedFiles};
