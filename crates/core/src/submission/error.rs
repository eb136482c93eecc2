use thiserror::Error;

use super::ports::StoreError;
use crate::upload::UploadError;

/// Terminal failure of a submission.
///
/// Upload and persistence failures stay distinct so operators can tell a
/// storage problem from a database problem.
#[derive(Debug, Error)]
pub enum SubmissionError {
    /// A file did not reach storage; nothing was persisted.
    #[error(transparent)]
    Upload(#[from] UploadError),

    /// The database rejected the record.
    #[error(transparent)]
    Persistence(#[from] StoreError),
}
