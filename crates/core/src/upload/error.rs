//! Upload batch failure.

use thiserror::Error;

/// Everything that went wrong for one file group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupFailure {
    /// Form field name of the group.
    pub group: String,
    /// One message per failed file.
    pub messages: Vec<String>,
}

/// At least one file of the batch did not reach storage.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("upload failed for {}", describe(.failures))]
pub struct UploadError {
    /// Failures per group, in group order.
    pub failures: Vec<GroupFailure>,
}

impl UploadError {
    /// Names of the groups with at least one failed file.
    #[must_use]
    pub fn failed_groups(&self) -> Vec<&str> {
        self.failures.iter().map(|f| f.group.as_str()).collect()
    }
}

fn describe(failures: &[GroupFailure]) -> String {
    failures
        .iter()
        .map(|f| format!("{} ({})", f.group, f.messages.join("; ")))
        .collect::<Vec<_>>()
        .join(", ")
}
