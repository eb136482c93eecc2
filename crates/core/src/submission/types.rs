//! Submission and record types.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use crate::forms::{Form, FormError, FormFields, FormKind};
use crate::upload::{FileGroups, GroupUrls, UploadTarget};

/// One request's worth of validated fields and files.
#[derive(Debug, Clone)]
pub struct Submission {
    /// Form the request was posted to.
    pub kind: FormKind,
    /// Validated fields.
    pub form: Form,
    /// Files, restricted to the groups the form accepts.
    pub files: FileGroups,
    /// Receipt time; also the timestamp of every storage key.
    pub received_at: DateTime<Utc>,
}

impl Submission {
    /// Validate fields and drop file groups the form does not know.
    ///
    /// # Errors
    ///
    /// Returns a [`FormError`] if a required field is missing or malformed.
    pub fn parse(
        kind: FormKind,
        fields: &FormFields,
        mut files: FileGroups,
    ) -> Result<Self, FormError> {
        let form = Form::parse(kind, fields)?;
        let dropped = files.retain_allowed(kind.file_groups());
        if !dropped.is_empty() {
            debug!(form = kind.slug(), ?dropped, "ignoring unknown file groups");
        }
        Ok(Self {
            kind,
            form,
            files,
            received_at: Utc::now(),
        })
    }

    /// Where this submission's files go, `None` if the form takes no files.
    #[must_use]
    pub fn upload_target(&self) -> Option<UploadTarget> {
        self.kind.upload_location().map(|location| UploadTarget {
            bucket: location.bucket.to_string(),
            prefix: location.prefix.to_string(),
            timestamp_ms: self.received_at.timestamp_millis(),
        })
    }
}

/// The row to persist: form columns plus `<group>_urls` columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    /// Decides the target table.
    #[serde(skip)]
    pub kind: FormKind,
    /// Form columns.
    #[serde(flatten)]
    pub form: Form,
    /// URL columns of groups that produced at least one URL.
    #[serde(flatten)]
    pub urls: GroupUrls,
}

/// A record as stored, with its generated identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SavedSubmission {
    /// Generated primary key.
    pub id: Uuid,
    /// Insert time.
    pub created_at: DateTime<Utc>,
    /// Stored columns.
    #[serde(flatten)]
    pub record: Record,
}

/// Success payload returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Receipt {
    /// Human readable confirmation.
    pub message: String,
    /// The saved row.
    pub data: SavedSubmission,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upload::FileItem;
    use bytes::Bytes;

    #[test]
    fn test_parse_drops_unknown_groups() {
        let fields: FormFields = [("nombre_empresa", "Acme")].into_iter().collect();
        let mut files = FileGroups::new();
        files.push("logo", FileItem::new(Bytes::from_static(b"x"), "image/png", "l.png"));
        files.push(
            "documento_identidad",
            FileItem::new(Bytes::from_static(b"x"), "image/png", "d.png"),
        );
        let submission = Submission::parse(FormKind::CompanyRegistration, &fields, files)
            .expect("valid submission");
        assert!(submission.files.get("logo").is_some());
        assert!(submission.files.get("documento_identidad").is_none());
    }

    #[test]
    fn test_parse_rejects_missing_field_before_files() {
        let fields: FormFields = [("nombre_empresa", "Acme")].into_iter().collect();
        let err = Submission::parse(FormKind::Contact, &fields, FileGroups::new()).unwrap_err();
        assert_eq!(err, FormError::MissingField("email"));
    }

    #[test]
    fn test_token_interest_has_no_upload_target() {
        let fields: FormFields = [
            ("nombre", "Ana"),
            ("apellido", "García"),
            ("email", "ana@example.com"),
        ]
        .into_iter()
        .collect();
        let submission = Submission::parse(FormKind::TokenInterest, &fields, FileGroups::new())
            .expect("valid submission");
        assert!(submission.upload_target().is_none());

        let kyc = Submission::parse(FormKind::IndividualKyc, &fields, FileGroups::new())
            .expect("valid submission");
        let target = kyc.upload_target().expect("kyc uploads files");
        assert_eq!(target.bucket, "kyc-documentos-usuarios");
        assert_eq!(target.timestamp_ms, kyc.received_at.timestamp_millis());
    }

    #[test]
    fn test_saved_submission_serializes_flat() {
        let fields: FormFields = [("nombre_empresa", "Acme"), ("fondos_licitos", "on")]
            .into_iter()
            .collect();
        let form = Form::parse(FormKind::CompanyRegistration, &fields).expect("valid form");
        let mut urls = GroupUrls::default();
        urls.insert("estatuto_social", vec!["https://cdn/e.pdf".to_string()]);
        let saved = SavedSubmission {
            id: Uuid::nil(),
            created_at: DateTime::from_timestamp(0, 0).expect("valid timestamp"),
            record: Record {
                kind: FormKind::CompanyRegistration,
                form,
                urls,
            },
        };

        let value = serde_json::to_value(&saved).expect("serializable");
        assert_eq!(value["id"], Uuid::nil().to_string());
        assert_eq!(value["nombre_empresa"], "Acme");
        assert_eq!(value["fondos_licitos"], true);
        assert_eq!(value["estatuto_social_urls"][0], "https://cdn/e.pdf");
        assert!(value.get("kind").is_none());
    }
}
