//! Request body extraction for form endpoints.
//!
//! Every form endpoint takes either `multipart/form-data` or a JSON object.
//! Text parts become fields, file parts become file groups keyed by part
//! name. Nothing is validated here beyond shape and size.

use axum::{
    Json,
    extract::{FromRequest, Multipart, Request, multipart::MultipartError},
    http::{StatusCode, header::CONTENT_TYPE},
};
use serde_json::{Map, Value};
use tracing::debug;

use registra_core::forms::FormFields;
use registra_core::upload::{FileGroups, FileItem};
use registra_shared::AppError;

use crate::AppState;
use crate::error::ApiError;

/// Fields and files of one form post.
#[derive(Debug, Default)]
pub struct SubmissionPayload {
    /// Text fields.
    pub fields: FormFields,
    /// Non-empty file parts grouped by field name.
    pub files: FileGroups,
}

impl FromRequest<AppState> for SubmissionPayload {
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        if content_type.starts_with("multipart/form-data") {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|rejection| ApiError::validation(rejection.body_text()))?;
            read_multipart(multipart, state.max_file_size).await
        } else if content_type.starts_with("application/json") {
            let Json(object) = Json::<Map<String, Value>>::from_request(req, state)
                .await
                .map_err(|rejection| ApiError::validation(rejection.body_text()))?;
            Ok(Self {
                fields: FormFields::from_json(object),
                files: FileGroups::new(),
            })
        } else {
            Err(ApiError::validation(
                "El cuerpo debe ser multipart/form-data o application/json",
            ))
        }
    }
}

async fn read_multipart(
    mut multipart: Multipart,
    max_file_size: usize,
) -> Result<SubmissionPayload, ApiError> {
    let mut payload = SubmissionPayload::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let Some(name) = field.name().map(ToString::to_string) else {
            continue;
        };

        let Some(filename) = field.file_name().map(ToString::to_string) else {
            let value = field.text().await.map_err(multipart_error)?;
            payload.fields.insert_text(name, value);
            continue;
        };

        let content_type = field
            .content_type()
            .unwrap_or(FileItem::DEFAULT_CONTENT_TYPE)
            .to_string();
        let data = field.bytes().await.map_err(multipart_error)?;

        // Browsers send an empty part for a file input left blank.
        if data.is_empty() {
            debug!(field = %name, "skipping empty file part");
            continue;
        }
        if data.len() > max_file_size {
            return Err(ApiError(AppError::PayloadTooLarge(format!(
                "El archivo {filename} de {name} supera el tamaño máximo de {max_file_size} bytes"
            ))));
        }

        payload
            .files
            .push(name, FileItem::new(data, content_type, filename));
    }

    Ok(payload)
}

fn multipart_error(err: MultipartError) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError(AppError::PayloadTooLarge(
            "La solicitud supera el tamaño máximo permitido".to_string(),
        ))
    } else {
        ApiError::validation(err.body_text())
    }
}
