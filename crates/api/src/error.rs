//! HTTP error responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::{debug, error};

use registra_core::forms::FormError;
use registra_core::submission::{StoreError, SubmissionError};
use registra_shared::AppError;

/// Wrapper so `AppError` can be returned from handlers.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl ApiError {
    /// 400 with a public message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self(AppError::Validation(message.into()))
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<FormError> for ApiError {
    fn from(err: FormError) -> Self {
        let message = match &err {
            FormError::MissingField(field) => format!("Falta el campo obligatorio: {field}"),
            FormError::InvalidDate(field) => {
                format!("Fecha inválida en {field}, se espera el formato AAAA-MM-DD")
            }
            FormError::Invalid(fields) => format!("Campos inválidos: {}", fields.join(", ")),
        };
        Self(AppError::Validation(message))
    }
}

impl From<SubmissionError> for ApiError {
    fn from(err: SubmissionError) -> Self {
        // Upstream detail only goes to the log.
        error!(error = %err, "submission failed");
        match err {
            SubmissionError::Upload(upload) => Self(AppError::Upload(format!(
                "No se pudieron subir los archivos de: {}",
                upload.failed_groups().join(", ")
            ))),
            SubmissionError::Persistence(StoreError::Insert { .. }) => Self(AppError::Database(
                "No se pudo guardar la solicitud, intenta nuevamente".to_string(),
            )),
            SubmissionError::Persistence(StoreError::Mismatch { .. }) => Self(AppError::Internal(
                "Error interno al procesar la solicitud".to_string(),
            )),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        debug!(status = status.as_u16(), code = self.0.error_code(), "request rejected");

        (
            status,
            Json(json!({
                "error": self.0.error_code(),
                "message": self.0.message(),
            })),
        )
            .into_response()
    }
}
