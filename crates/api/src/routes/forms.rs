//! Form submission endpoints under `/formularios`.

use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
use tracing::info;

use registra_core::forms::FormKind;
use registra_core::submission::{Receipt, Submission};

use crate::AppState;
use crate::error::ApiError;
use crate::intake::SubmissionPayload;

/// Creates the form routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/registro-empresa", post(registro_empresa))
        .route("/kyc-persona-fisica", post(kyc_persona_fisica))
        .route("/solicitud-token", post(solicitud_token))
        .route("/contacto", post(contacto))
}

async fn registro_empresa(
    State(state): State<AppState>,
    payload: SubmissionPayload,
) -> Result<(StatusCode, Json<Receipt>), ApiError> {
    submit(&state, FormKind::CompanyRegistration, payload).await
}

async fn kyc_persona_fisica(
    State(state): State<AppState>,
    payload: SubmissionPayload,
) -> Result<(StatusCode, Json<Receipt>), ApiError> {
    submit(&state, FormKind::IndividualKyc, payload).await
}

async fn solicitud_token(
    State(state): State<AppState>,
    payload: SubmissionPayload,
) -> Result<(StatusCode, Json<Receipt>), ApiError> {
    submit(&state, FormKind::TokenInterest, payload).await
}

async fn contacto(
    State(state): State<AppState>,
    payload: SubmissionPayload,
) -> Result<(StatusCode, Json<Receipt>), ApiError> {
    submit(&state, FormKind::Contact, payload).await
}

async fn submit(
    state: &AppState,
    kind: FormKind,
    payload: SubmissionPayload,
) -> Result<(StatusCode, Json<Receipt>), ApiError> {
    let submission = Submission::parse(kind, &payload.fields, payload.files)?;
    info!(
        form = kind.slug(),
        files = submission.files.file_count(),
        "submission received"
    );

    let receipt = state.processor.process(submission).await?;
    Ok((StatusCode::CREATED, Json(receipt)))
}
