use crate::api::error::AppError;
use crate::services::credentials;
use crate::services::executor::UserOperationCall;
use axum::{
    body::{Body, Bytes},
    extract::State,
    http::{StatusCode, header},
    response::Response,
};
use serde::Deserialize;
use serde_json::Value;
use utoipa::ToSchema;

/// Incoming submission payload.
///
/// Only `orgId` is validated (presence and non-emptiness). The remaining
/// fields are forwarded to the execution service exactly as received, so they
/// are kept as raw JSON values rather than typed fields.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadSubmissionRequest {
    #[serde(default)]
    pub org_id: Option<String>,
    #[serde(default)]
    #[schema(value_type = Object)]
    pub training_id: Value,
    #[serde(default)]
    #[schema(value_type = Object)]
    pub hugging_face_id: Value,
    #[serde(default)]
    #[schema(value_type = Object)]
    pub num_sessions: Value,
    #[serde(default)]
    #[schema(value_type = Object)]
    pub telemetry_enabled: Value,
}

#[utoipa::path(
    post,
    path = "/submit-hf-upload",
    request_body = UploadSubmissionRequest,
    responses(
        (status = 200, description = "Execution service response, relayed unchanged"),
        (status = 400, description = "Unparsable body or missing orgId"),
        (status = 404, description = "Organization not found"),
        (status = 500, description = "Unusable API key or downstream failure")
    ),
    tag = "submissions"
)]
pub async fn submit_hf_upload(
    State(state): State<crate::AppState>,
    body: Bytes,
) -> Result<Response, AppError> {
    // Parse first, validate second: the error branch only ever sees the parse
    // failure, never a half-bound request.
    let request: UploadSubmissionRequest = serde_json::from_slice(&body).map_err(|e| {
        tracing::error!("Failed to parse submission body: {}", e);
        AppError::BadRequest("generic")
    })?;

    tracing::info!(request = ?request, "📥 Upload submission received");

    let org_id = match request.org_id.as_deref() {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => return Err(AppError::BadRequest("orgId")),
    };

    let credentials = credentials::resolve(&state.db, &org_id).await?;
    tracing::info!(credentials = ?credentials, "🔑 Credentials resolved");

    let call = UserOperationCall::submit_hf_upload(credentials, &request);
    let outcome = state.executor.execute(call).await?;

    let status = StatusCode::from_u16(outcome.status)
        .map_err(|e| AppError::Unexpected(anyhow::anyhow!("executor status invalid: {}", e)))?;

    // Relay the execution service's reply unchanged, whatever its shape.
    let mut response = Response::builder().status(status);
    if let Some(content_type) = &outcome.content_type {
        response = response.header(header::CONTENT_TYPE, content_type);
    }
    response
        .body(Body::from(outcome.body))
        .map_err(|e| AppError::Unexpected(anyhow::anyhow!("failed to relay executor response: {}", e)))
}
