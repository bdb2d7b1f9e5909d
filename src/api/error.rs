use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Failure taxonomy for the submission gate.
///
/// The reason codes inside `BadRequest`, `NotFound` and `Unavailable` select
/// the exact wire message; the message strings (including their surrounding
/// spaces) are part of the public contract and must not be reworded.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Bad Request: {0}")]
    BadRequest(&'static str),

    #[error("Not Found: {0}")]
    NotFound(&'static str),

    #[error("Unavailable: {0}")]
    Unavailable(&'static str),

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Unexpected error: {0}")]
    Unexpected(#[from] anyhow::Error),
}

impl AppError {
    fn wire_message(reason: &str) -> &'static str {
        match reason {
            "generic" => " bad request generic ",
            "orgId" => " bad request orgId ",
            "user" => " user not found ",
            "api_key_inactive" => " api key not found or not activated ",
            "api_key_incomplete" => " api key missing required fields ",
            _ => "An unexpected error occurred",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::BadRequest(reason) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": Self::wire_message(reason) }),
            ),
            AppError::NotFound(reason) => (
                StatusCode::NOT_FOUND,
                json!({ "error": Self::wire_message(reason) }),
            ),
            AppError::Unavailable(reason) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": Self::wire_message(reason) }),
            ),
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": "An unexpected error occurred",
                        "original": e.to_string(),
                    }),
                )
            }
            AppError::Unexpected(e) => {
                tracing::error!("Unexpected error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": "An unexpected error occurred",
                        "original": e.to_string(),
                    }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_messages_keep_surrounding_spaces() {
        assert_eq!(AppError::wire_message("user"), " user not found ");
        assert_eq!(AppError::wire_message("generic"), " bad request generic ");
        assert_eq!(AppError::wire_message("orgId"), " bad request orgId ");
        assert_eq!(
            AppError::wire_message("api_key_inactive"),
            " api key not found or not activated "
        );
        assert_eq!(
            AppError::wire_message("api_key_incomplete"),
            " api key missing required fields "
        );
    }

    #[test]
    fn test_status_mapping() {
        let resp = AppError::BadRequest("orgId").into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp = AppError::NotFound("user").into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        // Unusable credentials are reported as 500 for compatibility with
        // existing clients, even though the state is client-actionable.
        let resp = AppError::Unavailable("api_key_inactive").into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_database_error_wire_shape() {
        use http_body_util::BodyExt;

        let resp = AppError::Database(sea_orm::DbErr::Custom("connection closed".to_string()))
            .into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "An unexpected error occurred");
        assert!(
            body["original"]
                .as_str()
                .unwrap()
                .contains("connection closed")
        );
    }
}
