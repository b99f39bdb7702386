use axum::{http::StatusCode, response::IntoResponse, response::Response, Json};
use sea_orm::DbErr;
use serde_json::json;
use thiserror::Error;

/// Error type shared by the data-access layer and the API handlers.
///
/// The variant is the machine-readable discriminant; the message is display
/// text only. Clients must branch on `kind`, never on the message.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    State(String),
    #[error("Database error: {0}")]
    Db(#[from] DbErr),
}

impl ApiError {
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "validation",
            ApiError::Conflict(_) => "conflict",
            ApiError::NotFound(_) => "not_found",
            ApiError::State(_) => "state",
            ApiError::Db(_) => "internal",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::State(_) => StatusCode::CONFLICT,
            ApiError::Db(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = match &self {
            // Don't leak driver internals to the client.
            ApiError::Db(err) => {
                tracing::error!(error = %err, "database error");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        (
            self.status(),
            Json(json!({
                "error": message,
                "kind": self.kind(),
            })),
        )
            .into_response()
    }
}
