use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::error;

use crate::model::FieldErrors;

/// Key for errors that do not belong to a single attribute.
pub const BASE: &str = "base";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("todo not found")]
    NotFound,

    #[error("validation failed")]
    Validation(FieldErrors),

    #[error("unreadable request body: {0}")]
    Body(#[from] JsonRejection),

    #[error("invalid todo attributes: {0}")]
    Attributes(serde_json::Error),

    #[error("failed to render page: {0}")]
    Render(serde_json::Error),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

fn base_error(message: String) -> Json<FieldErrors> {
    Json(FieldErrors::from([(BASE.to_string(), vec![message])]))
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND.into_response(),
            ApiError::Validation(errors) => {
                (StatusCode::UNPROCESSABLE_ENTITY, Json(errors)).into_response()
            }
            ApiError::Body(rejection) => {
                (rejection.status(), base_error(rejection.body_text())).into_response()
            }
            ApiError::Attributes(err) => {
                (StatusCode::UNPROCESSABLE_ENTITY, base_error(err.to_string())).into_response()
            }
            ApiError::Render(_) | ApiError::Database(_) => {
                error!(error = %self, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
            }
        }
    }
}
