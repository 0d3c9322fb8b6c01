use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use careform_core::{MergeError, ValidationError};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("Invalid request body: {0}")]
    InvalidRequest(String),

    #[error("Template profile '{0}' not found")]
    TemplateNotFound(String),

    #[error("Template is unavailable: {0}")]
    TemplateUnavailable(String),

    #[error("Merge failed: {0}")]
    MergeFailed(String),

    #[error("Service overloaded, please try again later")]
    ServiceOverloaded,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<MergeError> for ServiceError {
    fn from(err: MergeError) -> Self {
        match err {
            MergeError::UnknownProfile(name) => Self::TemplateNotFound(name),
            MergeError::TemplateFetch { .. } => Self::TemplateUnavailable(err.chain()),
            other => Self::MergeFailed(other.chain()),
        }
    }
}

impl From<JsonRejection> for ServiceError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidRequest(rejection.body_text())
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            Self::Validation(ValidationError::MissingSections(_)) => (
                StatusCode::BAD_REQUEST,
                "MissingSections",
                "All sections are required".to_string(),
            ),
            Self::Validation(_) => (
                StatusCode::BAD_REQUEST,
                "ValidationError",
                self.to_string(),
            ),
            Self::InvalidRequest(_) => (
                StatusCode::BAD_REQUEST,
                "InvalidRequest",
                self.to_string(),
            ),
            Self::TemplateNotFound(_) => (
                StatusCode::NOT_FOUND,
                "TemplateNotFound",
                self.to_string(),
            ),
            Self::MergeFailed(_) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "MergeFailed",
                self.to_string(),
            ),
            Self::ServiceOverloaded => (
                StatusCode::SERVICE_UNAVAILABLE,
                "ServiceOverloaded",
                self.to_string(),
            ),
            Self::TemplateUnavailable(_) | Self::Internal(_) => {
                tracing::error!("Internal error: {}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "InternalError",
                    "Failed to update PDF".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": code,
            "message": message,
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ServiceError>;
