use careform_core::{MergeError, ValidationError};
use careform_render_lopdf::RenderError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CareformError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("Merge failed: {}", .0.chain())]
    Merge(#[from] MergeError),

    #[error("Form inspection failed: {0}")]
    Render(#[from] RenderError),

    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
}
