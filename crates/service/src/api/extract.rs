use crate::error::ServiceError;
use axum::extract::FromRequest;

/// `axum::Json`, but a rejected body answers with the service's JSON error.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ServiceError))]
pub struct ApiJson<T>(pub T);
