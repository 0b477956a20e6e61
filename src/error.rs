//! Error handling module
//!
//! Handler errors render as failure envelopes so clients only ever see the
//! standard response shape.

use crate::envelope::{ErrorBody, ShapeError, StackResponse};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{error, warn};

/// Application-wide error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Method not allowed: {0}")]
    MethodNotAllowed(String),

    #[error("Envelope shape violation: {0}")]
    Shape(#[from] ShapeError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            AppError::Shape(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = match &self {
            AppError::BadRequest(msg)
            | AppError::NotFound(msg)
            | AppError::MethodNotAllowed(msg) => ErrorBody::detail(msg.clone()),
            AppError::Shape(e) => {
                warn!("Rejected envelope: {}", e);
                ErrorBody::message("Envelope does not match the expected shape")
                    .with_detail(json!({ "field": e.field(), "reason": e.to_string() }))
            }
            AppError::Internal(msg) => {
                error!("Internal error: {}", msg);
                ErrorBody::detail("An internal error occurred")
            }
        };

        StackResponse::new(Value::Null, "")
            .with_status(status.as_u16())
            .with_error(body)
            .into_response()
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, AppError>;

/// Helper function to create a bad request error
pub fn bad_request(msg: impl Into<String>) -> AppError {
    AppError::BadRequest(msg.into())
}
