//! Loose envelope builder
//!
//! Assembles an envelope field by field when the payload is already JSON.
//! Pagination keys are only emitted once a `count` was set, and the HTTP
//! status can differ from the `status` written into the body.

use super::{http_status, ErrorBody, StackResponse};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{Map, Value};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct ResponseBuilder {
    data: Value,
    message: String,
    status_code: u16,
    http_status: Option<u16>,
    error: Option<ErrorBody>,
    count: Option<u64>,
    next: Option<String>,
    previous: Option<String>,
}

impl Default for ResponseBuilder {
    fn default() -> Self {
        Self {
            data: Value::Null,
            message: String::new(),
            status_code: StatusCode::OK.as_u16(),
            http_status: None,
            error: None,
            count: None,
            next: None,
            previous: None,
        }
    }
}

impl ResponseBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn data(mut self, data: Value) -> Self {
        self.data = data;
        self
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Status written into the body; also the HTTP status unless overridden.
    pub fn status_code(mut self, status: u16) -> Self {
        self.status_code = status;
        self
    }

    /// HTTP status that wins over `status_code` on the wire.
    pub fn http_status(mut self, status: u16) -> Self {
        self.http_status = Some(status);
        self
    }

    pub fn error(mut self, error: ErrorBody) -> Self {
        self.error = error.non_empty();
        self
    }

    pub fn count(mut self, count: u64) -> Self {
        self.count = Some(count);
        self
    }

    pub fn next(mut self, next: impl Into<String>) -> Self {
        self.next = Some(next.into());
        self
    }

    pub fn previous(mut self, previous: impl Into<String>) -> Self {
        self.previous = Some(previous.into());
        self
    }

    pub fn build(&self) -> Value {
        let mut body = Map::new();
        body.insert("message".into(), Value::String(self.message.clone()));
        body.insert("data".into(), self.data.clone());
        body.insert("status".into(), Value::from(self.status_code));
        body.insert(
            "error".into(),
            serde_json::to_value(&self.error).unwrap_or(Value::Null),
        );

        // A count makes the body paginated: both links are then always present.
        if let Some(count) = self.count {
            body.insert("count".into(), Value::from(count));
            body.insert("next".into(), self.next.clone().map_or(Value::Null, Value::String));
            body.insert(
                "previous".into(),
                self.previous.clone().map_or(Value::Null, Value::String),
            );
        }

        Value::Object(body)
    }
}

impl IntoResponse for ResponseBuilder {
    fn into_response(self) -> Response {
        let status = http_status(self.http_status.unwrap_or(self.status_code));
        (status, Json(self.build())).into_response()
    }
}

/// Failure envelope for an upstream call that did not succeed.
///
/// The message is the upstream `detail` text when there is one, otherwise
/// `fallback`; the status is the upstream status or 500.
pub fn from_transport_failure(
    upstream_error: Option<ErrorBody>,
    upstream_status: Option<u16>,
    fallback: &str,
) -> StackResponse<Value> {
    let error = upstream_error.and_then(ErrorBody::non_empty);
    let message = error
        .as_ref()
        .and_then(|e| e.detail.as_ref())
        .and_then(Value::as_str)
        .unwrap_or(fallback)
        .to_string();
    let status = upstream_status.unwrap_or(StatusCode::INTERNAL_SERVER_ERROR.as_u16());

    debug!(status, %message, "Synthesizing failure envelope");

    StackResponse {
        message,
        data: Value::Null,
        error,
        status,
    }
}
