//! Standard response envelopes
//!
//! Every API response shares one shape: a human-readable `message`, the
//! `data` payload, a nullable structured `error` and the numeric `status`.
//! List endpoints add `count`, `next` and `previous` on top of that.

pub mod builder;
pub mod shape;

pub use builder::{from_transport_failure, ResponseBuilder};
pub use shape::{strip_pagination, validate, EnvelopeKind, ShapeError};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Structured error slot carried by an envelope.
///
/// A present error always has a `message`, a `detail`, or both.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<Value>,
}

impl ErrorBody {
    /// Error carrying only a textual detail, the form failures are reported in
    pub fn detail(detail: impl Into<String>) -> Self {
        Self {
            message: None,
            detail: Some(Value::String(detail.into())),
        }
    }

    /// Error carrying only a message
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            detail: None,
        }
    }

    /// Attach an arbitrary JSON detail
    pub fn with_detail(mut self, detail: Value) -> Self {
        self.detail = if detail.is_null() { None } else { Some(detail) };
        self
    }

    pub fn is_empty(&self) -> bool {
        self.message.is_none() && self.detail.is_none()
    }

    /// Best textual reason: a string `detail` first, then `message`.
    pub fn reason(&self) -> Option<&str> {
        self.detail
            .as_ref()
            .and_then(Value::as_str)
            .or(self.message.as_deref())
    }

    /// Drops bodies that carry nothing, so `error` stays `null` instead.
    fn non_empty(self) -> Option<Self> {
        if self.is_empty() {
            None
        } else {
            Some(self)
        }
    }
}

/// Reads `error`, treating `{}` and all-null bodies as `null`.
fn non_empty_error<'de, D>(deserializer: D) -> Result<Option<ErrorBody>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<ErrorBody>::deserialize(deserializer)?.and_then(ErrorBody::non_empty))
}

/// Single-item response envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackResponse<T> {
    pub message: String,
    pub data: T,
    #[serde(default, deserialize_with = "non_empty_error")]
    pub error: Option<ErrorBody>,
    pub status: u16,
}

impl<T> StackResponse<T> {
    /// Successful envelope with an empty message
    pub fn ok(data: T) -> Self {
        Self::new(data, "")
    }

    pub fn new(data: T, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            data,
            error: None,
            status: StatusCode::OK.as_u16(),
        }
    }

    pub fn created(data: T, message: impl Into<String>) -> Self {
        Self::new(data, message).with_status(StatusCode::CREATED.as_u16())
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Sets the error slot. An empty body leaves `error` as `null`.
    pub fn with_error(mut self, error: ErrorBody) -> Self {
        self.error = error.non_empty();
        self
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none() && (200..300).contains(&self.status)
    }

    /// Human-readable failure reason, if there is one
    pub fn error_message(&self) -> Option<&str> {
        self.error
            .as_ref()
            .and_then(ErrorBody::reason)
            .or_else(|| (!self.message.is_empty()).then_some(self.message.as_str()))
    }

    pub fn map<U, F>(self, f: F) -> StackResponse<U>
    where
        F: FnOnce(T) -> U,
    {
        StackResponse {
            message: self.message,
            data: f(self.data),
            error: self.error,
            status: self.status,
        }
    }
}

impl StackResponse<Value> {
    /// Failure envelope: `data` is null and `error` is `{ "detail": ... }`.
    pub fn failure(status: u16, detail: impl Into<String>) -> Self {
        Self {
            message: String::new(),
            data: Value::Null,
            error: Some(ErrorBody::detail(detail)),
            status,
        }
    }
}

/// Paginated response envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginatedStackResponse<T> {
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub message: String,
    pub data: T,
    #[serde(default, deserialize_with = "non_empty_error")]
    pub error: Option<ErrorBody>,
    pub status: u16,
}

impl<T> PaginatedStackResponse<T> {
    pub fn from_page(data: T, count: u64, next: Option<String>, previous: Option<String>) -> Self {
        Self {
            count,
            next,
            previous,
            message: String::new(),
            data,
            error: None,
            status: StatusCode::OK.as_u16(),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    pub fn with_error(mut self, error: ErrorBody) -> Self {
        self.error = error.non_empty();
        self
    }

    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    /// Strip the pagination fields
    pub fn into_single(self) -> StackResponse<T> {
        StackResponse {
            message: self.message,
            data: self.data,
            error: self.error,
            status: self.status,
        }
    }
}

/// HTTP status for an envelope status code; out-of-range codes become 500.
pub(crate) fn http_status(status: u16) -> StatusCode {
    StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

impl<T: Serialize> IntoResponse for StackResponse<T> {
    fn into_response(self) -> Response {
        (http_status(self.status), Json(self)).into_response()
    }
}

impl<T: Serialize> IntoResponse for PaginatedStackResponse<T> {
    fn into_response(self) -> Response {
        (http_status(self.status), Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_success_serializes_null_error() {
        let body = serde_json::to_value(StackResponse::new(vec![1, 2], "Listed.")).unwrap();
        assert_eq!(
            body,
            json!({ "message": "Listed.", "data": [1, 2], "error": null, "status": 200 })
        );
    }

    #[test]
    fn test_failure_shape() {
        let resp = StackResponse::failure(404, "No active election found.");
        let body = serde_json::to_value(&resp).unwrap();
        assert_eq!(
            body,
            json!({
                "message": "",
                "data": null,
                "error": { "detail": "No active election found." },
                "status": 404
            })
        );
        assert!(!resp.is_success());
        assert_eq!(resp.error_message(), Some("No active election found."));
    }

    #[test]
    fn test_empty_error_body_stays_null() {
        let resp = StackResponse::ok(()).with_error(ErrorBody::default());
        assert!(resp.error.is_none());
        assert!(resp.is_success());
    }

    #[test]
    fn test_error_message_fallbacks() {
        let with_message = StackResponse::ok(()).with_error(ErrorBody::message("Login failed."));
        assert_eq!(with_message.error_message(), Some("Login failed."));

        let structured = StackResponse::ok(())
            .with_status(400)
            .with_message("Vote rejected.")
            .with_error(ErrorBody::default().with_detail(json!({ "position": ["required"] })));
        assert_eq!(structured.error_message(), Some("Vote rejected."));

        assert_eq!(StackResponse::ok(()).error_message(), None);
    }

    #[test]
    fn test_non_2xx_without_error_is_not_success() {
        assert!(!StackResponse::ok(()).with_status(500).is_success());
        assert!(StackResponse::created((), "Vote cast successfully.").is_success());
    }

    #[test]
    fn test_deserialize_from_wire() {
        let raw = json!({
            "message": "Login successful.",
            "data": { "access": "a", "refresh": "r" },
            "error": null,
            "status": 200
        });
        let resp: StackResponse<Value> = serde_json::from_value(raw).unwrap();
        assert!(resp.is_success());
        assert_eq!(resp.data["access"], "a");
    }

    #[test]
    fn test_deserialize_normalizes_empty_error() {
        let raw = json!({ "message": "", "data": 1, "error": {}, "status": 200 });
        let resp: StackResponse<i32> = serde_json::from_value(raw).unwrap();
        assert_eq!(resp.error, None);

        let raw = json!({
            "count": 0, "next": null, "previous": null,
            "message": "", "data": [], "status": 200,
            "error": { "message": null, "detail": null }
        });
        let page: PaginatedStackResponse<Vec<i32>> = serde_json::from_value(raw).unwrap();
        assert_eq!(page.error, None);

        let raw = json!({ "message": "", "data": null, "status": 404 });
        let missing: StackResponse<Value> = serde_json::from_value(raw).unwrap();
        assert_eq!(missing.error, None);

        let raw = json!({ "message": "", "data": null, "error": { "detail": "gone" }, "status": 404 });
        let kept: StackResponse<Value> = serde_json::from_value(raw).unwrap();
        assert_eq!(kept.error_message(), Some("gone"));
    }

    #[test]
    fn test_paginated_into_single_keeps_common_fields() {
        let page = PaginatedStackResponse::from_page(
            vec!["a", "b"],
            12,
            Some("http://localhost/api/positions/?page=2".to_string()),
            None,
        )
        .with_message("Page 1");
        assert!(page.has_next());

        let single = page.clone().into_single();
        assert_eq!(single.data, page.data);
        assert_eq!(single.message, page.message);
        assert_eq!(single.status, page.status);
        assert_eq!(single.error, page.error);
    }

    #[test]
    fn test_map_preserves_envelope() {
        let resp = StackResponse::new(21, "Half").with_status(202).map(|n| n * 2);
        assert_eq!(resp.data, 42);
        assert_eq!(resp.status, 202);
        assert_eq!(resp.message, "Half");
    }

    #[test]
    fn test_into_response_uses_envelope_status() {
        let resp = StackResponse::failure(403, "Results not available until the election ends.")
            .into_response();
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        let resp = StackResponse::ok(()).with_status(1234).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
