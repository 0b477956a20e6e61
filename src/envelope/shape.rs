//! Runtime envelope shape checks
//!
//! Checks an arbitrary JSON value against the single-item or paginated
//! envelope contract without knowing the payload type.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::str::FromStr;
use thiserror::Error;

/// Keys present only on paginated envelopes
pub const PAGINATION_FIELDS: [&str; 3] = ["count", "next", "previous"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EnvelopeKind {
    #[default]
    Single,
    Paginated,
}

impl FromStr for EnvelopeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single" => Ok(EnvelopeKind::Single),
            "paginated" => Ok(EnvelopeKind::Paginated),
            other => Err(format!("Unknown envelope kind '{}' (expected single or paginated)", other)),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    #[error("envelope must be a JSON object")]
    NotAnObject,

    #[error("missing field `{0}`")]
    MissingField(&'static str),

    #[error("field `{field}` must be {expected}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
    },

    #[error("`error` must be null or carry a `message` or `detail`")]
    EmptyError,
}

impl ShapeError {
    /// Name of the offending field, if the error is about one
    pub fn field(&self) -> Option<&'static str> {
        match self {
            ShapeError::NotAnObject => None,
            ShapeError::MissingField(field) | ShapeError::WrongType { field, .. } => Some(*field),
            ShapeError::EmptyError => Some("error"),
        }
    }
}

/// Validate `value` against the envelope contract of `kind`.
pub fn validate(value: &Value, kind: EnvelopeKind) -> Result<(), ShapeError> {
    let obj = value.as_object().ok_or(ShapeError::NotAnObject)?;

    let message = require(obj, "message")?;
    if !message.is_string() {
        return Err(wrong_type("message", "a string"));
    }

    require(obj, "data")?;

    let status = require(obj, "status")?;
    match status.as_u64() {
        Some(code) if code <= 999 => {}
        _ => return Err(wrong_type("status", "an integer between 0 and 999")),
    }

    validate_error(require(obj, "error")?)?;

    if kind == EnvelopeKind::Paginated {
        if require(obj, "count")?.as_u64().is_none() {
            return Err(wrong_type("count", "a non-negative integer"));
        }
        for field in ["next", "previous"] {
            let link = require(obj, field)?;
            if !(link.is_null() || link.is_string()) {
                return Err(wrong_type(field, "a string or null"));
            }
        }
    }

    Ok(())
}

/// Remove the pagination keys, leaving a single-item envelope.
pub fn strip_pagination(value: &Value) -> Value {
    match value {
        Value::Object(obj) => Value::Object(
            obj.iter()
                .filter(|(key, _)| !PAGINATION_FIELDS.contains(&key.as_str()))
                .map(|(key, v)| (key.clone(), v.clone()))
                .collect(),
        ),
        other => other.clone(),
    }
}

fn validate_error(error: &Value) -> Result<(), ShapeError> {
    let body = match error {
        Value::Null => return Ok(()),
        Value::Object(body) => body,
        _ => return Err(wrong_type("error", "null or an object")),
    };

    let message = body.get("message").filter(|m| !m.is_null());
    if let Some(message) = message {
        if !message.is_string() {
            return Err(wrong_type("error.message", "a string"));
        }
    }
    let detail = body.get("detail").filter(|d| !d.is_null());

    if message.is_none() && detail.is_none() {
        return Err(ShapeError::EmptyError);
    }
    Ok(())
}

fn require<'a>(obj: &'a Map<String, Value>, field: &'static str) -> Result<&'a Value, ShapeError> {
    obj.get(field).ok_or(ShapeError::MissingField(field))
}

fn wrong_type(field: &'static str, expected: &'static str) -> ShapeError {
    ShapeError::WrongType { field, expected }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope::{ErrorBody, PaginatedStackResponse, StackResponse};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn paginated_sample() -> Value {
        json!({
            "count": 2,
            "next": null,
            "previous": "http://localhost/api/elections/?page=1",
            "message": "",
            "data": [{ "name": "Graduating Class Awards 2024" }],
            "status": 200,
            "error": null
        })
    }

    #[test]
    fn test_serialized_envelopes_pass() {
        let single = serde_json::to_value(StackResponse::new(json!({}), "ok")).unwrap();
        assert_eq!(validate(&single, EnvelopeKind::Single), Ok(()));

        let failure = serde_json::to_value(StackResponse::failure(404, "missing")).unwrap();
        assert_eq!(validate(&failure, EnvelopeKind::Single), Ok(()));

        let page = serde_json::to_value(PaginatedStackResponse::from_page(json!([]), 0, None, None))
            .unwrap();
        assert_eq!(validate(&page, EnvelopeKind::Paginated), Ok(()));
    }

    #[test]
    fn test_rejects_non_object() {
        assert_eq!(validate(&json!([1]), EnvelopeKind::Single), Err(ShapeError::NotAnObject));
    }

    #[test]
    fn test_missing_fields() {
        let v = json!({ "message": "", "status": 200, "error": null });
        assert_eq!(validate(&v, EnvelopeKind::Single), Err(ShapeError::MissingField("data")));

        let v = json!({ "message": "", "data": null, "status": 200 });
        assert_eq!(validate(&v, EnvelopeKind::Single), Err(ShapeError::MissingField("error")));

        let single = serde_json::to_value(StackResponse::ok(1)).unwrap();
        assert_eq!(
            validate(&single, EnvelopeKind::Paginated),
            Err(ShapeError::MissingField("count"))
        );
    }

    #[test]
    fn test_error_must_carry_message_or_detail() {
        let mut v = serde_json::to_value(StackResponse::ok(1)).unwrap();
        v["error"] = json!({});
        assert_eq!(validate(&v, EnvelopeKind::Single), Err(ShapeError::EmptyError));

        v["error"] = json!({ "message": null, "detail": null });
        assert_eq!(validate(&v, EnvelopeKind::Single), Err(ShapeError::EmptyError));

        v["error"] = json!({ "detail": { "position": ["This field is required."] } });
        assert_eq!(validate(&v, EnvelopeKind::Single), Ok(()));

        v["error"] = serde_json::to_value(ErrorBody::message("Login failed.")).unwrap();
        assert_eq!(validate(&v, EnvelopeKind::Single), Ok(()));

        v["error"] = json!("boom");
        assert_eq!(validate(&v, EnvelopeKind::Single).unwrap_err().field(), Some("error"));
    }

    #[test]
    fn test_wrong_types() {
        let mut v = serde_json::to_value(StackResponse::ok(1)).unwrap();
        v["status"] = json!("200");
        assert_eq!(validate(&v, EnvelopeKind::Single).unwrap_err().field(), Some("status"));

        let mut page = paginated_sample();
        page["count"] = json!(-1);
        assert_eq!(validate(&page, EnvelopeKind::Paginated).unwrap_err().field(), Some("count"));

        let mut page = paginated_sample();
        page["next"] = json!(3);
        assert_eq!(validate(&page, EnvelopeKind::Paginated).unwrap_err().field(), Some("next"));
    }

    #[test]
    fn test_paginated_valid_implies_single_valid_after_strip() {
        let mut samples = vec![paginated_sample()];
        let mut with_error = paginated_sample();
        with_error["error"] = json!({ "message": "partial", "detail": [1, 2] });
        with_error["status"] = json!(206);
        samples.push(with_error);

        for page in samples {
            assert_eq!(validate(&page, EnvelopeKind::Paginated), Ok(()));
            let stripped = strip_pagination(&page);
            for key in PAGINATION_FIELDS {
                assert!(stripped.get(key).is_none());
            }
            assert_eq!(validate(&stripped, EnvelopeKind::Single), Ok(()));
        }
    }
}
