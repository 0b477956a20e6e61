//! Envelope shape-check route handlers

use crate::envelope::{self, EnvelopeKind, StackResponse};
use crate::error::{bad_request, ApiResult, AppError};
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::Query;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, info};

#[derive(Debug, Default, Deserialize)]
pub struct ValidateQuery {
    pub kind: Option<String>,
}

/// Outcome of a successful shape check
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ValidationReport {
    pub kind: EnvelopeKind,
    pub valid: bool,
    /// Whether the body also passes as a single-item envelope once the
    /// pagination fields are stripped
    pub single_compatible: bool,
    pub fields: Vec<String>,
}

/// Validate a JSON body against the single-item or paginated envelope
pub async fn validate_envelope(
    query: Result<Query<ValidateQuery>, QueryRejection>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<StackResponse<ValidationReport>> {
    let Query(query) = query.map_err(|e| bad_request(e.body_text()))?;
    let kind = match query.kind.as_deref() {
        Some(raw) => raw.parse::<EnvelopeKind>().map_err(bad_request)?,
        None => EnvelopeKind::default(),
    };
    let Json(value) = body.map_err(|e| bad_request(e.body_text()))?;

    envelope::validate(&value, kind)?;

    let single_compatible = match kind {
        EnvelopeKind::Single => true,
        EnvelopeKind::Paginated => {
            let stripped = envelope::strip_pagination(&value);
            if let Err(e) = envelope::validate(&stripped, EnvelopeKind::Single) {
                error!("Paginated envelope failed single check after stripping: {}", e);
                return Err(AppError::Internal(e.to_string()));
            }
            true
        }
    };

    let fields = value
        .as_object()
        .map(|obj| obj.keys().cloned().collect())
        .unwrap_or_default();

    info!(?kind, "Envelope accepted");

    Ok(StackResponse::new(
        ValidationReport {
            kind,
            valid: true,
            single_compatible,
            fields,
        },
        "Envelope matches the expected shape.",
    ))
}
