//! Route definitions and router setup
//!
//! Configures all routes and middleware.

mod envelope;
mod views;

use crate::config::Settings;
use crate::envelope::StackResponse;
use crate::error::AppError;
use crate::state::SharedState;
use axum::{
    extract::State,
    http::{header, HeaderValue, Method, Uri},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    request_id::MakeRequestUuid,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
    ServiceBuilderExt,
};
use tracing::Level;

/// Create the application router with all routes and middleware
pub fn create_router(state: SharedState, settings: &Settings) -> Router {
    // Build CORS layer
    let cors = build_cors_layer(settings);

    // Build tracing/logging layer
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_request(DefaultOnRequest::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    // Build middleware stack
    let middleware = ServiceBuilder::new()
        .set_x_request_id(MakeRequestUuid)
        .layer(trace_layer)
        .layer(CompressionLayer::new())
        .layer(cors)
        .propagate_x_request_id();

    Router::new()
        // Health check
        .route("/health", get(health_check))

        // Loading views
        .route("/loading", get(views::main_loading))
        .route("/admin/loading", get(views::admin_loading))
        .route("/views/loading", get(views::loading_view))

        // Envelope contract
        .route("/envelope/validate", post(envelope::validate_envelope))

        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)

        // Apply middleware and state
        .layer(middleware)
        .with_state(state)
}

/// Build CORS layer from settings
fn build_cors_layer(settings: &Settings) -> CorsLayer {
    let origins: Vec<HeaderValue> = settings
        .cors
        .allowed_origins
        .iter()
        .filter_map(|s| s.parse().ok())
        .collect();

    let layer = if origins.is_empty() {
        CorsLayer::new().allow_origin(Any)
    } else {
        CorsLayer::new().allow_origin(origins)
    };

    layer
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .max_age(Duration::from_secs(3600))
}

#[derive(Debug, Serialize)]
struct HealthInfo {
    version: &'static str,
    timestamp: String,
    uptime_seconds: i64,
}

/// Health check endpoint
async fn health_check(State(state): State<SharedState>) -> StackResponse<HealthInfo> {
    let now = chrono::Utc::now();
    StackResponse::new(
        HealthInfo {
            version: env!("CARGO_PKG_VERSION"),
            timestamp: now.to_rfc3339(),
            uptime_seconds: (now - state.started_at).num_seconds(),
        },
        "Server is running fine.",
    )
}

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {}", uri.path()))
}

async fn method_not_allowed(method: Method, uri: Uri) -> AppError {
    AppError::MethodNotAllowed(format!("{} is not supported on {}", method, uri.path()))
}
