//! Loading view route handlers

use crate::error::{bad_request, ApiResult};
use crate::state::SharedState;
use crate::views::{LoadingVariant, LoadingView};
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::response::Html;
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Default, Deserialize)]
pub struct LoadingQuery {
    pub variant: Option<String>,
    /// Return only the fragment instead of a full page
    #[serde(default)]
    pub fragment: bool,
}

/// Loading page for the main segment
pub async fn main_loading(State(state): State<SharedState>) -> Html<String> {
    Html(state.loading_page(LoadingVariant::Neutral))
}

/// Loading page for the admin segment
pub async fn admin_loading(State(state): State<SharedState>) -> Html<String> {
    Html(state.loading_page(LoadingVariant::Admin))
}

/// Loading view selected by query string
pub async fn loading_view(
    State(state): State<SharedState>,
    query: Result<Query<LoadingQuery>, QueryRejection>,
) -> ApiResult<Html<String>> {
    let Query(query) = query.map_err(|e| bad_request(e.body_text()))?;
    let variant = match query.variant.as_deref() {
        Some(raw) => raw.parse::<LoadingVariant>().map_err(bad_request)?,
        None => LoadingVariant::default(),
    };

    debug!(%variant, fragment = query.fragment, "Rendering loading view");

    let html = if query.fragment {
        LoadingView::new(variant).render()
    } else {
        state.loading_page(variant)
    };
    Ok(Html(html))
}
