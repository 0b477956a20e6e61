//! Application state management
//!
//! Contains shared state accessible across all handlers.

use crate::config::Settings;
use crate::views::{LoadingVariant, LoadingView};
use std::sync::Arc;

/// Application state shared across all handlers
pub struct AppState {
    /// Title used for the standalone loading pages
    pub title: String,

    pub started_at: chrono::DateTime<chrono::Utc>,
}

impl AppState {
    pub fn new(settings: &Settings) -> Self {
        Self {
            title: settings.views.title.clone(),
            started_at: chrono::Utc::now(),
        }
    }

    /// Full loading page for `variant`
    pub fn loading_page(&self, variant: LoadingVariant) -> String {
        LoadingView::new(variant).render_document(&self.title)
    }
}

/// Type alias for shared state
pub type SharedState = Arc<AppState>;
