//! Server-rendered views
//!
//! HTML is produced as plain strings and served through `axum::response::Html`.

pub mod loading;

pub use loading::{LoadingVariant, LoadingView};
