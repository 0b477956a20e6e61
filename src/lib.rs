//! Ballot Shell
//!
//! Standard API response envelopes (`message`, `data`, `error`, `status`,
//! plus `count`/`next`/`previous` for lists) and the loading placeholder
//! views of the voting front-end, served over axum.

pub mod config;
pub mod envelope;
pub mod error;
pub mod routes;
pub mod state;
pub mod views;

pub use envelope::{ErrorBody, PaginatedStackResponse, StackResponse};
