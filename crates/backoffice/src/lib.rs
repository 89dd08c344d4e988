//! Tillpoint back-office library.
//!
//! Exposes the back-office as a library so the router can be driven
//! in-process by integration tests as well as by the server binary.
//!
//! # Architecture
//!
//! - Axum web framework serving a JSON API
//! - Cookie-backed sessions (tower-sessions, in-memory store)
//! - In-memory user directory and append-only audit trail, seeded with the
//!   fixed demo data
//! - Permission checks evaluated per request; the primary admin holds every
//!   permission implicitly

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod permissions;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;

use axum::Router;

use config::BackofficeConfig;
use state::AppState;

/// Build the full application: routes, session layer, state.
///
/// The tracing layer is left to the binary so tests stay quiet.
#[must_use]
pub fn app(config: BackofficeConfig) -> Router {
    let session_layer = middleware::create_session_layer(&config);
    let state = AppState::new(config);

    routes::router().layer(session_layer).with_state(state)
}
