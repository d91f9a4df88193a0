//! Storefront application wiring (Axum router + shared services).
//!
//! - `services.rs`: catalog, session registry, wallet connector, realtime channel
//! - `sessions.rs` / `realtime.rs`: per-browser carts and their change notifications
//! - `routes/`: HTML pages, form posts, and the JSON API
//! - `views/`: server-rendered HTML
//! - `dto.rs`: request/response DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router, routing::get};

use crate::config::StorefrontConfig;
use crate::middleware;

pub mod dto;
pub mod errors;
pub mod realtime;
pub mod routes;
pub mod services;
pub mod sessions;
pub mod views;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(config: &StorefrontConfig) -> Router {
    let services = Arc::new(services::build_services(config));
    let session_state = middleware::SessionState {
        sessions: Arc::clone(&services.sessions),
        cookie_name: Arc::from(config.session_cookie.as_str()),
    };

    // Everything except health checks runs inside a cart session.
    let storefront = routes::router()
        .layer(Extension(services))
        .layer(axum::middleware::from_fn_with_state(
            session_state,
            middleware::session_middleware,
        ));

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(storefront)
}
