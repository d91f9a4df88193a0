//! HTTP storefront: server-rendered pages, a JSON API, and the per-session cart wiring.

pub mod app;
pub mod config;
pub mod context;
pub mod middleware;
