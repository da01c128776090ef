//! HTTP API for phone verification
//!
//! Exposes the provider-backed verification endpoints consumed by client
//! flows through `pv_infra::HttpVerificationGateway`.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;

pub use app::create_app;
pub use routes::verification::AppState;
