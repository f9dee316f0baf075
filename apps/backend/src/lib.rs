#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod ai;
pub mod config;
pub mod domain;
pub mod error;
pub mod game;
pub mod health;
pub mod middleware;
pub mod request_ctx;
pub mod routes;
pub mod state;
pub mod vision;
pub mod ws;

pub use error::AppError;
pub use middleware::cors::cors_middleware;
pub use middleware::request_log::RequestLog;
pub use state::app_state::AppState;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    backend_test_support::logging::init();
}
