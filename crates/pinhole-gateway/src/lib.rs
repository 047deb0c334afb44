//! HTTP gateway for the Pinhole URL shortener.
//!
//! Exposes the registry over a small JSON API plus the redirect endpoint,
//! and emits one access-log event per request.

pub mod access_log;
pub mod app;
pub mod error;
pub mod handlers;
pub mod model;
pub mod state;

pub use app::App;
pub use state::AppState;
