//! HTTP server for the maternal-health chat relay
//!
//! Exposes the chat, translation and speech endpoints over axum and wires
//! the external-service adapters into the pipeline at startup.

pub mod http;
pub mod state;

pub use http::create_router;
pub use state::AppState;
