//! Transport layer: axum WebSocket endpoint and HTTP API.

mod handler;
mod server;
mod signal;
pub mod state;

pub use server::{Server, build_router};
pub use state::AppState;
