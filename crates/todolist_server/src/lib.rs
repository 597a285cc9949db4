//! HTTP surface of the multi-list to-do server.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod views;

pub use config::{ConfigError, ServerConfig};
pub use error::AppError;
pub use routes::{build_router, list_location};
pub use state::AppState;
