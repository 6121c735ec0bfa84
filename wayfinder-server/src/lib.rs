//! HTTP front end for indoor route requests

pub mod app;
pub mod config;
pub mod error;

pub use app::{AppState, create_router};
pub use config::{Cli, ServerConfig};
pub use error::{ApiError, ApiResult};
