//! HTTP API layer
//!
//! Wire models, error mapping, shared state, and the axum router that
//! exposes the extraction capability over HTTP.

pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use models::{FormatDescriptor, FormatsResponse, HealthResponse, InfoResponse};
pub use routes::build_router;
pub use state::AppState;
