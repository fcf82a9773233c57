//! REST API over the roster service

pub mod handlers;
pub mod server;

pub use handlers::{create_router, ApiResponse, ErrorResponse};
pub use server::{ApiServer, AppState, ServerError};
