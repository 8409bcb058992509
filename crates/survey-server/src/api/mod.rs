//! API routes for the survey server.

pub mod error;
pub mod estates;
pub mod request_id;
mod routes;

use axum::Router;

pub use error::ApiError;

pub fn routes() -> Router<std::sync::Arc<crate::state::AppState>> {
    routes::create_router()
}

#[cfg(test)]
mod tests;
