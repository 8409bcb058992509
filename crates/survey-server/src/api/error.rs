//! Error responses for the REST API.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use survey_core::{ErrorResponse, ValidationError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid Request Body")]
    InvalidBody,
    #[error("Invalid Query Parameter")]
    InvalidQuery,
    #[error("Invalid Estate ID")]
    InvalidEstateId,
    #[error("Estate not found")]
    EstateNotFound,
    #[error("Tree already exist")]
    TreeExists,
    #[error("Invalid Request Body")]
    Validation(#[from] ValidationError),
    #[error("{0}")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidBody
            | ApiError::InvalidQuery
            | ApiError::InvalidEstateId
            | ApiError::TreeExists
            | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::EstateNotFound => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Internal(err) => tracing::error!("Request failed: {:#}", err),
            ApiError::Validation(err) => tracing::debug!("Rejected request: {}", err),
            _ => {}
        }

        (self.status(), Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}
