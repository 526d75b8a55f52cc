//! Errors reported to API clients.

use crate::store::StoreError;

use http::StatusCode;

/// Message returned in place of any internal failure.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Outcome of a request that did not succeed.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request is malformed or misses required input.
    #[error("{0}")]
    BadRequest(String),
    /// The addressed item does not exist.
    #[error("{0}")]
    NotFound(String),
    /// Anything else. Details are logged, never returned.
    #[error(transparent)]
    Internal(#[from] StoreError),
}

impl ApiError {
    /// A [`ApiError::BadRequest`] with the given message.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    /// The [`ApiError::NotFound`] reported for a missing item.
    pub fn item_not_found(id: &str) -> Self {
        Self::NotFound(format!("Item with ID {id} not found"))
    }

    /// HTTP status code of the response.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to return to the client.
    pub fn public_message(&self) -> &str {
        match self {
            Self::BadRequest(message) | Self::NotFound(message) => message,
            Self::Internal(_) => INTERNAL_ERROR_MESSAGE,
        }
    }
}
