//! The single place where failures become HTTP responses.

use crate::response::Envelope;
use aide::OperationOutput;
use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use catalog_core::models::ValidationError;
use thiserror::Error;
use tracing::{Level, event};

/// Everything a handler can fail with.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The addressed entity does not exist
    #[error("{0} not found")]
    NotFound(&'static str),

    /// The request body describes an invalid product or review
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The request body, path or query string could not be read
    #[error("{0}")]
    BadRequest(String),

    /// The caller could not be identified
    #[error("please login to access this resource")]
    Unauthorized,

    /// The caller is known but may not manage products
    #[error("not allowed to manage products")]
    Forbidden,

    /// The storage backend failed; details are logged, not returned
    #[error("failed to {0}")]
    Internal(&'static str),
}

impl ApiError {
    /// Log a backend error and turn it into [`ApiError::Internal`].
    pub(crate) fn storage<E: std::error::Error>(operation: &'static str) -> impl FnOnce(E) -> Self {
        move |err| {
            event!(Level::ERROR, operation, err = err.to_string());
            Self::Internal(operation)
        }
    }

    /// The status code the error is reported with
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Validation(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // server-side failures were already logged where they happened
        if !matches!(self, Self::Internal(_)) {
            event!(Level::DEBUG, err = self.to_string(), "client error");
        }

        let body = Envelope::<()>::failure(capitalize(self.to_string()));
        (self.status_code(), Json(body)).into_response()
    }
}

impl OperationOutput for ApiError {
    type Inner = Self;
}

fn capitalize(message: String) -> String {
    let mut chars = message.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => message,
    }
}
