//! Error taxonomy and the JSON error envelope.
//!
//! # Design
//! Handlers bail out with `ApiError` through `?`. Its `IntoResponse` impl
//! sets the status code and stows the error in the response extensions; the
//! `error_envelope` middleware, which is the only place that knows the
//! request path, renders the final `{status, message, path}` body. The body
//! carries exactly those three fields and never an internal type name or
//! backtrace.

use axum::{
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Errors surfaced by handlers and services.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// The requested task list does not exist.
    #[error("Task list not found with id: {0}")]
    TaskListNotFound(Uuid),

    /// The requested task does not exist under the addressed list.
    #[error("Task not found with id: {0}")]
    TaskNotFound(Uuid),

    /// A task was created under a parent list id that does not resolve.
    /// Surfaced as a bad request, not a 404: the missing id came from the
    /// request payload path, not a direct resource lookup.
    #[error("Task list not found with id: {0}")]
    MissingParentList(Uuid),

    /// A request body field violated a constraint.
    #[error("{field}: {message}")]
    Validation {
        field: &'static str,
        message: &'static str,
    },

    /// The request body could not be deserialized into the target type.
    #[error("{0}")]
    MalformedBody(String),

    /// A path parameter could not be parsed (ids are UUIDs).
    #[error("{0}")]
    InvalidPathParameter(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::TaskListNotFound(_) | ApiError::TaskNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::MissingParentList(_)
            | ApiError::Validation { .. }
            | ApiError::MalformedBody(_)
            | ApiError::InvalidPathParameter(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut response = self.status().into_response();
        response.extensions_mut().insert(self);
        response
    }
}

/// Wire shape of every error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub status: u16,
    pub message: Option<String>,
    pub path: String,
}

/// Renders handler `ApiError`s into the three-field envelope.
pub async fn error_envelope(req: Request, next: Next) -> Response {
    let path = req.uri().path().to_owned();
    let mut response = next.run(req).await;
    match response.extensions_mut().remove::<ApiError>() {
        Some(err) => {
            let status = err.status();
            tracing::warn!(%path, status = status.as_u16(), "{err}");
            let body = ErrorBody {
                status: status.as_u16(),
                message: Some(err.to_string()),
                path,
            };
            (status, Json(body)).into_response()
        }
        None => response,
    }
}
