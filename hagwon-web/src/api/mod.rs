//! HTTP API handlers

pub mod auth;
pub mod grades;
pub mod health;
pub mod lectures;
pub mod materials;
pub mod student_records;
pub mod upload;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use hagwon_common::{pagination, Error};
use serde::Deserialize;
use serde_json::json;
use tracing::error;

/// Maps the shared error taxonomy onto HTTP responses
///
/// Every non-2xx response carries a single human-readable
/// `{"error": message}` body.
#[derive(Debug)]
pub enum ApiError {
    /// Missing, unknown, or expired admin session
    Unauthorized(String),
    /// Everything from the shared taxonomy
    Common(Error),
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        ApiError::Common(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Unauthorized(message) => (StatusCode::UNAUTHORIZED, message),
            ApiError::Common(err) => {
                let status = match &err {
                    Error::Validation(_)
                    | Error::UnsupportedType { .. }
                    | Error::FileTooLarge { .. } => StatusCode::BAD_REQUEST,
                    Error::NotFound(_) => StatusCode::NOT_FOUND,
                    _ => StatusCode::INTERNAL_SERVER_ERROR,
                };
                if status == StatusCode::INTERNAL_SERVER_ERROR {
                    error!("Request failed: {}", err);
                }
                (status, err.to_string())
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Query parameters shared by the paged list endpoints
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<usize>,
    pub page_size: Option<usize>,
}

/// Apply presentation paging to an already-fetched list
///
/// Paging happens after the full ordered fetch; the page size comes from
/// the caller's viewport, never from the repository.
pub(crate) fn page_slice<T: Clone>(items: Vec<T>, query: &PageQuery) -> Vec<T> {
    match (query.page, query.page_size) {
        (Some(page), Some(page_size)) => pagination::paginate(&items, page, page_size).to_vec(),
        _ => items,
    }
}
