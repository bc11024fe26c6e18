use axum::response::{IntoResponse, Response};
use librarian_http::error::AppError;
use thiserror::Error;

use super::store::StoreError;

/// Outcome of a books request that did not succeed.
///
/// Client-side variants display as the exact response text.
#[derive(Debug, Error)]
pub enum BookError {
    #[error("missing required field title")]
    MissingTitle,

    #[error("missing required field comment")]
    MissingComment,

    /// Covers malformed identifiers as well as identifiers that match nothing.
    #[error("no book exists")]
    NotFound,

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<BookError> for AppError {
    fn from(error: BookError) -> Self {
        match error {
            BookError::Store(e) => AppError::Internal(anyhow::Error::new(e)),
            client => AppError::bad_request(client.to_string()),
        }
    }
}

impl IntoResponse for BookError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}
