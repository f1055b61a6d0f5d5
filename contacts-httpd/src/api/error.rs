use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::store;

/// Message returned when a referenced contact does not exist.
pub const NOT_FOUND: &str = "Contact not found.";

/// Errors relating to the contacts API.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The contact was not found.
    #[error("entity not found")]
    NotFound,

    /// A required field is missing or empty.
    #[error("invalid request: {0}")]
    Validation(&'static str),

    /// The request body could not be understood.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Anything else.
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Map a store error, describing validation failures with `message`.
    pub fn store(message: &'static str) -> impl FnOnce(store::Error) -> Self {
        move |err| match err {
            store::Error::NotFound(_) => Error::NotFound,
            store::Error::Validation => Error::Validation(message),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Error::NotFound => StatusCode::NOT_FOUND,
            Error::Validation(_) | Error::BadRequest(_) => StatusCode::BAD_REQUEST,
            Error::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();
        if let Error::Internal(_) = &self {
            tracing::error!("Error: {:?}", &self);
        }
        let msg = match self {
            Error::NotFound => NOT_FOUND.to_owned(),
            Error::Validation(msg) => msg.to_owned(),
            Error::BadRequest(msg) => msg,
            Error::Internal(_) => status
                .canonical_reason()
                .unwrap_or("Internal Server Error")
                .to_owned(),
        };

        (status, Json(json!({ "error": msg }))).into_response()
    }
}
