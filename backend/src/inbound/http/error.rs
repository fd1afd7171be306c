//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while allowing
//! Actix handlers to turn failures into consistent JSON responses and
//! status codes.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use tracing::error;

use crate::domain::ports::UserRepositoryError;
use crate::domain::{Error, ErrorCode};

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Strip internal failure detail before it reaches a client.
fn redact_if_internal(error: &Error) -> Error {
    if matches!(error.code(), ErrorCode::InternalError) {
        Error::internal("internal server error")
    } else {
        error.clone()
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        if matches!(self.code(), ErrorCode::InternalError) {
            error!(error = %self, "request failed with internal error");
        }
        HttpResponse::build(self.status_code()).json(redact_if_internal(self))
    }
}

impl From<UserRepositoryError> for Error {
    fn from(err: UserRepositoryError) -> Self {
        match err {
            UserRepositoryError::NotFound { id } => {
                Self::not_found(format!("user {id} not found"))
            }
            UserRepositoryError::Connection { .. } | UserRepositoryError::Query { .. } => {
                Self::internal(err.to_string())
            }
        }
    }
}
