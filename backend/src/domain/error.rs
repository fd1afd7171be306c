//! Domain-level error payload.
//!
//! These errors are transport agnostic. The inbound HTTP adapter maps
//! them to status codes and JSON responses; nothing in this module knows
//! about HTTP.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The request is malformed or fails validation.
    InvalidRequest,
    /// The requested resource does not exist.
    NotFound,
    /// An unexpected error occurred inside the service.
    InternalError,
}

/// Error payload returned to clients.
///
/// ## Invariants
/// - `message` is non-empty once trimmed of whitespace.
///
/// # Examples
/// ```
/// use rolodex::domain::{Error, ErrorCode};
///
/// let err = Error::not_found("no such user");
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Error {
    code: ErrorCode,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

impl Error {
    /// Create a new error with the given code and message.
    ///
    /// Empty messages are replaced with a generic one rather than
    /// violating the payload invariant.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        let mut message = message.into();
        if message.trim().is_empty() {
            message = "unspecified error".to_owned();
        }
        Self {
            code,
            message,
            details: None,
        }
    }

    /// Shorthand for an [`ErrorCode::InvalidRequest`] error.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Shorthand for an [`ErrorCode::NotFound`] error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Shorthand for an [`ErrorCode::InternalError`] error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Attach structured details to the error.
    ///
    /// # Examples
    /// ```
    /// use rolodex::domain::Error;
    /// use serde_json::json;
    ///
    /// let err = Error::invalid_request("bad").with_details(json!({ "field": "email" }));
    /// assert!(err.details().is_some());
    /// ```
    #[must_use]
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message returned to clients.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Supplementary structured details, when present.
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.code, self.message)
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serialises_code_as_snake_case() {
        let err = Error::invalid_request("missing field");
        let value = serde_json::to_value(&err).expect("serialise error");
        assert_eq!(value["code"], "invalid_request");
        assert_eq!(value["message"], "missing field");
        assert!(value.get("details").is_none());
    }

    #[test]
    fn details_round_trip() {
        let err = Error::not_found("gone").with_details(json!({ "id": 7 }));
        let value = serde_json::to_value(&err).expect("serialise error");
        assert_eq!(value["details"]["id"], 7);
    }

    #[test]
    fn empty_message_is_replaced() {
        let err = Error::internal("   ");
        assert!(!err.message().trim().is_empty());
    }
}
