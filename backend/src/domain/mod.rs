//! Domain entities and ports.
//!
//! Purpose: define the transport-agnostic user model, the error payload
//! shared by every endpoint, and the ports the inbound HTTP adapter
//! depends on. Adapters live under `outbound` and must only be reached
//! through the traits declared in [`ports`].

pub mod error;
pub mod ports;
pub mod user;

pub use self::error::{Error, ErrorCode};
pub use self::user::{User, UserDraft, UserDraftValidationError, UserPatch};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;
