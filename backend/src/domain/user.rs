//! User entity and its create/update payloads.
//!
//! Serialisation contract: field names are snake_case on the wire and
//! `date_of_birth` is an ISO calendar date (`"YYYY-MM-DD"`) or `null`
//! when unknown.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A stored user record.
///
/// The identifier is assigned by the persistence gateway on creation and
/// never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub avatar: String,
    pub phone_number: String,
    pub date_of_birth: Option<NaiveDate>,
    pub country: String,
    pub city: String,
    pub street_name: String,
    pub street_address: String,
}

/// Validation errors for [`UserDraft`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserDraftValidationError {
    EmptyUsername,
    EmptyEmail,
}

impl std::fmt::Display for UserDraftValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::EmptyEmail => write!(f, "email must not be empty"),
        }
    }
}

impl std::error::Error for UserDraftValidationError {}

/// A user without an identifier, as supplied at creation time.
///
/// Every field defaults so that a sparse JSON body still decodes; the
/// presence rules live in [`UserDraft::validate`], not in serde.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDraft {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub avatar: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub street_name: String,
    #[serde(default)]
    pub street_address: String,
}

impl UserDraft {
    /// Check the creation presence rules: username and email must be
    /// non-empty after trimming. This applies to caller-supplied drafts
    /// and generated fallback drafts alike.
    pub fn validate(&self) -> Result<(), UserDraftValidationError> {
        if self.username.trim().is_empty() {
            return Err(UserDraftValidationError::EmptyUsername);
        }
        if self.email.trim().is_empty() {
            return Err(UserDraftValidationError::EmptyEmail);
        }
        Ok(())
    }
}

/// Partial update payload with merge semantics.
///
/// Only fields present in the payload overwrite stored values; absent
/// fields always survive. Empty strings are treated as absent so the
/// merge matches the gateway contract (non-empty fields only).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPatch {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub street_name: Option<String>,
    #[serde(default)]
    pub street_address: Option<String>,
}

fn non_empty(field: Option<String>) -> Option<String> {
    field.filter(|value| !value.is_empty())
}

impl UserPatch {
    /// Drop empty-string fields so they cannot overwrite stored values.
    #[must_use]
    pub fn normalised(self) -> Self {
        Self {
            first_name: non_empty(self.first_name),
            last_name: non_empty(self.last_name),
            username: non_empty(self.username),
            email: non_empty(self.email),
            avatar: non_empty(self.avatar),
            phone_number: non_empty(self.phone_number),
            date_of_birth: self.date_of_birth,
            country: non_empty(self.country),
            city: non_empty(self.city),
            street_name: non_empty(self.street_name),
            street_address: non_empty(self.street_address),
        }
    }

    /// Whether the patch carries no fields at all after normalisation.
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.username.is_none()
            && self.email.is_none()
            && self.avatar.is_none()
            && self.phone_number.is_none()
            && self.date_of_birth.is_none()
            && self.country.is_none()
            && self.city.is_none()
            && self.street_name.is_none()
            && self.street_address.is_none()
    }
}
