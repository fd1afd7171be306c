//! Persistence gateway port for user records.

use async_trait::async_trait;

use crate::domain::{User, UserDraft, UserPatch};

/// Errors the persistence gateway can surface.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserRepositoryError {
    /// No record exists for the given identifier.
    #[error("user {id} not found")]
    NotFound { id: i32 },

    /// A connection could not be obtained or was lost.
    #[error("database connection failed: {message}")]
    Connection { message: String },

    /// The query itself failed.
    #[error("database query failed: {message}")]
    Query { message: String },
}

impl UserRepositoryError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Equality filters for listing users; absent fields do not constrain.
/// Filters combine with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserListFilter {
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Allow-listed sort columns for the list operation.
///
/// Caller input is parsed into this enum at the HTTP boundary so no raw
/// string ever reaches query construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserSortKey {
    Id,
    Username,
    FirstName,
    LastName,
    Email,
    DateOfBirth,
    Country,
    City,
}

impl UserSortKey {
    /// Parse a caller-supplied sort key. Returns `None` for anything
    /// outside the allow-list.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "id" => Some(Self::Id),
            "username" => Some(Self::Username),
            "first_name" => Some(Self::FirstName),
            "last_name" => Some(Self::LastName),
            "email" => Some(Self::Email),
            "date_of_birth" => Some(Self::DateOfBirth),
            "country" => Some(Self::Country),
            "city" => Some(Self::City),
            _ => None,
        }
    }
}

/// Port for the storage abstraction over the users table.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new record and return it with its assigned identifier.
    async fn create(&self, draft: UserDraft) -> Result<User, UserRepositoryError>;

    /// Fetch a record by primary key.
    async fn get(&self, id: i32) -> Result<User, UserRepositoryError>;

    /// Apply a merge-update and return the post-merge record as stored.
    ///
    /// Fields absent from the patch are left untouched.
    async fn update(&self, id: i32, patch: UserPatch) -> Result<User, UserRepositoryError>;

    /// Remove a record by identifier. Deleting an absent identifier is
    /// not an error.
    async fn delete(&self, id: i32) -> Result<(), UserRepositoryError>;

    /// Return all records matching the filter, optionally ordered
    /// ascending by the given sort key.
    async fn list(
        &self,
        filter: UserListFilter,
        sort: Option<UserSortKey>,
    ) -> Result<Vec<User>, UserRepositoryError>;
}
