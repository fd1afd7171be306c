//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and
//! are never exposed to the domain.

use chrono::NaiveDate;
use diesel::prelude::*;

use crate::domain::{User, UserDraft, UserPatch};

use super::schema::users;

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct UserRow {
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

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            username: row.username,
            email: row.email,
            avatar: row.avatar,
            phone_number: row.phone_number,
            date_of_birth: row.date_of_birth,
            country: row.country,
            city: row.city,
            street_name: row.street_name,
            street_address: row.street_address,
        }
    }
}

/// Insertable struct for creating new user records. The id column is
/// omitted so SQLite assigns it.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub username: &'a str,
    pub email: &'a str,
    pub avatar: &'a str,
    pub phone_number: &'a str,
    pub date_of_birth: Option<NaiveDate>,
    pub country: &'a str,
    pub city: &'a str,
    pub street_name: &'a str,
    pub street_address: &'a str,
}

impl<'a> From<&'a UserDraft> for NewUserRow<'a> {
    fn from(draft: &'a UserDraft) -> Self {
        Self {
            first_name: &draft.first_name,
            last_name: &draft.last_name,
            username: &draft.username,
            email: &draft.email,
            avatar: &draft.avatar,
            phone_number: &draft.phone_number,
            date_of_birth: draft.date_of_birth,
            country: &draft.country,
            city: &draft.city,
            street_name: &draft.street_name,
            street_address: &draft.street_address,
        }
    }
}

/// Changeset for merge-updates. `None` fields are skipped by Diesel's
/// `AsChangeset`, which is exactly the PATCH-style merge contract.
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserChangeset {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub avatar: Option<String>,
    pub phone_number: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub street_name: Option<String>,
    pub street_address: Option<String>,
}

impl From<UserPatch> for UserChangeset {
    fn from(patch: UserPatch) -> Self {
        let patch = patch.normalised();
        Self {
            first_name: patch.first_name,
            last_name: patch.last_name,
            username: patch.username,
            email: patch.email,
            avatar: patch.avatar,
            phone_number: patch.phone_number,
            date_of_birth: patch.date_of_birth,
            country: patch.country,
            city: patch.city,
            street_name: patch.street_name,
            street_address: patch.street_address,
        }
    }
}
