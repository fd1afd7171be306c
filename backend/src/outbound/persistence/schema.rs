//! Diesel table definitions for the SQLite schema.
//!
//! These definitions must match the embedded migrations exactly; Diesel
//! relies on them for type-safe SQL generation.

diesel::table! {
    /// User records table.
    ///
    /// All address and identity fields are plain text with empty-string
    /// defaults; `date_of_birth` is NULL when unknown.
    users (id) {
        /// Primary key, assigned by SQLite on insert.
        id -> Integer,
        first_name -> Text,
        last_name -> Text,
        username -> Text,
        email -> Text,
        avatar -> Text,
        phone_number -> Text,
        date_of_birth -> Nullable<Date>,
        country -> Text,
        city -> Text,
        street_name -> Text,
        street_address -> Text,
    }
}
