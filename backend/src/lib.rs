//! Rolodex: a CRUD HTTP service for user records.
//!
//! Users live in a file-backed SQLite table behind a Diesel repository;
//! creation falls back to an external random-identity API when the
//! request body is missing or unparseable. See `server` for wiring.

pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

pub use middleware::trace::Trace;
