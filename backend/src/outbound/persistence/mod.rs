//! SQLite persistence adapter built on Diesel.
//!
//! The `users` table is created by an embedded migration applied at
//! process start; no out-of-band migration tooling is required.

mod diesel_user_repository;
mod models;
mod pool;
mod schema;

pub use self::diesel_user_repository::DieselUserRepository;
pub use self::pool::{DbPool, PoolConfig, PoolError};

use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// Errors raised while bringing the schema up to date.
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    /// A connection could not be checked out.
    #[error(transparent)]
    Pool(#[from] PoolError),

    /// A migration failed to apply.
    #[error("failed to apply migrations: {message}")]
    Apply { message: String },
}

/// Apply any pending migrations on a pooled connection.
///
/// # Errors
///
/// Returns [`MigrationError`] when no connection is available or a
/// migration fails.
pub fn run_migrations(pool: &DbPool) -> Result<(), MigrationError> {
    let mut conn = pool.get()?;
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|err| MigrationError::Apply {
            message: err.to_string(),
        })?;
    Ok(())
}
