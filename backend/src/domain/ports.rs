//! Ports the inbound adapter depends on.
//!
//! Outbound adapters (Diesel repository, reqwest random-user source)
//! implement these traits; handlers never see a concrete adapter type.

mod random_user_source;
mod user_repository;

pub use self::random_user_source::{RandomUserSource, RandomUserSourceError};
pub use self::user_repository::{
    UserListFilter, UserRepository, UserRepositoryError, UserSortKey,
};
