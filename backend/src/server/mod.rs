//! Route registration and dependency assembly.

pub mod config;

use std::sync::Arc;

use actix_web::web;

use crate::inbound::http::state::HttpState;
use crate::inbound::http::users::{create_user, delete_user, get_user, list_users, update_user};
use crate::inbound::http::health::healthz;
use crate::outbound::persistence::{DbPool, DieselUserRepository};
use crate::outbound::random_user::RandomUserHttpSource;

pub use self::config::{ConfigError, RandomUserConfig, ServerConfig};

/// Register every HTTP endpoint on the given service config.
///
/// # Examples
/// ```
/// use actix_web::App;
///
/// let app = App::new().configure(rolodex::server::configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(create_user)
        .service(list_users)
        .service(get_user)
        .service(update_user)
        .service(delete_user)
        .service(healthz);
}

/// Wire the production adapters into the handler state.
///
/// # Errors
///
/// Returns an error when the outbound HTTP client cannot be built.
pub fn build_state(
    pool: DbPool,
    random_user: &RandomUserConfig,
) -> Result<HttpState, reqwest::Error> {
    let source = RandomUserHttpSource::new(random_user.endpoint.clone(), random_user.timeout)?;
    Ok(HttpState::new(
        Arc::new(DieselUserRepository::new(pool)),
        Arc::new(source),
    ))
}
