//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{RandomUserSource, UserRepository};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub users: Arc<dyn UserRepository>,
    pub random_users: Arc<dyn RandomUserSource>,
}

impl HttpState {
    /// Bundle the port implementations the handlers need.
    pub fn new(users: Arc<dyn UserRepository>, random_users: Arc<dyn RandomUserSource>) -> Self {
        Self {
            users,
            random_users,
        }
    }
}
