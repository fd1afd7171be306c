//! Reqwest adapter for the external random-identity API.

mod dto;
mod http_source;

pub use self::http_source::{RandomUserHttpSource, DEFAULT_RANDOM_USER_ENDPOINT};
