//! Reqwest-backed random-user source adapter.
//!
//! Owns transport details only: request dispatch, timeout and HTTP
//! error mapping, and JSON decoding into a domain draft.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};

use crate::domain::ports::{RandomUserSource, RandomUserSourceError};
use crate::domain::UserDraft;

use super::dto::RandomUserDto;

/// Endpoint consulted when creation input is missing or unparseable.
pub const DEFAULT_RANDOM_USER_ENDPOINT: &str = "https://random-data-api.com/api/v2/users";

/// Random-user source that performs HTTP GET requests against one endpoint.
pub struct RandomUserHttpSource {
    client: Client,
    endpoint: Url,
}

impl RandomUserHttpSource {
    /// Build an adapter using a reqwest client with an explicit request
    /// timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(endpoint: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoint })
    }
}

#[async_trait]
impl RandomUserSource for RandomUserHttpSource {
    async fn fetch_random_user(&self) -> Result<UserDraft, RandomUserSourceError> {
        let response = self
            .client
            .get(self.endpoint.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }

        parse_random_user(body.as_ref()).map(RandomUserDto::into_draft)
    }
}

fn parse_random_user(body: &[u8]) -> Result<RandomUserDto, RandomUserSourceError> {
    serde_json::from_slice(body).map_err(|error| {
        RandomUserSourceError::decode(format!("invalid random-user JSON payload: {error}"))
    })
}

fn map_transport_error(error: reqwest::Error) -> RandomUserSourceError {
    if error.is_timeout() {
        RandomUserSourceError::timeout(error.to_string())
    } else {
        RandomUserSourceError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> RandomUserSourceError {
    let preview = body_preview(body);
    let message = if preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), preview)
    };
    match status {
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            RandomUserSourceError::timeout(message)
        }
        _ => RandomUserSourceError::status(message),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
