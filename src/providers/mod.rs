use async_trait::async_trait;
use reqwest::StatusCode;
use std::time::Duration;
use thiserror::Error;

use crate::lyrics::ProviderCandidate;
use crate::models::SearchRequest;

pub mod lrclib;
pub mod lyrics_ovh;

pub const USER_AGENT: &str = concat!("lyric-land/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("unexpected status: {0}")]
    Status(StatusCode),

    #[error("malformed payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("timed out after {0:?}")]
    Timeout(Duration),
}

impl ProviderError {
    pub fn is_transient(&self) -> bool {
        match self {
            ProviderError::Network(_) | ProviderError::Timeout(_) => true,
            ProviderError::Status(status) => {
                status.is_server_error() || *status == StatusCode::TOO_MANY_REQUESTS
            }
            ProviderError::Decode(_) => false,
        }
    }
}

/// Rows come back in the provider's relevance order. A 404 is an empty list.
#[async_trait]
pub trait LyricsProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Providers that can only look up an exact artist/track pair.
    fn requires_artist(&self) -> bool {
        false
    }

    async fn fetch_candidates(
        &self,
        request: &SearchRequest,
    ) -> Result<Vec<ProviderCandidate>, ProviderError>;
}

pub(crate) fn http_client(timeout: Duration) -> Result<reqwest::Client, ProviderError> {
    let client = reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()?;
    Ok(client)
}
