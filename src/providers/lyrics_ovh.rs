use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;
use urlencoding::encode;

use super::{http_client, LyricsProvider, ProviderError};
use crate::lyrics::{parser, ProviderCandidate};
use crate::models::SearchRequest;

pub const DEFAULT_BASE_URL: &str = "https://api.lyrics.ovh/v1";

#[derive(Debug, Deserialize)]
struct OvhResponse {
    #[serde(default)]
    lyrics: Option<String>,
}

/// lyrics.ovh exact lookup. Needs both artist and track.
#[derive(Clone)]
pub struct LyricsOvhProvider {
    client: reqwest::Client,
    base_url: String,
}

impl LyricsOvhProvider {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ProviderError> {
        Ok(Self::with_client(http_client(timeout)?, base_url))
    }

    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, artist: &str, track: &str) -> String {
        format!("{}/{}/{}", self.base_url, encode(artist), encode(track))
    }
}

#[async_trait]
impl LyricsProvider for LyricsOvhProvider {
    fn name(&self) -> &str {
        "lyrics.ovh"
    }

    fn requires_artist(&self) -> bool {
        true
    }

    async fn fetch_candidates(
        &self,
        request: &SearchRequest,
    ) -> Result<Vec<ProviderCandidate>, ProviderError> {
        let Some(artist) = request.artist() else {
            return Ok(Vec::new());
        };

        let url = self.url(artist, request.track());
        debug!(%url, "querying lyrics.ovh");

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Ok(Vec::new());
        }
        if !status.is_success() {
            return Err(ProviderError::Status(status));
        }

        let body = response.text().await?;
        decode_body(request, artist, &body)
    }
}

/// lyrics.ovh echoes no metadata, so the request fields stand in for it.
fn decode_body(
    request: &SearchRequest,
    artist: &str,
    body: &str,
) -> Result<Vec<ProviderCandidate>, ProviderError> {
    let payload: OvhResponse = serde_json::from_str(body)?;

    let lyrics = payload
        .lyrics
        .map(|raw| parser::trim(&parser::strip_boilerplate(&raw)))
        .filter(|text| !text.is_empty());

    Ok(lyrics
        .map(|text| ProviderCandidate {
            track_name: request.track().to_string(),
            artist_name: artist.to_string(),
            plain_lyrics: Some(text),
            synced_lyrics: None,
            instrumental: false,
        })
        .into_iter()
        .collect())
}
