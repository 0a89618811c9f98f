use async_trait::async_trait;
use reqwest::StatusCode;
use std::str::FromStr;
use std::time::Duration;
use tracing::debug;
use urlencoding::encode;

use super::{http_client, LyricsProvider, ProviderError};
use crate::lyrics::ProviderCandidate;
use crate::models::SearchRequest;

pub const DEFAULT_BASE_URL: &str = "https://lrclib.net/api";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LrcLibMode {
    /// `/search`: zero or more rows ranked by relevance.
    #[default]
    Search,
    /// `/get`: a single exact-match row.
    Get,
}

impl FromStr for LrcLibMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "search" => Ok(LrcLibMode::Search),
            "get" | "exact" => Ok(LrcLibMode::Get),
            other => Err(format!("unknown LRCLIB mode: {other}")),
        }
    }
}

#[derive(Clone)]
pub struct LrcLibProvider {
    client: reqwest::Client,
    base_url: String,
    mode: LrcLibMode,
}

impl LrcLibProvider {
    pub fn new(base_url: &str, mode: LrcLibMode, timeout: Duration) -> Result<Self, ProviderError> {
        Ok(Self::with_client(http_client(timeout)?, base_url, mode))
    }

    pub fn with_client(client: reqwest::Client, base_url: &str, mode: LrcLibMode) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            mode,
        }
    }

    pub fn mode(&self) -> LrcLibMode {
        self.mode
    }

    fn url(&self, request: &SearchRequest) -> String {
        let endpoint = match self.mode {
            LrcLibMode::Search => "search",
            LrcLibMode::Get => "get",
        };

        let mut url = format!(
            "{}/{endpoint}?track_name={}",
            self.base_url,
            encode(request.track())
        );
        if let Some(artist) = request.artist() {
            url.push_str(&format!("&artist_name={}", encode(artist)));
        }
        url
    }
}

#[async_trait]
impl LyricsProvider for LrcLibProvider {
    fn name(&self) -> &str {
        "lrclib"
    }

    async fn fetch_candidates(
        &self,
        request: &SearchRequest,
    ) -> Result<Vec<ProviderCandidate>, ProviderError> {
        let url = self.url(request);
        debug!(%url, "querying LRCLIB");

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Ok(Vec::new());
        }
        if !status.is_success() {
            return Err(ProviderError::Status(status));
        }

        let body = response.text().await?;
        decode_body(self.mode, &body)
    }
}

fn decode_body(mode: LrcLibMode, body: &str) -> Result<Vec<ProviderCandidate>, ProviderError> {
    match mode {
        LrcLibMode::Search => Ok(serde_json::from_str::<Vec<ProviderCandidate>>(body)?),
        LrcLibMode::Get => Ok(vec![serde_json::from_str::<ProviderCandidate>(body)?]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lyrics::resolver::LyricsResolver;
    use crate::models::{SearchMode, SearchOutcome};
    use crate::providers::test_server::{client, serve_once};

    fn provider(mode: LrcLibMode) -> LrcLibProvider {
        LrcLibProvider::new("https://lrclib.net/api/", mode, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_search_url_with_artist() {
        let request =
            SearchRequest::parse(Some("Bohemian Rhapsody"), Some("Simon & Garfunkel"), SearchMode::Simple)
                .unwrap();
        assert_eq!(
            provider(LrcLibMode::Search).url(&request),
            "https://lrclib.net/api/search?track_name=Bohemian%20Rhapsody&artist_name=Simon%20%26%20Garfunkel"
        );
    }

    #[test]
    fn test_get_url_without_artist() {
        let request = SearchRequest::parse(Some("Yesterday"), None, SearchMode::Simple).unwrap();
        assert_eq!(
            provider(LrcLibMode::Get).url(&request),
            "https://lrclib.net/api/get?track_name=Yesterday"
        );
    }

    #[test]
    fn test_decode_search_array() {
        let body = r#"[
            {"id": 1, "trackName": "A", "artistName": "X", "instrumental": false, "plainLyrics": "one", "syncedLyrics": null},
            {"id": 2, "trackName": "B", "artistName": "Y", "instrumental": true, "plainLyrics": null, "syncedLyrics": null}
        ]"#;
        let rows = decode_body(LrcLibMode::Search, body).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].track_name, "A");
        assert!(rows[1].instrumental);
    }

    #[test]
    fn test_decode_empty_search() {
        assert!(decode_body(LrcLibMode::Search, "[]").unwrap().is_empty());
    }

    #[test]
    fn test_decode_get_object() {
        let body = r#"{"trackName": "A", "artistName": "X", "instrumental": false, "plainLyrics": "one"}"#;
        let rows = decode_body(LrcLibMode::Get, body).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].plain_lyrics.as_deref(), Some("one"));
    }

    #[test]
    fn test_decode_malformed() {
        let err = decode_body(LrcLibMode::Search, "<html>oops</html>").unwrap_err();
        assert!(matches!(err, ProviderError::Decode(_)));
        assert!(!err.is_transient());
    }

    async fn fetch(
        mode: LrcLibMode,
        status: &'static str,
        body: &'static str,
        request: &SearchRequest,
    ) -> (Result<Vec<ProviderCandidate>, ProviderError>, String) {
        let (base_url, server) = serve_once(status, body).await;
        let provider = LrcLibProvider::with_client(client(), &format!("{base_url}/api"), mode);
        let result = provider.fetch_candidates(request).await;
        (result, server.await.unwrap())
    }

    fn queen() -> SearchRequest {
        SearchRequest::parse(Some("Bohemian Rhapsody"), Some("Queen"), SearchMode::Simple).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_search_rows() {
        let body = r#"[{"trackName": "Bohemian Rhapsody", "artistName": "Queen", "instrumental": false, "plainLyrics": "Is this the real life..."}]"#;
        let (result, request_line) = fetch(LrcLibMode::Search, "200 OK", body, &queen()).await;

        let rows = result.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].artist_name, "Queen");
        assert_eq!(
            request_line,
            "GET /api/search?track_name=Bohemian%20Rhapsody&artist_name=Queen HTTP/1.1"
        );
    }

    #[tokio::test]
    async fn test_fetch_empty_array() {
        let (result, _) = fetch(LrcLibMode::Search, "200 OK", "[]", &queen()).await;
        assert!(result.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_not_found_is_empty() {
        let body = r#"{"code": 404, "name": "TrackNotFound"}"#;
        let (result, request_line) = fetch(LrcLibMode::Get, "404 Not Found", body, &queen()).await;
        assert!(result.unwrap().is_empty());
        assert!(request_line.starts_with("GET /api/get?"));
    }

    #[tokio::test]
    async fn test_fetch_server_error_is_transient() {
        let (result, _) = fetch(LrcLibMode::Search, "503 Service Unavailable", "", &queen()).await;
        let err = result.unwrap_err();
        assert!(matches!(err, ProviderError::Status(StatusCode::SERVICE_UNAVAILABLE)));
        assert!(err.is_transient());
    }

    #[tokio::test]
    async fn test_fetch_rate_limited_is_transient() {
        let (result, _) = fetch(LrcLibMode::Search, "429 Too Many Requests", "", &queen()).await;
        assert!(result.unwrap_err().is_transient());
    }

    #[tokio::test]
    async fn test_fetch_bad_request_is_not_transient() {
        let (result, _) = fetch(LrcLibMode::Search, "400 Bad Request", "{}", &queen()).await;
        let err = result.unwrap_err();
        assert!(matches!(err, ProviderError::Status(StatusCode::BAD_REQUEST)));
        assert!(!err.is_transient());
    }

    #[tokio::test]
    async fn test_resolver_reports_transient_server_error() {
        let (base_url, _server) = serve_once("502 Bad Gateway", "").await;
        let provider =
            LrcLibProvider::with_client(client(), &format!("{base_url}/api"), LrcLibMode::Search);
        let resolver = LyricsResolver::new().with_provider(Box::new(provider));

        let request = SearchRequest::parse(Some("Song"), None, SearchMode::Simple).unwrap();
        assert_eq!(resolver.resolve(&request).await, SearchOutcome::transient());
    }

    #[tokio::test]
    async fn test_resolver_not_found_on_404() {
        let (base_url, _server) = serve_once("404 Not Found", "").await;
        let provider =
            LrcLibProvider::with_client(client(), &format!("{base_url}/api"), LrcLibMode::Get);
        let resolver = LyricsResolver::new().with_provider(Box::new(provider));

        let request = SearchRequest::parse(Some("Song"), None, SearchMode::Simple).unwrap();
        assert!(matches!(resolver.resolve(&request).await, SearchOutcome::NotFound(_)));
    }

    #[test]
    fn test_mode_from_str() {
        assert_eq!("search".parse::<LrcLibMode>(), Ok(LrcLibMode::Search));
        assert_eq!(" GET ".parse::<LrcLibMode>(), Ok(LrcLibMode::Get));
        assert!("fuzzy".parse::<LrcLibMode>().is_err());
    }
}
