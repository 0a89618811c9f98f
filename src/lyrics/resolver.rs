//! Ordered provider fallback. Provider errors never escape `resolve`.

use std::time::Duration;
use tracing::{debug, info, warn};

use super::select::{select_best, ArtistMatchSelector, CandidateSelector};
use crate::models::{SearchMode, SearchOutcome, SearchRequest};
use crate::providers::{LyricsProvider, ProviderError};

pub const DEFAULT_PROVIDER_TIMEOUT: Duration = Duration::from_secs(5);

pub struct LyricsResolver {
    providers: Vec<Box<dyn LyricsProvider>>,
    selector: Box<dyn CandidateSelector>,
    timeout: Duration,
}

impl Default for LyricsResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl LyricsResolver {
    pub fn new() -> Self {
        Self {
            providers: Vec::new(),
            selector: Box::new(ArtistMatchSelector),
            timeout: DEFAULT_PROVIDER_TIMEOUT,
        }
    }

    pub fn with_provider(mut self, provider: Box<dyn LyricsProvider>) -> Self {
        self.providers.push(provider);
        self
    }

    pub fn with_selector(mut self, selector: Box<dyn CandidateSelector>) -> Self {
        self.selector = selector;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn provider_names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    pub async fn search(
        &self,
        track: Option<&str>,
        artist: Option<&str>,
        mode: SearchMode,
    ) -> SearchOutcome {
        match SearchRequest::parse(track, artist, mode) {
            Ok(request) => self.resolve(&request).await,
            Err(reason) => {
                debug!(%reason, "rejected search input");
                SearchOutcome::InvalidInput(reason)
            }
        }
    }

    pub async fn resolve(&self, request: &SearchRequest) -> SearchOutcome {
        // error from the most recently attempted provider, if it failed
        let mut last_error: Option<ProviderError> = None;

        for provider in &self.providers {
            let name = provider.name();

            if provider.requires_artist() && request.artist().is_none() {
                debug!(provider = name, "skipping provider, no artist given");
                continue;
            }

            debug!(provider = name, track = request.track(), artist = ?request.artist(), "trying provider");

            let attempt = tokio::time::timeout(self.timeout, provider.fetch_candidates(request));
            let rows = match attempt.await {
                Ok(Ok(rows)) => rows,
                Ok(Err(err)) => {
                    warn!(provider = name, error = %err, "provider failed");
                    last_error = Some(err);
                    continue;
                }
                Err(_) => {
                    warn!(provider = name, timeout = ?self.timeout, "provider timed out");
                    last_error = Some(ProviderError::Timeout(self.timeout));
                    continue;
                }
            };
            last_error = None;

            let total = rows.len();
            match select_best(self.selector.as_ref(), request, rows).and_then(|c| c.into_result()) {
                Some(result) => {
                    info!(
                        provider = name,
                        selector = self.selector.name(),
                        track = %result.track,
                        artist = %result.artist,
                        "found lyrics"
                    );
                    return SearchOutcome::Success(result);
                }
                None => debug!(provider = name, candidates = total, "no usable candidates"),
            }
        }

        match last_error {
            Some(err) if err.is_transient() => {
                warn!(error = %err, "last provider failed, giving up");
                SearchOutcome::transient()
            }
            _ => {
                info!(track = request.track(), artist = ?request.artist(), "no lyrics found");
                SearchOutcome::not_found(request)
            }
        }
    }
}
