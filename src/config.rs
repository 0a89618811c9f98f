use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;

use crate::lyrics::resolver::DEFAULT_PROVIDER_TIMEOUT;
use crate::providers::lrclib::{self, LrcLibMode};
use crate::providers::lyrics_ovh;

const LIBRARY_FILE: &str = ".local/share/lyric-land/library.json";
const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectorKind {
    #[default]
    ArtistMatch,
    First,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub lrclib_url: String,
    pub lrclib_mode: LrcLibMode,
    pub ovh_url: String,
    pub ovh_enabled: bool,
    pub provider_timeout: Duration,
    pub selector: SelectorKind,
    pub library_path: PathBuf,
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            lrclib_url: lrclib::DEFAULT_BASE_URL.to_string(),
            lrclib_mode: LrcLibMode::default(),
            ovh_url: lyrics_ovh::DEFAULT_BASE_URL.to_string(),
            ovh_enabled: true,
            provider_timeout: DEFAULT_PROVIDER_TIMEOUT,
            selector: SelectorKind::default(),
            library_path: default_library_path(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let lrclib_mode = match env("LYRIC_LAND_LRCLIB_MODE") {
            Some(raw) => raw.parse().unwrap_or_else(|err| {
                warn!(%err, "falling back to search mode");
                defaults.lrclib_mode
            }),
            None => defaults.lrclib_mode,
        };

        let provider_timeout = match env("LYRIC_LAND_TIMEOUT_SECS") {
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    warn!(value = %raw, "invalid LYRIC_LAND_TIMEOUT_SECS, using default");
                    defaults.provider_timeout
                }
            },
            None => defaults.provider_timeout,
        };

        let selector = match env("LYRIC_LAND_SELECTOR").as_deref() {
            Some("artist-match") | None => SelectorKind::ArtistMatch,
            Some("first") => SelectorKind::First,
            Some(other) => {
                warn!(value = other, "unknown LYRIC_LAND_SELECTOR, using artist-match");
                SelectorKind::ArtistMatch
            }
        };

        Self {
            lrclib_url: env("LYRIC_LAND_LRCLIB_URL").unwrap_or(defaults.lrclib_url),
            lrclib_mode,
            ovh_url: env("LYRIC_LAND_OVH_URL").unwrap_or(defaults.ovh_url),
            ovh_enabled: !env("LYRIC_LAND_DISABLE_OVH").is_some_and(|v| is_truthy(&v)),
            provider_timeout,
            selector,
            library_path: env("LYRIC_LAND_LIBRARY")
                .map(PathBuf::from)
                .unwrap_or(defaults.library_path),
            log_filter: log_filter_from_env(),
        }
    }
}

/// Readable before `Config::from_env` so its warnings have a subscriber.
pub fn log_filter_from_env() -> String {
    env("LYRIC_LAND_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string())
}

fn env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn is_truthy(value: &str) -> bool {
    matches!(value.to_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

fn default_library_path() -> PathBuf {
    match std::env::var("HOME") {
        Ok(home) => PathBuf::from(home).join(LIBRARY_FILE),
        Err(_) => std::env::temp_dir().join("lyric-land").join("library.json"),
    }
}
