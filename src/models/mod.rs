use serde::{Deserialize, Serialize};
use std::fmt;

pub const TRACK_REQUIRED: &str = "Track name is required.";
pub const ARTIST_REQUIRED: &str = "Artist name is required for advanced search.";
pub const TRY_AGAIN_LATER: &str =
    "Something went wrong while searching for lyrics. Please try again later.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchMode {
    /// Track only; an empty artist is treated as absent.
    #[default]
    Simple,
    /// Track and artist are both required.
    Advanced,
}

/// Both fields are trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    track: String,
    artist: Option<String>,
}

impl SearchRequest {
    /// Returns the user-facing reason on failure.
    pub fn parse(
        track: Option<&str>,
        artist: Option<&str>,
        mode: SearchMode,
    ) -> Result<Self, String> {
        let track = non_empty(track).ok_or_else(|| TRACK_REQUIRED.to_string())?;
        let artist = non_empty(artist);

        if mode == SearchMode::Advanced && artist.is_none() {
            return Err(ARTIST_REQUIRED.to_string());
        }

        Ok(Self { track, artist })
    }

    pub fn track(&self) -> &str {
        &self.track
    }

    pub fn artist(&self) -> Option<&str> {
        self.artist.as_deref()
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LyricsResult {
    pub track: String,
    pub artist: String,
    pub lyrics: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    Success(LyricsResult),
    NotFound(String),
    InvalidInput(String),
    TransientError(String),
}

impl SearchOutcome {
    pub fn not_found(request: &SearchRequest) -> Self {
        let subject = match request.artist() {
            Some(artist) => format!("\"{}\" by \"{}\"", request.track(), artist),
            None => format!("\"{}\"", request.track()),
        };
        SearchOutcome::NotFound(format!(
            "Sorry, we couldn't find lyrics for {subject}. Please check the spelling or try adding an artist name in the advanced search."
        ))
    }

    pub fn transient() -> Self {
        SearchOutcome::TransientError(TRY_AGAIN_LATER.to_string())
    }

    pub fn is_success(&self) -> bool {
        matches!(self, SearchOutcome::Success(_))
    }

    /// The user-facing message. Successful outcomes carry none.
    pub fn message(&self) -> Option<&str> {
        match self {
            SearchOutcome::Success(_) => None,
            SearchOutcome::NotFound(msg)
            | SearchOutcome::InvalidInput(msg)
            | SearchOutcome::TransientError(msg) => Some(msg),
        }
    }
}

impl fmt::Display for SearchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchOutcome::Success(result) => {
                write!(f, "{} - {}\n\n{}", result.artist, result.track, result.lyrics)
            }
            other => write!(f, "{}", other.message().unwrap_or_default()),
        }
    }
}
