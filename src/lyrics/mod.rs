pub mod parser;
pub mod resolver;
pub mod select;

use serde::{Deserialize, Serialize};

use crate::models::LyricsResult;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderCandidate {
    #[serde(rename = "trackName", default)]
    pub track_name: String,
    #[serde(rename = "artistName", default)]
    pub artist_name: String,
    #[serde(rename = "plainLyrics", default)]
    pub plain_lyrics: Option<String>,
    #[serde(rename = "syncedLyrics", default)]
    pub synced_lyrics: Option<String>,
    #[serde(default)]
    pub instrumental: bool,
}

impl ProviderCandidate {
    /// Best text for this candidate: plain lyrics verbatim (trimmed) when
    /// present, otherwise the synced lyrics with timestamps stripped.
    pub fn lyrics_text(&self) -> Option<String> {
        if self.instrumental {
            return None;
        }

        if let Some(plain) = self.plain_lyrics.as_deref().map(parser::trim) {
            if !plain.is_empty() {
                return Some(plain);
            }
        }

        self.synced_lyrics
            .as_deref()
            .map(parser::strip_timestamps)
            .filter(|text| !text.is_empty())
    }

    pub fn is_usable(&self) -> bool {
        self.lyrics_text().is_some()
    }

    pub fn into_result(self) -> Option<LyricsResult> {
        let lyrics = self.lyrics_text()?;
        Some(LyricsResult {
            track: self.track_name,
            artist: self.artist_name,
            lyrics,
        })
    }
}
