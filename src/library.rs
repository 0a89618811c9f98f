//! Saved lyrics, persisted as a JSON array of `{track, artist, lyrics}`.
//!
//! Entries are unique per exact `(track, artist)` pair. The file is read
//! once on load and rewritten after every change.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::models::LyricsResult;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedLibraryEntry {
    pub track: String,
    pub artist: String,
    pub lyrics: String,
}

impl From<LyricsResult> for SavedLibraryEntry {
    fn from(result: LyricsResult) -> Self {
        Self {
            track: result.track,
            artist: result.artist,
            lyrics: result.lyrics,
        }
    }
}

impl From<SavedLibraryEntry> for LyricsResult {
    fn from(entry: SavedLibraryEntry) -> Self {
        Self {
            track: entry.track,
            artist: entry.artist,
            lyrics: entry.lyrics,
        }
    }
}

pub struct Library {
    path: PathBuf,
    entries: Vec<SavedLibraryEntry>,
}

impl Library {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let entries = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("read {}", path.display()))?;
            serde_json::from_str(&contents).with_context(|| format!("parse {}", path.display()))?
        } else {
            Vec::new()
        };

        debug!(path = %path.display(), "loaded library");
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn entries(&self) -> &[SavedLibraryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn find(&self, track: &str, artist: &str) -> Option<&SavedLibraryEntry> {
        self.entries
            .iter()
            .find(|e| e.track == track && e.artist == artist)
    }

    pub fn contains(&self, track: &str, artist: &str) -> bool {
        self.find(track, artist).is_some()
    }

    /// Returns `false` when the pair is already saved.
    pub fn add(&mut self, entry: SavedLibraryEntry) -> Result<bool> {
        if self.contains(&entry.track, &entry.artist) {
            return Ok(false);
        }
        self.entries.push(entry);
        self.save()?;
        Ok(true)
    }

    /// Returns `false` when nothing matched.
    pub fn remove(&mut self, track: &str, artist: &str) -> Result<bool> {
        let before = self.entries.len();
        self.entries
            .retain(|e| e.track != track || e.artist != artist);

        if self.entries.len() == before {
            return Ok(false);
        }
        self.save()?;
        Ok(true)
    }

    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create dir {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(&self.entries).context("serialize library")?;
        fs::write(&self.path, json).with_context(|| format!("write {}", self.path.display()))?;
        Ok(())
    }
}
