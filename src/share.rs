use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use urlencoding::encode;

use crate::models::LyricsResult;

const VIDEO_SEARCH_URL: &str = "https://www.youtube.com/results?search_query=";

pub fn download_filename(track: &str, artist: &str) -> String {
    let name = format!("{track} by ({artist})Lyrics.txt");
    name.chars()
        .map(|c| match c {
            '/' | '\\' | '\0' => '_',
            c => c,
        })
        .collect()
}

/// Write the lyrics into `dir` and return the file's path.
pub fn export_lyrics(dir: &Path, result: &LyricsResult) -> Result<PathBuf> {
    fs::create_dir_all(dir).with_context(|| format!("create dir {}", dir.display()))?;
    let path = dir.join(download_filename(&result.track, &result.artist));
    fs::write(&path, &result.lyrics).with_context(|| format!("write {}", path.display()))?;
    Ok(path)
}

pub fn video_search_url(track: &str, artist: &str) -> String {
    format!("{VIDEO_SEARCH_URL}{}", encode(&format!("{track} by {artist}")))
}
