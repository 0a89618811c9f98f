use regex::Regex;
use std::sync::LazyLock;

// [MM:SS.ff] or [MM:SS.fff]
static TIMESTAMP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[[0-9]{2}:[0-9]{2}\.[0-9]{2,3}\]").expect("timestamp regex"));

// lyrics.ovh prefixes some results with a French header line
static OVH_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Paroles de la chanson .+\n").expect("header regex"));

/// Remove every LRC timestamp, trim each line and drop lines left empty.
pub fn strip_timestamps(synced: &str) -> String {
    synced
        .lines()
        .map(|line| TIMESTAMP.replace_all(line, ""))
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Remove a leading `Paroles de la chanson ...` header line.
pub fn strip_boilerplate(lyrics: &str) -> String {
    OVH_HEADER.replace(lyrics, "").into_owned()
}

pub fn trim(text: &str) -> String {
    text.trim().to_string()
}

pub fn count_timestamps(text: &str) -> usize {
    TIMESTAMP.find_iter(text).count()
}
