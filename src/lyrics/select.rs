use super::ProviderCandidate;
use crate::models::SearchRequest;

/// `candidates` is already filtered and in provider relevance order.
pub trait CandidateSelector: Send + Sync {
    fn name(&self) -> &str;

    fn pick<'a>(
        &self,
        request: &SearchRequest,
        candidates: &'a [ProviderCandidate],
    ) -> Option<&'a ProviderCandidate>;
}

/// First row whose track equals the requested track and whose artist
/// contains the requested artist, both case-insensitively. Falls back to
/// the first row when nothing matches or no artist was given.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArtistMatchSelector;

impl CandidateSelector for ArtistMatchSelector {
    fn name(&self) -> &str {
        "artist-match"
    }

    fn pick<'a>(
        &self,
        request: &SearchRequest,
        candidates: &'a [ProviderCandidate],
    ) -> Option<&'a ProviderCandidate> {
        if let Some(artist) = request.artist() {
            let track_lower = request.track().to_lowercase();
            let artist_lower = artist.to_lowercase();

            let matched = candidates.iter().find(|c| {
                c.track_name.trim().to_lowercase() == track_lower
                    && c.artist_name.trim().to_lowercase().contains(&artist_lower)
            });

            if matched.is_some() {
                return matched;
            }
        }

        candidates.first()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FirstUsableSelector;

impl CandidateSelector for FirstUsableSelector {
    fn name(&self) -> &str {
        "first"
    }

    fn pick<'a>(
        &self,
        _request: &SearchRequest,
        candidates: &'a [ProviderCandidate],
    ) -> Option<&'a ProviderCandidate> {
        candidates.first()
    }
}

/// Drop instrumental and text-less rows, then let `selector` choose.
pub fn select_best(
    selector: &dyn CandidateSelector,
    request: &SearchRequest,
    candidates: Vec<ProviderCandidate>,
) -> Option<ProviderCandidate> {
    let usable: Vec<ProviderCandidate> =
        candidates.into_iter().filter(|c| c.is_usable()).collect();
    selector.pick(request, &usable).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SearchMode;

    fn request(track: &str, artist: Option<&str>) -> SearchRequest {
        SearchRequest::parse(Some(track), artist, SearchMode::Simple).unwrap()
    }

    fn row(track: &str, artist: &str, plain: &str) -> ProviderCandidate {
        ProviderCandidate {
            track_name: track.to_string(),
            artist_name: artist.to_string(),
            plain_lyrics: Some(plain.to_string()),
            synced_lyrics: None,
            instrumental: false,
        }
    }

    #[test]
    fn test_prefers_artist_match_over_first() {
        let rows = vec![
            row("Hallelujah", "Pentatonix", "first"),
            row("Hallelujah", "Jeff Buckley", "second"),
        ];
        let picked =
            select_best(&ArtistMatchSelector, &request("hallelujah", Some("jeff buckley")), rows)
                .unwrap();
        assert_eq!(picked.plain_lyrics.as_deref(), Some("second"));
    }

    #[test]
    fn test_artist_match_is_substring() {
        let rows = vec![
            row("Under Pressure", "David Bowie", "a"),
            row("Under Pressure", "Queen & David Bowie", "b"),
        ];
        let picked =
            select_best(&ArtistMatchSelector, &request("Under Pressure", Some("QUEEN")), rows)
                .unwrap();
        assert_eq!(picked.plain_lyrics.as_deref(), Some("b"));
    }

    #[test]
    fn test_track_must_match_exactly() {
        let rows = vec![
            row("Yesterday", "The Beatles", "first"),
            row("Yesterday (Remastered)", "The Beatles", "second"),
        ];
        let picked =
            select_best(&ArtistMatchSelector, &request("Yesterday (Remastered)", Some("beatles")), rows)
                .unwrap();
        assert_eq!(picked.plain_lyrics.as_deref(), Some("second"));
    }

    #[test]
    fn test_candidate_whitespace_ignored() {
        let rows = vec![
            row("Creep", "Cover Band", "cover"),
            row("Creep ", " Radiohead ", "original"),
        ];
        let picked =
            select_best(&ArtistMatchSelector, &request("Creep", Some("Radiohead")), rows).unwrap();
        assert_eq!(picked.plain_lyrics.as_deref(), Some("original"));
    }

    #[test]
    fn test_falls_back_to_first_when_no_match() {
        let rows = vec![
            row("Something Else", "Someone", "first"),
            row("Another", "Other", "second"),
        ];
        let picked =
            select_best(&ArtistMatchSelector, &request("Wanted", Some("Nobody")), rows).unwrap();
        assert_eq!(picked.plain_lyrics.as_deref(), Some("first"));
    }

    #[test]
    fn test_without_artist_takes_first() {
        let rows = vec![row("A", "X", "first"), row("A", "Y", "second")];
        let picked = select_best(&ArtistMatchSelector, &request("A", None), rows).unwrap();
        assert_eq!(picked.plain_lyrics.as_deref(), Some("first"));
    }

    #[test]
    fn test_unusable_rows_are_skipped() {
        let mut instrumental = row("Song", "Band", "instrumental");
        instrumental.instrumental = true;
        let mut empty = row("Song", "Band", "");
        empty.plain_lyrics = None;

        let rows = vec![instrumental, empty, row("Song", "Other Band", "usable")];
        let picked = select_best(&ArtistMatchSelector, &request("Song", Some("Band")), rows).unwrap();
        assert_eq!(picked.plain_lyrics.as_deref(), Some("usable"));
    }

    #[test]
    fn test_only_instrumentals_yield_none() {
        let mut a = row("Song", "Band", "x");
        a.instrumental = true;
        let mut b = row("Song", "Band", "y");
        b.instrumental = true;
        assert!(select_best(&ArtistMatchSelector, &request("Song", None), vec![a, b]).is_none());
        assert!(select_best(&ArtistMatchSelector, &request("Song", None), vec![]).is_none());
    }

    #[test]
    fn test_first_selector_ignores_artist() {
        let rows = vec![row("Song", "Wrong", "first"), row("Song", "Right", "second")];
        let picked = select_best(&FirstUsableSelector, &request("Song", Some("Right")), rows).unwrap();
        assert_eq!(picked.plain_lyrics.as_deref(), Some("first"));
    }
}
