use anyhow::{Context, Result};

use crate::config::{Config, SelectorKind};
use crate::lyrics::resolver::LyricsResolver;
use crate::lyrics::select::{ArtistMatchSelector, CandidateSelector, FirstUsableSelector};
use crate::providers::lrclib::LrcLibProvider;
use crate::providers::lyrics_ovh::LyricsOvhProvider;

pub fn create_selector(config: &Config) -> Box<dyn CandidateSelector> {
    match config.selector {
        SelectorKind::ArtistMatch => Box::new(ArtistMatchSelector),
        SelectorKind::First => Box::new(FirstUsableSelector),
    }
}

/// LRCLIB first, then lyrics.ovh unless disabled.
pub fn create_resolver(config: &Config) -> Result<LyricsResolver> {
    let lrclib = LrcLibProvider::new(&config.lrclib_url, config.lrclib_mode, config.provider_timeout)
        .context("failed to build LRCLIB client")?;

    let mut resolver = LyricsResolver::new()
        .with_timeout(config.provider_timeout)
        .with_selector(create_selector(config))
        .with_provider(Box::new(lrclib));

    if config.ovh_enabled {
        let ovh = LyricsOvhProvider::new(&config.ovh_url, config.provider_timeout)
            .context("failed to build lyrics.ovh client")?;
        resolver = resolver.with_provider(Box::new(ovh));
    }

    Ok(resolver)
}
