pub mod config;
pub mod library;
pub mod logging;
pub mod lyrics;
pub mod models;
pub mod provider_factory;
pub mod providers;
pub mod share;

pub use lyrics::resolver::LyricsResolver;
pub use models::{LyricsResult, SearchMode, SearchOutcome, SearchRequest};
