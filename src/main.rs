use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use lyric_land::{
    config::{self, Config},
    library::{Library, SavedLibraryEntry},
    logging, provider_factory,
    share::{export_lyrics, video_search_url},
    LyricsResult, SearchMode, SearchOutcome,
};

#[derive(Debug, Parser)]
#[command(name = "lyric-land", version, about = "Find song lyrics and keep the ones you love")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Search for lyrics by track and optional artist.
    Search {
        track: String,
        #[arg(short, long)]
        artist: Option<String>,
        /// Require both track and artist.
        #[arg(long)]
        advanced: bool,
        /// Add the result to the library.
        #[arg(long)]
        save: bool,
        /// Also write the lyrics to a text file in this directory.
        #[arg(long, value_name = "DIR")]
        export: Option<PathBuf>,
    },
    /// List saved lyrics.
    List,
    /// Print saved lyrics.
    Show { track: String, artist: String },
    /// Remove saved lyrics.
    Remove { track: String, artist: String },
    /// Write saved lyrics to a text file.
    Export {
        track: String,
        artist: String,
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },
    /// Print a video search link for a song.
    Listen { track: String, artist: String },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Load .env file if it exists
    dotenv::dotenv().ok();

    // before Config::from_env, which warns about bad values
    logging::init(&config::log_filter_from_env());
    let config = Config::from_env();

    let cli = Cli::parse();

    match cli.command {
        Command::Search {
            track,
            artist,
            advanced,
            save,
            export,
        } => {
            let mode = if advanced {
                SearchMode::Advanced
            } else {
                SearchMode::Simple
            };
            search(&config, &track, artist.as_deref(), mode, save, export).await
        }
        Command::List => {
            let library = Library::load(&config.library_path)?;
            if library.is_empty() {
                println!("Your library is empty.");
            }
            for entry in library.entries() {
                println!("{} - {}", entry.artist, entry.track);
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Show { track, artist } => {
            let library = Library::load(&config.library_path)?;
            match library.find(&track, &artist) {
                Some(entry) => {
                    println!("{}", entry.lyrics);
                    Ok(ExitCode::SUCCESS)
                }
                None => not_saved(&track, &artist),
            }
        }
        Command::Remove { track, artist } => {
            let mut library = Library::load(&config.library_path)?;
            if library.remove(&track, &artist)? {
                println!("Removed \"{track}\" by {artist}.");
                Ok(ExitCode::SUCCESS)
            } else {
                not_saved(&track, &artist)
            }
        }
        Command::Export { track, artist, dir } => {
            let library = Library::load(&config.library_path)?;
            match library.find(&track, &artist) {
                Some(entry) => {
                    let path = export_lyrics(&dir, &LyricsResult::from(entry.clone()))?;
                    println!("Saved to {}", path.display());
                    Ok(ExitCode::SUCCESS)
                }
                None => not_saved(&track, &artist),
            }
        }
        Command::Listen { track, artist } => {
            println!("{}", video_search_url(&track, &artist));
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn search(
    config: &Config,
    track: &str,
    artist: Option<&str>,
    mode: SearchMode,
    save: bool,
    export: Option<PathBuf>,
) -> Result<ExitCode> {
    let resolver = provider_factory::create_resolver(config)?;

    let outcome = tokio::select! {
        outcome = resolver.search(Some(track), artist, mode) => outcome,
        _ = tokio::signal::ctrl_c() => {
            eprintln!("Search cancelled.");
            return Ok(ExitCode::from(130));
        }
    };

    let result = match outcome {
        SearchOutcome::Success(result) => result,
        other => {
            eprintln!("{other}");
            return Ok(ExitCode::FAILURE);
        }
    };

    println!("{}", SearchOutcome::Success(result.clone()));

    if let Some(dir) = export {
        let path = export_lyrics(&dir, &result)?;
        eprintln!("Saved to {}", path.display());
    }

    if save {
        let mut library = Library::load(&config.library_path)
            .context("failed to open library")?;
        let (track, artist) = (result.track.clone(), result.artist.clone());
        if library.add(SavedLibraryEntry::from(result))? {
            eprintln!("Added \"{track}\" by {artist} to your library.");
        } else {
            eprintln!("\"{track}\" by {artist} is already in your library.");
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn not_saved(track: &str, artist: &str) -> Result<ExitCode> {
    eprintln!("\"{track}\" by {artist} is not in your library.");
    Ok(ExitCode::FAILURE)
}
