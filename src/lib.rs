//! Spotify Playlist Merger CLI Library
//!
//! This library provides functionality for merging the tracks of several Spotify
//! playlists into one freshly created playlist. It includes the Spotify Web API
//! client, a small local OAuth helper server that obtains a bearer token, the
//! CLI operations built on top of both, and configuration handling.
//!
//! # Modules
//!
//! - `api` - HTTP endpoints of the local OAuth helper
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration file and environment handling
//! - `management` - Session state owned by the OAuth helper
//! - `server` - Router and listener for the OAuth helper
//! - `spotify` - Spotify Web API client implementation
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use mergify::spotify::{SPOTIFY_API_URL, SpotifyClient};
//!
//! #[tokio::main]
//! async fn main() -> mergify::Res<()> {
//!     let client = SpotifyClient::new("BQC...", SPOTIFY_API_URL);
//!     let user_id = client.get_user_id().await?;
//!     let ids = client.get_playlist_ids_by_name(&user_id, &["Chill".to_string()]).await?;
//!     let tracks = client.get_playlist_track_ids(&ids).await?;
//!     let playlist_id = client.create_playlist(&user_id, &tracks).await?;
//!     client.add_tracks_to_playlist(&playlist_id, &tracks, 100).await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod management;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

/// A convenient Result type alias for application level operations that may fail.
///
/// The Spotify client itself reports the typed [`spotify::SpotifyError`]; the CLI
/// and configuration layers collapse everything into a boxed error that keeps
/// Send + Sync bounds for async contexts.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// The macro accepts the same arguments as `println!`.
///
/// # Example
///
/// ```
/// info!("Resolving {} playlists...", names.len());
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Added {} tracks", count);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Terminates the process with exit code 1 right after printing, so it is only
/// used for failures the CLI cannot recover from.
///
/// # Example
///
/// ```
/// error!("token is required");
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// # Example
///
/// ```
/// warning!("Playlist '{}' not found, skipping", name);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
