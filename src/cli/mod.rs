//! # CLI Module
//!
//! This module provides the command-line interface layer for mergify. It
//! implements the user-facing commands and wires configuration, the local OAuth
//! helper and the Spotify client together.
//!
//! ## Commands
//!
//! ### Authentication
//!
//! - [`auth`] - Runs the local OAuth helper and prints the obtained bearer token
//!
//! ### Playlist Operations
//!
//! - [`create`] - Merges the configured playlists into a new playlist
//! - [`list_playlists`] - Shows the user's playlists and flags configured names
//!   that do not exist
//!
//! ## Merge Pipeline
//!
//! ```text
//! token + names (config.json / flags)
//!     ↓
//! get_user_id → get_playlist_ids_by_name → get_playlist_track_ids
//!     ↓
//! create_playlist → add_tracks_to_playlist (batches of 100)
//!     ↓
//! https://open.spotify.com/playlist/{id}
//! ```
//!
//! Every step runs after the previous one finished. The first failure is
//! printed and ends the process with exit code 1.
//!
//! ## Usage Patterns
//!
//! ```bash
//! mergify auth                                   # Obtain a token in the browser
//! mergify create                                 # Merge playlists from config.json
//! mergify create --playlist Focus --playlist Chill --token BQC...
//! mergify create --from-helper                   # Use the token of a running helper
//! mergify playlists                              # List your playlists
//! ```

mod auth;
mod create;
mod playlists;

pub use auth::auth;
pub use auth::wait_for_token;
pub use create::CreateOptions;
pub use create::MergeOutcome;
pub use create::create;
pub use create::merge_playlists;
pub use playlists::list_playlists;
