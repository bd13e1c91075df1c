//! # Spotify Integration Module
//!
//! This module provides the interface to the Spotify Web API that mergify needs:
//! read the current user's profile, read their playlists, read the tracks of
//! those playlists, create a playlist and add tracks to it. It also holds the
//! two OAuth calls the local helper server makes.
//!
//! ## Architecture
//!
//! ```text
//! CLI (create, playlists)          Helper server (/login, /callback)
//!          ↓                                   ↓
//!     SpotifyClient                       auth::exchange_code
//!     ├── user      GET  /me
//!     ├── playlist  GET  /users/{id}/playlists (paginated)
//!     │             POST /users/{id}/playlists
//!     │             POST /playlists/{id}/tracks (batched)
//!     └── tracks    GET  /playlists/{id}/tracks (paginated)
//!          ↓
//!     request primitive → Transport (reqwest in production)
//!          ↓
//! Spotify Web API
//! ```
//!
//! ## Request Contract
//!
//! Every call goes through [`SpotifyClient::request`]:
//! - The URL is the client's base URL followed by a relative endpoint.
//! - The bearer token is attached as the `Authorization` header.
//! - A GET must answer `200 OK` and a POST `201 Created`. Any other status,
//!   even another success code, fails with [`SpotifyError::UnexpectedStatus`].
//! - Exactly one HTTP call is made. There are no retries and no caching.
//!
//! ## Pagination
//!
//! Listing endpoints return `{items, next}` pages. The client follows `next`
//! until it is absent and concatenates the items in fetch order. The `next`
//! URL is parsed and only its path and query are reused (see [`next_endpoint`]),
//! so the cursor does not have to match the base URL string exactly.
//!
//! ## Error Types
//!
//! - [`SpotifyError::Transport`] - the request never got a response
//! - [`SpotifyError::Read`] - the response body could not be read
//! - [`SpotifyError::UnexpectedStatus`] - status outside the GET/200, POST/201 contract
//! - [`SpotifyError::Deserialization`] - body does not have the expected shape
//! - [`SpotifyError::NoTracks`] - playlist creation without tracks
//!
//! ## Concurrency
//!
//! All calls are issued sequentially. Nothing runs in the background and the
//! client holds no mutable state, so a single instance can be shared by reference.
//!
//! ## Usage
//!
//! ```rust
//! let client = SpotifyClient::new(token, SPOTIFY_API_URL);
//! let user_id = client.get_user_id().await?;
//! let playlist_ids = client.get_playlist_ids_by_name(&user_id, &names).await?;
//! let track_ids = client.get_playlist_track_ids(&playlist_ids).await?;
//! let playlist_id = client.create_playlist(&user_id, &track_ids).await?;
//! let snapshot_id = client.add_tracks_to_playlist(&playlist_id, &track_ids, 100).await?;
//! ```

pub mod auth;
mod client;
mod error;
mod playlist;
mod tracks;
mod transport;
mod user;

pub use client::{SPOTIFY_API_URL, SpotifyClient, next_endpoint};
pub use error::{Result, SpotifyError};
pub use playlist::{MAX_BATCH_SIZE, PLAYLIST_DESCRIPTION};
pub use transport::{HttpRequest, HttpResponse, Method, ReqwestTransport, Transport};
