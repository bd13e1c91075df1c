use std::collections::HashMap;

use chrono::Utc;
use log::{debug, info};

use crate::types::{
    AddTracksToPlaylistRequest, AddTracksToPlaylistResponse, CreatePlaylistRequest,
    CreatePlaylistResponse, Playlist,
};

use super::{
    SpotifyClient,
    error::{Result, SpotifyError},
};

/// Spotify accepts at most this many URIs per "add tracks" request.
pub const MAX_BATCH_SIZE: usize = 100;

pub const PLAYLIST_DESCRIPTION: &str = "Created with mergify, merging tracks from several playlists";

impl SpotifyClient {
    /// Retrieves every playlist of `user_id`, following pagination to the last page.
    ///
    /// Spotify returns at most 20 playlists per request by default, so users with
    /// larger libraries need several round trips. Pages are concatenated in the
    /// order they are fetched.
    ///
    /// # Errors
    ///
    /// Any failing page aborts the listing; pages fetched before it are discarded.
    pub async fn get_playlists(&self, user_id: &str) -> Result<Vec<Playlist>> {
        self.paginate(format!("/users/{}/playlists", user_id)).await
    }

    /// Resolves playlist names to IDs.
    ///
    /// The result follows the order of `names`. Names without a matching
    /// playlist are left out without an error. When the user owns several
    /// playlists with the same name, the one listed last by Spotify wins.
    ///
    /// # Example
    ///
    /// ```
    /// // playlists: {id: "1", name: "X"}, {id: "2", name: "Y"}
    /// let ids = client
    ///     .get_playlist_ids_by_name(&user_id, &["Y".into(), "Z".into(), "X".into()])
    ///     .await?;
    /// assert_eq!(ids, vec!["2", "1"]);
    /// ```
    pub async fn get_playlist_ids_by_name(
        &self,
        user_id: &str,
        names: &[String],
    ) -> Result<Vec<String>> {
        let playlists = self.get_playlists(user_id).await?;

        let by_name: HashMap<String, String> = playlists
            .into_iter()
            .map(|playlist| (playlist.name, playlist.id))
            .collect();

        let ids = names
            .iter()
            .filter_map(|name| match by_name.get(name) {
                Some(id) => Some(id.clone()),
                None => {
                    info!("No playlist named '{}' for user {}", name, user_id);
                    None
                }
            })
            .collect();

        Ok(ids)
    }

    /// Creates the merge target playlist for `user_id` and returns its ID.
    ///
    /// The name embeds the current time in milliseconds, e.g.
    /// `Mergify Playlist 1718000000000`, so repeated runs never collide.
    ///
    /// # Errors
    ///
    /// Returns [`SpotifyError::NoTracks`] without touching the network when
    /// `track_ids` is empty.
    pub async fn create_playlist(&self, user_id: &str, track_ids: &[String]) -> Result<String> {
        if track_ids.is_empty() {
            return Err(SpotifyError::NoTracks);
        }

        let request = CreatePlaylistRequest {
            name: format!("Mergify Playlist {}", Utc::now().timestamp_millis()),
            description: PLAYLIST_DESCRIPTION.to_string(),
        };

        let response: CreatePlaylistResponse = self
            .post_json(&format!("/users/{}/playlists", user_id), &request)
            .await?;

        debug!("Created playlist '{}' ({})", request.name, response.id);
        Ok(response.id)
    }

    /// Adds `track_ids` to a playlist in consecutive batches of at most `batch_size`.
    ///
    /// Batches are sent one after another in order and the snapshot ID of the
    /// last batch is returned. `batch_size` is not clamped to
    /// [`MAX_BATCH_SIZE`]; passing a compliant value is up to the caller.
    /// An empty `track_ids` sends nothing and yields an empty snapshot ID.
    ///
    /// # Errors
    ///
    /// The first failing batch aborts the operation. Batches already sent stay
    /// in the playlist.
    pub async fn add_tracks_to_playlist(
        &self,
        playlist_id: &str,
        track_ids: &[String],
        batch_size: usize,
    ) -> Result<String> {
        if batch_size == 0 {
            return Err(SpotifyError::InvalidBatchSize);
        }

        let endpoint = format!("/playlists/{}/tracks", playlist_id);
        let mut snapshot_id = String::new();

        for (index, batch) in track_ids.chunks(batch_size).enumerate() {
            debug!(
                "Adding batch {} ({} tracks) to playlist {}",
                index + 1,
                batch.len(),
                playlist_id
            );
            let response: AddTracksToPlaylistResponse = self
                .post_json(&endpoint, &AddTracksToPlaylistRequest { uris: batch })
                .await?;
            snapshot_id = response.snapshot_id;
        }

        Ok(snapshot_id)
    }
}
