use std::collections::HashSet;

use log::debug;

use crate::types::PlaylistTrack;

use super::{SpotifyClient, error::Result};

impl SpotifyClient {
    /// Retrieves every entry of a playlist's track listing.
    ///
    /// Spotify pages the listing, so this follows the `next` cursor until the
    /// last page, exactly like [`get_playlists`](SpotifyClient::get_playlists).
    pub async fn get_tracks_from_playlist(&self, playlist_id: &str) -> Result<Vec<PlaylistTrack>> {
        self.paginate(format!("/playlists/{}/tracks", playlist_id))
            .await
    }

    /// Collects the track URIs of several playlists without duplicates.
    ///
    /// Playlists are read in the given order and each URI is kept at its first
    /// occurrence only. Entries whose track is no longer available are skipped.
    pub async fn get_playlist_track_ids(&self, playlist_ids: &[String]) -> Result<Vec<String>> {
        let mut seen = HashSet::new();
        let mut uris = Vec::new();

        for playlist_id in playlist_ids {
            let entries = self.get_tracks_from_playlist(playlist_id).await?;

            for entry in entries {
                let Some(track) = entry.track else {
                    debug!("Skipping unavailable track in playlist {}", playlist_id);
                    continue;
                };
                if seen.insert(track.uri.clone()) {
                    uris.push(track.uri);
                }
            }
        }

        Ok(uris)
    }
}
