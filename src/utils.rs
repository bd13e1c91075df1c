use rand::{Rng, distr::Alphanumeric};

use crate::types::{Playlist, PlaylistTableRow};

const SPOTIFY_OPEN_URL: &str = "https://open.spotify.com";

/// Random value for the OAuth `state` parameter.
pub fn generate_state() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect()
}

/// Link to a playlist in the Spotify web player.
pub fn playlist_url(playlist_id: &str) -> String {
    format!("{}/playlist/{}", SPOTIFY_OPEN_URL, playlist_id)
}

/// Number of batches `total` items are split into with batches of `batch_size`.
pub fn batch_count(total: usize, batch_size: usize) -> usize {
    if batch_size == 0 {
        return 0;
    }
    total.div_ceil(batch_size)
}

pub fn playlist_table_rows(playlists: &[Playlist]) -> Vec<PlaylistTableRow> {
    let mut sorted = playlists.to_vec();
    sorted.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));

    sorted
        .into_iter()
        .map(|p| PlaylistTableRow {
            name: p.name,
            id: p.id,
        })
        .collect()
}

/// Requested names that do not match any of `playlists`, in request order.
pub fn unmatched_names(names: &[String], playlists: &[Playlist]) -> Vec<String> {
    names
        .iter()
        .filter(|name| !playlists.iter().any(|p| &p.name == *name))
        .cloned()
        .collect()
}
