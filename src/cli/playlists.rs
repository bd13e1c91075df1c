use std::path::PathBuf;

use tabled::Table;

use crate::{
    config::{self, MergifyConfig},
    error,
    spotify::SpotifyClient,
    utils, warning,
};

pub async fn list_playlists(token: Option<String>, config_path: Option<PathBuf>) {
    let file_config = match MergifyConfig::load_or_default(config_path.as_deref()).await {
        Ok(c) => c,
        Err(e) => error!("{}", e),
    };
    let merged = file_config.with_overrides(token, Vec::new());
    let token = match merged.require_token() {
        Ok(t) => t.to_string(),
        Err(e) => error!("{}", e),
    };

    let client = SpotifyClient::new(token, config::spotify_apiurl());

    let playlists = match client.get_user_id().await {
        Ok(user_id) => match client.get_playlists(&user_id).await {
            Ok(playlists) => playlists,
            Err(e) => error!("Failed to load playlists. Err: {}", e),
        },
        Err(e) => error!("Failed to load profile. Err: {}", e),
    };

    println!("{}", Table::new(utils::playlist_table_rows(&playlists)));

    for name in utils::unmatched_names(&merged.playlists, &playlists) {
        warning!("Configured playlist '{}' not found", name);
    }
}
