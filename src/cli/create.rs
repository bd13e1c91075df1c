use std::{path::PathBuf, time::Duration};

use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    config::{self, MergifyConfig},
    error, info,
    spotify::{self, MAX_BATCH_SIZE, SpotifyClient},
    success, utils, warning,
};

#[derive(Debug, Clone)]
pub struct CreateOptions {
    pub token: Option<String>,
    pub playlists: Vec<String>,
    pub batch_size: usize,
    pub config: Option<PathBuf>,
    pub from_helper: bool,
}

/// Result of a successful merge.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeOutcome {
    pub playlist_id: String,
    pub snapshot_id: String,
    pub source_playlists: usize,
    pub tracks: usize,
}

pub async fn create(opts: CreateOptions) {
    let file_config = match MergifyConfig::load_or_default(opts.config.as_deref()).await {
        Ok(c) => c,
        Err(e) => error!("{}", e),
    };

    let mut token = opts.token;
    if token.is_none() && opts.from_helper {
        match spotify::auth::token_from_helper(&config::server_addr()).await {
            Ok(t) => token = Some(t.access_token),
            Err(e) => error!(
                "Failed to fetch token from helper. Run mergify auth first.\n Error: {}",
                e
            ),
        }
    }

    let merged = file_config.with_overrides(token, opts.playlists);
    let token = match merged.require_token() {
        Ok(t) => t.to_string(),
        Err(e) => error!("{}", e),
    };
    if merged.playlists.is_empty() {
        error!("playlists are required");
    }
    if opts.batch_size > MAX_BATCH_SIZE {
        warning!(
            "Batch size {} exceeds the Spotify limit of {} tracks per request",
            opts.batch_size,
            MAX_BATCH_SIZE
        );
    }

    let client = SpotifyClient::new(token, config::spotify_apiurl());

    match merge_playlists(&client, &merged.playlists, opts.batch_size).await {
        Ok(outcome) => success!(
            "Merged {} tracks from {} playlists: {}",
            outcome.tracks,
            outcome.source_playlists,
            utils::playlist_url(&outcome.playlist_id)
        ),
        Err(e) => error!("{}", e),
    }
}

/// Runs the whole merge pipeline: resolve user, resolve playlists, collect
/// tracks, create the target playlist and fill it.
pub async fn merge_playlists(
    client: &SpotifyClient,
    names: &[String],
    batch_size: usize,
) -> spotify::Result<MergeOutcome> {
    let user_id = client.get_user_id().await?;

    info!("Resolving {} playlists for {}", names.len(), user_id);
    let playlist_ids = client.get_playlist_ids_by_name(&user_id, names).await?;
    if playlist_ids.len() < names.len() {
        warning!(
            "{} of {} requested playlists were not found",
            names.len() - playlist_ids.len(),
            names.len()
        );
    }

    let pb = ProgressBar::new_spinner();
    pb.set_message("Collecting tracks...");
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    let track_ids = client.get_playlist_track_ids(&playlist_ids).await;
    pb.finish_and_clear();
    let track_ids = track_ids?;
    success!(
        "Collected {} unique tracks from {} playlists",
        track_ids.len(),
        playlist_ids.len()
    );

    let playlist_id = client.create_playlist(&user_id, &track_ids).await?;
    info!(
        "Adding tracks in {} batches",
        utils::batch_count(track_ids.len(), batch_size)
    );
    let snapshot_id = client
        .add_tracks_to_playlist(&playlist_id, &track_ids, batch_size)
        .await?;

    Ok(MergeOutcome {
        playlist_id,
        snapshot_id,
        source_playlists: playlist_ids.len(),
        tracks: track_ids.len(),
    })
}
