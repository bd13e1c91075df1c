mod common;

use std::sync::atomic::{AtomicUsize, Ordering};

use common::*;
use mergify::{
    spotify::{Method, SpotifyError, next_endpoint},
    types::{Playlist, PlaylistTrack, Track},
};

fn playlist(id: &str, name: &str) -> Playlist {
    Playlist {
        id: id.to_string(),
        name: name.to_string(),
    }
}

fn entry(uri: &str) -> PlaylistTrack {
    PlaylistTrack {
        track: Some(Track {
            uri: uri.to_string(),
        }),
    }
}

#[tokio::test]
async fn test_get_user_id() {
    let transport = ScriptedTransport::sequence(vec![respond(200, r#"{"id": "user123"}"#)]);

    let user_id = client(&transport).get_user_id().await.unwrap();

    assert_eq!(user_id, "user123");

    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, Method::Get);
    assert_eq!(requests[0].url, url("/me"));
    assert_eq!(requests[0].header("authorization"), Some("Bearer mockToken"));
    assert!(requests[0].body.is_none());
}

#[tokio::test]
async fn test_get_user_id_malformed_body() {
    // Valid JSON, but not a profile object
    let transport = ScriptedTransport::sequence(vec![respond(200, "0")]);

    let err = client(&transport).get_user_id().await.unwrap_err();

    assert!(matches!(err, SpotifyError::Deserialization(_)), "{err:?}");
}

#[tokio::test]
async fn test_transport_failure_is_not_a_status_error() {
    let transport = ScriptedTransport::new(|_| {
        Err(SpotifyError::Transport("connection refused".into()))
    });

    let err = client(&transport).get_user_id().await.unwrap_err();

    assert!(matches!(err, SpotifyError::Transport(_)), "{err:?}");
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn test_read_failure_is_propagated() {
    let transport =
        ScriptedTransport::new(|_| Err(SpotifyError::Read("connection reset".into())));

    let err = client(&transport).get_user_id().await.unwrap_err();

    assert!(matches!(err, SpotifyError::Read(_)), "{err:?}");
}

#[tokio::test]
async fn test_get_returning_404_is_unexpected_status() {
    let transport = ScriptedTransport::sequence(vec![respond(404, r#"{"error": "not found"}"#)]);

    let err = client(&transport).get_user_id().await.unwrap_err();

    match err {
        SpotifyError::UnexpectedStatus {
            method,
            endpoint,
            status,
        } => {
            assert_eq!(method, Method::Get);
            assert_eq!(endpoint, "/me");
            assert_eq!(status, 404);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_forward_returns_any_status_with_body() {
    let transport = ScriptedTransport::sequence(vec![respond(404, r#"{"error": "not found"}"#)]);

    let response = client(&transport)
        .forward("/users/ghost/playlists?limit=5")
        .await
        .unwrap();

    assert_eq!(response.status, 404);
    assert_eq!(response.body, br#"{"error": "not found"}"#.to_vec());

    let requests = transport.requests();
    assert_eq!(requests[0].method, Method::Get);
    assert_eq!(requests[0].url, url("/users/ghost/playlists?limit=5"));
    assert_eq!(requests[0].header("authorization"), Some("Bearer mockToken"));
}

#[tokio::test]
async fn test_get_returning_other_success_code_is_rejected() {
    let transport = ScriptedTransport::sequence(vec![respond(204, "")]);

    let err = client(&transport).get_user_id().await.unwrap_err();

    assert_eq!(err.status(), Some(204));
}

#[tokio::test]
async fn test_post_returning_200_is_unexpected_status() {
    let transport = ScriptedTransport::sequence(vec![respond(200, r#"{"id": "new"}"#)]);

    let err = client(&transport)
        .create_playlist("user", &strings(&["spotify:track:1"]))
        .await
        .unwrap_err();

    match err {
        SpotifyError::UnexpectedStatus { method, status, .. } => {
            assert_eq!(method, Method::Post);
            assert_eq!(status, 200);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_get_playlists() {
    let transport = ScriptedTransport::sequence(vec![respond(
        200,
        r#"{"items": [{"id": "123", "name": "foo"}, {"id": "456", "name": "bar"}], "next": null}"#,
    )]);

    let playlists = client(&transport).get_playlists("user").await.unwrap();

    assert_eq!(playlists, vec![playlist("123", "foo"), playlist("456", "bar")]);
    assert_eq!(transport.urls(), vec![url("/users/user/playlists")]);
}

#[tokio::test]
async fn test_get_playlists_follows_pagination() {
    let transport = ScriptedTransport::new(|request| {
        if request.url == url("/users/user/playlists") {
            return respond(
                200,
                r#"{"items": [{"id": "123", "name": "foo"}, {"id": "456", "name": "bar"}],
                    "next": "https://api.spotify.com/v1/users/user/playlists?offset=20&limit=20"}"#,
            );
        }
        respond(200, r#"{"items": [{"id": "789", "name": "baz"}], "next": null}"#)
    });

    let playlists = client(&transport).get_playlists("user").await.unwrap();

    assert_eq!(
        playlists,
        vec![
            playlist("123", "foo"),
            playlist("456", "bar"),
            playlist("789", "baz")
        ]
    );
    // The cursor host differs from the base URL, only path and query are reused
    assert_eq!(
        transport.urls(),
        vec![
            url("/users/user/playlists"),
            url("/users/user/playlists?offset=20&limit=20"),
        ]
    );
}

#[tokio::test]
async fn test_get_playlists_missing_next_field_ends_pagination() {
    let transport =
        ScriptedTransport::sequence(vec![respond(200, r#"{"items": [{"id": "1", "name": "X"}]}"#)]);

    let playlists = client(&transport).get_playlists("user").await.unwrap();

    assert_eq!(playlists, vec![playlist("1", "X")]);
}

#[tokio::test]
async fn test_get_tracks_from_playlist_concatenates_pages_in_order() {
    let transport = ScriptedTransport::sequence(vec![
        respond(
            200,
            r#"{"items": [{"track": {"uri": "123"}}, {"track": {"uri": "456"}}],
                "next": "https://api.spotify.com/v1/playlists/mockPlaylistID/tracks?offset=2"}"#,
        ),
        respond(
            200,
            r#"{"items": [{"track": {"uri": "111"}}],
                "next": "https://api.spotify.com/v1/playlists/mockPlaylistID/tracks?offset=3"}"#,
        ),
        respond(200, r#"{"items": [{"track": {"uri": "222"}}], "next": null}"#),
    ]);

    let tracks = client(&transport)
        .get_tracks_from_playlist("mockPlaylistID")
        .await
        .unwrap();

    assert_eq!(
        tracks,
        vec![entry("123"), entry("456"), entry("111"), entry("222")]
    );
    assert_eq!(
        transport.urls(),
        vec![
            url("/playlists/mockPlaylistID/tracks"),
            url("/playlists/mockPlaylistID/tracks?offset=2"),
            url("/playlists/mockPlaylistID/tracks?offset=3"),
        ]
    );
}

#[tokio::test]
async fn test_pagination_failure_discards_collected_pages() {
    let transport = ScriptedTransport::sequence(vec![
        respond(
            200,
            r#"{"items": [{"track": {"uri": "123"}}],
                "next": "https://api.spotify.com/v1/playlists/p/tracks?offset=1"}"#,
        ),
        respond(500, ""),
    ]);

    let err = client(&transport)
        .get_tracks_from_playlist("p")
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(500));
}

#[tokio::test]
async fn test_invalid_cursor_aborts_pagination() {
    let transport = ScriptedTransport::sequence(vec![respond(
        200,
        r#"{"items": [], "next": "not a url"}"#,
    )]);

    let err = client(&transport).get_playlists("user").await.unwrap_err();

    assert!(matches!(err, SpotifyError::InvalidCursor { .. }), "{err:?}");
}

#[tokio::test]
async fn test_get_playlist_ids_by_name_follows_requested_order() {
    let transport = ScriptedTransport::sequence(vec![respond(
        200,
        r#"{"items": [{"id": "1", "name": "X"}, {"id": "2", "name": "Y"}], "next": null}"#,
    )]);

    let ids = client(&transport)
        .get_playlist_ids_by_name("user", &strings(&["Y", "Z", "X"]))
        .await
        .unwrap();

    // Z does not exist and is silently dropped
    assert_eq!(ids, strings(&["2", "1"]));
}

#[tokio::test]
async fn test_get_playlist_ids_by_name_last_duplicate_wins() {
    let transport = ScriptedTransport::sequence(vec![
        respond(
            200,
            r#"{"items": [{"id": "first", "name": "Mix"}],
                "next": "https://api.spotify.com/v1/users/user/playlists?offset=1"}"#,
        ),
        respond(200, r#"{"items": [{"id": "second", "name": "Mix"}], "next": null}"#),
    ]);

    let ids = client(&transport)
        .get_playlist_ids_by_name("user", &strings(&["Mix"]))
        .await
        .unwrap();

    assert_eq!(ids, strings(&["second"]));
}

#[tokio::test]
async fn test_get_playlist_ids_by_name_without_matches() {
    let transport = ScriptedTransport::sequence(vec![respond(200, r#"{"items": [], "next": null}"#)]);

    let ids = client(&transport)
        .get_playlist_ids_by_name("user", &strings(&["Nope"]))
        .await
        .unwrap();

    assert!(ids.is_empty());
}

#[tokio::test]
async fn test_get_playlist_track_ids_omits_duplicates() {
    let transport = ScriptedTransport::new(|request| {
        if request.url == url("/playlists/A/tracks") {
            return respond(
                200,
                r#"{"items": [{"track": {"uri": "u1"}}, {"track": {"uri": "u2"}}], "next": null}"#,
            );
        }
        respond(
            200,
            r#"{"items": [{"track": {"uri": "u2"}}, {"track": {"uri": "u3"}}], "next": null}"#,
        )
    });

    let uris = client(&transport)
        .get_playlist_track_ids(&strings(&["A", "B"]))
        .await
        .unwrap();

    assert_eq!(uris, strings(&["u1", "u2", "u3"]));
    assert_eq!(
        transport.urls(),
        vec![url("/playlists/A/tracks"), url("/playlists/B/tracks")]
    );
}

#[tokio::test]
async fn test_get_playlist_track_ids_within_one_playlist() {
    let transport = ScriptedTransport::new(|_| {
        respond(
            200,
            r#"{"items": [{"track": {"uri": "123"}}, {"track": {"uri": "456"}}, {"track": {"uri": "456"}}], "next": null}"#,
        )
    });

    let uris = client(&transport)
        .get_playlist_track_ids(&strings(&["playListId1", "playListId2"]))
        .await
        .unwrap();

    assert_eq!(uris, strings(&["123", "456"]));
}

#[tokio::test]
async fn test_get_playlist_track_ids_skips_unavailable_tracks() {
    let transport = ScriptedTransport::sequence(vec![respond(
        200,
        r#"{"items": [{"track": null}, {"track": {"uri": "u1"}}], "next": null}"#,
    )]);

    let uris = client(&transport)
        .get_playlist_track_ids(&strings(&["A"]))
        .await
        .unwrap();

    assert_eq!(uris, strings(&["u1"]));
}

#[tokio::test]
async fn test_create_playlist() {
    let transport = ScriptedTransport::sequence(vec![respond(201, r#"{"id": "new123"}"#)]);

    let playlist_id = client(&transport)
        .create_playlist("user", &strings(&["spotify:track:1"]))
        .await
        .unwrap();

    assert_eq!(playlist_id, "new123");

    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, Method::Post);
    assert_eq!(requests[0].url, url("/users/user/playlists"));
    assert_eq!(requests[0].header("content-type"), Some("application/json"));

    let body = body_json(&requests[0]);
    let name = body["name"].as_str().unwrap();
    let millis = name.strip_prefix("Mergify Playlist ").unwrap();
    assert!(millis.parse::<i64>().is_ok(), "{name}");
    assert_eq!(
        body["description"].as_str(),
        Some(mergify::spotify::PLAYLIST_DESCRIPTION)
    );
}

#[tokio::test]
async fn test_create_playlist_without_tracks_makes_no_request() {
    let transport = ScriptedTransport::sequence(vec![]);

    let err = client(&transport)
        .create_playlist("user", &[])
        .await
        .unwrap_err();

    assert!(matches!(err, SpotifyError::NoTracks), "{err:?}");
    assert!(transport.requests().is_empty());
}

#[tokio::test]
async fn test_add_tracks_to_playlist_in_batches() {
    let counter = AtomicUsize::new(0);
    let transport = ScriptedTransport::new(move |_| {
        let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
        respond(201, &format!(r#"{{"snapshot_id": "snapshot{n}"}}"#))
    });

    let tracks = strings(&["t1", "t2", "t3", "t4", "t5"]);
    let snapshot = client(&transport)
        .add_tracks_to_playlist("mockPlaylistID", &tracks, 2)
        .await
        .unwrap();

    // Only the snapshot of the last batch is kept
    assert_eq!(snapshot, "snapshot3");

    let requests = transport.requests();
    assert_eq!(requests.len(), 3, "unexpected number of batches");
    for request in &requests {
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.url, url("/playlists/mockPlaylistID/tracks"));
    }

    let bodies: Vec<serde_json::Value> = requests.iter().map(body_json).collect();
    assert_eq!(
        bodies,
        vec![
            serde_json::json!({"uris": ["t1", "t2"]}),
            serde_json::json!({"uris": ["t3", "t4"]}),
            serde_json::json!({"uris": ["t5"]}),
        ]
    );
}

#[tokio::test]
async fn test_add_tracks_to_playlist_stops_at_failing_batch() {
    let transport = ScriptedTransport::sequence(vec![
        respond(201, r#"{"snapshot_id": "s1"}"#),
        respond(500, ""),
    ]);

    let tracks = strings(&["t1", "t2", "t3", "t4", "t5"]);
    let err = client(&transport)
        .add_tracks_to_playlist("p", &tracks, 2)
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(500));
    // the third batch is never sent
    assert_eq!(transport.requests().len(), 2);
}

#[tokio::test]
async fn test_add_tracks_to_playlist_does_not_clamp_batch_size() {
    let transport = ScriptedTransport::sequence(vec![respond(201, r#"{"snapshot_id": "s1"}"#)]);

    let tracks: Vec<String> = (0..150).map(|i| format!("t{i}")).collect();
    client(&transport)
        .add_tracks_to_playlist("p", &tracks, 200)
        .await
        .unwrap();

    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(body_json(&requests[0])["uris"].as_array().unwrap().len(), 150);
}

#[tokio::test]
async fn test_add_tracks_to_playlist_rejects_zero_batch_size() {
    let transport = ScriptedTransport::sequence(vec![]);

    let err = client(&transport)
        .add_tracks_to_playlist("p", &strings(&["t1"]), 0)
        .await
        .unwrap_err();

    assert!(matches!(err, SpotifyError::InvalidBatchSize), "{err:?}");
    assert!(transport.requests().is_empty());
}

#[test]
fn test_next_endpoint_strips_api_prefix() {
    let endpoint = next_endpoint(
        "https://api.spotify.com/v1",
        "https://api.spotify.com/v1/users/joe/playlists?offset=20&limit=20",
    )
    .unwrap();

    assert_eq!(endpoint, "/users/joe/playlists?offset=20&limit=20");
}

#[test]
fn test_next_endpoint_ignores_scheme_and_host() {
    let endpoint = next_endpoint(
        "http://localhost:3000/v1",
        "https://api.spotify.com/v1/playlists/p/tracks?offset=100",
    )
    .unwrap();

    assert_eq!(endpoint, "/playlists/p/tracks?offset=100");
}

#[test]
fn test_next_endpoint_with_base_without_path() {
    let endpoint = next_endpoint(
        "http://localhost:3000",
        "http://localhost:3000/users/joe/playlists",
    )
    .unwrap();

    assert_eq!(endpoint, "/users/joe/playlists");
}

#[test]
fn test_next_endpoint_keeps_paths_outside_base() {
    let endpoint = next_endpoint(
        "https://api.spotify.com/v1",
        "https://api.spotify.com/v10/users/joe/playlists",
    )
    .unwrap();

    assert_eq!(endpoint, "/v10/users/joe/playlists");
}

#[test]
fn test_next_endpoint_rejects_relative_cursor() {
    let err = next_endpoint("https://api.spotify.com/v1", "/users/joe/playlists").unwrap_err();

    assert!(matches!(err, SpotifyError::InvalidCursor { .. }), "{err:?}");
}
