use axum::{
    extract::State,
    http::{StatusCode, Uri, header},
    response::{IntoResponse, Response},
};

use crate::{management::SharedSession, warning};

pub async fn me(State(shared_session): State<SharedSession>) -> Response {
    forward(&shared_session, "/me").await
}

/// Forwards `/users/{user}/playlists` with its query, so `offset` and `limit`
/// reach Spotify as sent.
pub async fn user_playlists(State(shared_session): State<SharedSession>, uri: Uri) -> Response {
    let endpoint = uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or(uri.path());
    forward(&shared_session, endpoint).await
}

async fn forward(shared_session: &SharedSession, endpoint: &str) -> Response {
    let Some(client) = shared_session.lock().await.client() else {
        return (StatusCode::FORBIDDEN, "Could not retrieve token").into_response();
    };

    match client.forward(endpoint).await {
        Ok(response) => {
            let status =
                StatusCode::from_u16(response.status).unwrap_or(StatusCode::BAD_GATEWAY);
            (
                status,
                [(header::CONTENT_TYPE, "application/json")],
                response.body,
            )
                .into_response()
        }
        Err(e) => {
            warning!("Forwarding {} failed: {}", endpoint, e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}
