use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{management::SharedSession, types::TokenResponse};

pub async fn token(State(shared_session): State<SharedSession>) -> Response {
    let session = shared_session.lock().await;
    match session.token() {
        Some(token) => Json(TokenResponse {
            access_token: token.access_token.clone(),
            refresh_token: token.refresh_token.clone(),
        })
        .into_response(),
        None => (StatusCode::FORBIDDEN, "Could not retrieve token").into_response(),
    }
}
