use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};

use crate::{management::SharedSession, spotify, warning};

pub async fn login(State(shared_session): State<SharedSession>) -> Response {
    let mut session = shared_session.lock().await;
    let state = session.begin_login();

    match spotify::auth::authorize_url(session.settings(), &state) {
        Ok(url) => Redirect::to(&url).into_response(),
        Err(e) => {
            warning!("Invalid authorization URL: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Invalid authorization URL").into_response()
        }
    }
}
