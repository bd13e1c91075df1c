use axum::{Router, routing::get};
use std::{net::SocketAddr, str::FromStr};

use crate::{Res, api, management::SharedSession};

pub fn router(session: SharedSession) -> Router {
    Router::new()
        .route("/", get(api::index))
        .route("/login", get(api::login))
        .route("/callback", get(api::callback))
        .route("/api/token", get(api::token))
        .route("/me", get(api::me))
        .route("/users/{user}/playlists", get(api::user_playlists))
        .route("/health", get(api::health))
        .with_state(session)
}

/// Serves the OAuth helper on `addr` until Ctrl-C is pressed.
pub async fn start_api_server(addr: &str, session: SharedSession) -> Res<()> {
    let addr = SocketAddr::from_str(addr)
        .map_err(|e| format!("Failed to parse server address '{}': {}", addr, e))?;

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    log::info!("OAuth helper listening on http://{}", addr);

    axum::serve(listener, router(session))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;
    Ok(())
}
