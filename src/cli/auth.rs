use std::{sync::Arc, time::Duration};

use crate::{
    config::{self, OAuthSettings},
    error, info,
    management::{AuthSession, SharedSession},
    server::start_api_server,
    success,
    types::Token,
    warning,
};

const TOKEN_TIMEOUT: Duration = Duration::from_secs(120);

/// Runs the local OAuth helper.
///
/// Starts the helper server, opens its `/login` page in the browser and waits
/// for the callback to deliver a token. The token is printed once obtained and
/// the server keeps serving it on `/api/token` until Ctrl-C.
pub async fn auth() {
    let settings = match OAuthSettings::from_env() {
        Ok(s) => s,
        Err(e) => error!("{}", e),
    };

    let addr = config::server_addr();
    let session = AuthSession::new(settings)
        .with_api_url(config::spotify_apiurl())
        .into_shared();

    let server_session = Arc::clone(&session);
    let server_addr = addr.clone();
    let mut server =
        tokio::spawn(async move { start_api_server(&server_addr, server_session).await });

    let login_url = format!("http://{}/login", addr);
    if webbrowser::open(&login_url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            login_url
        )
    }

    let token = tokio::select! {
        token = wait_for_token(Arc::clone(&session), TOKEN_TIMEOUT) => token,
        result = &mut server => match result {
            Ok(Ok(())) => return,
            Ok(Err(e)) => error!("Helper server failed: {}", e),
            Err(e) => error!("Helper server task failed: {}", e),
        },
    };

    match token {
        Some(t) => {
            success!("Authentication successful!");
            info!("Access token: {}", t.access_token);
            info!(
                "Serving the token on http://{}/api/token. Press Ctrl-C to stop.",
                addr
            );
        }
        None => error!("Authentication failed or timed out."),
    }

    match server.await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => error!("Helper server failed: {}", e),
        Err(e) => error!("Helper server task failed: {}", e),
    }
}

/// Polls the session once a second until a token arrives or `max_wait` elapses.
pub async fn wait_for_token(session: SharedSession, max_wait: Duration) -> Option<Token> {
    use std::time::Instant;

    let start = Instant::now();

    while start.elapsed() < max_wait {
        if let Some(token) = session.lock().await.token().cloned() {
            return Some(token);
        }
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    None
}
