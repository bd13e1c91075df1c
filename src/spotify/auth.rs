use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;
use url::Url;

use crate::{
    config::OAuthSettings,
    types::{Token, TokenResponse},
};

#[derive(Debug, Deserialize)]
struct TokenExchangeResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    scope: Option<String>,
    #[serde(default)]
    expires_in: Option<u64>,
}

/// Builds the Spotify authorization URL the user is redirected to from `/login`.
///
/// `state` is echoed back by Spotify on the callback and must be checked there.
pub fn authorize_url(settings: &OAuthSettings, state: &str) -> Result<String, url::ParseError> {
    let mut url = Url::parse(&settings.auth_url)?;
    url.query_pairs_mut()
        .append_pair("client_id", &settings.client_id)
        .append_pair("response_type", "code")
        .append_pair("redirect_uri", &settings.redirect_uri)
        .append_pair("scope", &settings.scope)
        .append_pair("state", state);
    Ok(url.into())
}

/// Exchanges an authorization code for an access token.
///
/// Completes the authorization-code flow: the code received on `/callback` is
/// posted to the token endpoint together with the redirect URI, authenticated
/// with the client credentials over HTTP Basic auth.
///
/// # Errors
///
/// Network failures, non-2xx answers (an invalid or already used code) and
/// malformed token payloads are all reported as `reqwest::Error`.
///
/// # Example
///
/// ```
/// let token = exchange_code(&settings, "AQA...auth_code").await?;
/// println!("Access token: {}", token.access_token);
/// ```
pub async fn exchange_code(settings: &OAuthSettings, code: &str) -> Result<Token, reqwest::Error> {
    let client = Client::new();
    let res = client
        .post(&settings.token_url)
        .basic_auth(&settings.client_id, Some(&settings.client_secret))
        .form(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", settings.redirect_uri.as_str()),
        ])
        .send()
        .await?
        .error_for_status()?;

    let json = res.json::<TokenExchangeResponse>().await?;

    Ok(Token {
        access_token: json.access_token,
        refresh_token: json.refresh_token.unwrap_or_default(),
        scope: json.scope.unwrap_or_default(),
        expires_in: json.expires_in.unwrap_or(3600),
        obtained_at: Utc::now().timestamp() as u64,
    })
}

/// Asks a running helper server for the token it obtained.
///
/// `server_addr` is the helper's bind address, e.g. `127.0.0.1:3000`.
pub async fn token_from_helper(server_addr: &str) -> Result<TokenResponse, reqwest::Error> {
    Client::new()
        .get(format!("http://{}/api/token", server_addr))
        .send()
        .await?
        .error_for_status()?
        .json::<TokenResponse>()
        .await
}
