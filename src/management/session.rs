use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{
    config::OAuthSettings,
    spotify::{SPOTIFY_API_URL, SpotifyClient},
    types::Token,
    utils,
};

/// Session state shared by the helper server's handlers.
pub type SharedSession = Arc<Mutex<AuthSession>>;

/// Everything the local OAuth helper remembers between requests: the client
/// settings, the `state` of the login in flight and the token once obtained.
#[derive(Debug, Clone)]
pub struct AuthSession {
    settings: OAuthSettings,
    api_url: String,
    pending_state: Option<String>,
    token: Option<Token>,
}

impl AuthSession {
    pub fn new(settings: OAuthSettings) -> Self {
        Self {
            settings,
            api_url: SPOTIFY_API_URL.to_string(),
            pending_state: None,
            token: None,
        }
    }

    /// Sets the Spotify API base URL the `/me` and playlist routes forward to.
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    pub fn shared(settings: OAuthSettings) -> SharedSession {
        Self::new(settings).into_shared()
    }

    pub fn into_shared(self) -> SharedSession {
        Arc::new(Mutex::new(self))
    }

    pub fn settings(&self) -> &OAuthSettings {
        &self.settings
    }

    /// Starts a login and returns the random `state` to send to Spotify.
    ///
    /// A new login replaces any login still in flight.
    pub fn begin_login(&mut self) -> String {
        let state = utils::generate_state();
        self.pending_state = Some(state.clone());
        state
    }

    /// Consumes the pending `state` if `state` matches it.
    pub fn accept_state(&mut self, state: Option<&str>) -> bool {
        match (self.pending_state.as_deref(), state) {
            (Some(expected), Some(received)) if expected == received => {
                self.pending_state = None;
                true
            }
            _ => false,
        }
    }

    pub fn store_token(&mut self, token: Token) {
        self.token = Some(token);
    }

    pub fn token(&self) -> Option<&Token> {
        self.token.as_ref()
    }

    /// Client authenticated with the obtained token, `None` before login.
    pub fn client(&self) -> Option<SpotifyClient> {
        self.token
            .as_ref()
            .map(|token| SpotifyClient::new(token.access_token.clone(), self.api_url.clone()))
    }
}
