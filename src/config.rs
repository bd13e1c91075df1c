//! Configuration management for the Spotify playlist merger.
//!
//! Two sources feed the application:
//!
//! 1. A JSON config file at `~/.mergify/config.json` holding the bearer token and
//!    the names of the playlists to merge. Command-line flags override its values.
//! 2. Environment variables, optionally loaded from `~/.mergify/.env`, holding the
//!    OAuth client credentials and endpoint URLs used by the local helper server.
//!    Everything except the client credentials has a default.
//!
//! # Example `config.json`
//!
//! ```json
//! {
//!   "token": "BQC...",
//!   "playlists": ["Morning", "Focus", "Evening"]
//! }
//! ```

use std::{
    env,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::spotify::SPOTIFY_API_URL;

pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:3000";
pub const DEFAULT_REDIRECT_URI: &str = "http://localhost:3000/callback";
pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_SCOPE: &str =
    "user-read-email user-read-private playlist-modify-public playlist-modify-private";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{0} is required")]
    Missing(&'static str),
}

/// Values read from `config.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MergifyConfig {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub playlists: Vec<String>,
}

impl MergifyConfig {
    /// Reads and parses the config file at `path`.
    pub async fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = async_fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads the config from an explicit path, or from the default location.
    ///
    /// An explicit path must exist. A missing default file yields an empty
    /// config so the CLI can run on flags alone.
    pub async fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path).await,
            None => {
                let path = config_path();
                if path.is_file() {
                    Self::load(&path).await
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Applies command-line overrides. A flag token replaces the file token and a
    /// non-empty list of flag playlists replaces the file list.
    pub fn with_overrides(mut self, token: Option<String>, playlists: Vec<String>) -> Self {
        if token.is_some() {
            self.token = token;
        }
        if !playlists.is_empty() {
            self.playlists = playlists;
        }
        self
    }

    pub fn require_token(&self) -> Result<&str, ConfigError> {
        match self.token.as_deref() {
            Some(token) if !token.trim().is_empty() => Ok(token),
            _ => Err(ConfigError::Missing("token")),
        }
    }
}

/// OAuth client settings used by the local helper server.
#[derive(Debug, Clone, PartialEq)]
pub struct OAuthSettings {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub scope: String,
    pub auth_url: String,
    pub token_url: String,
}

impl OAuthSettings {
    /// Builds the settings from the environment.
    ///
    /// # Errors
    ///
    /// Fails with [`ConfigError::Missing`] when `SPOTIFY_CLIENT_ID` or
    /// `SPOTIFY_CLIENT_SECRET` is unset or empty.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            client_id: spotify_client_id()?,
            client_secret: spotify_client_secret()?,
            redirect_uri: spotify_redirect_uri(),
            scope: spotify_scope(),
            auth_url: spotify_apiauth_url(),
            token_url: spotify_apitoken_url(),
        })
    }
}

/// Returns the directory holding mergify's files, `~/.mergify`.
///
/// Falls back to `./.mergify` when no home directory can be determined.
pub fn config_dir() -> PathBuf {
    let mut path = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push(".mergify");
    path
}

pub fn config_path() -> PathBuf {
    config_dir().join("config.json")
}

/// Loads environment variables from `~/.mergify/.env` if the file exists.
///
/// Variables already set in the process environment take precedence over the
/// file. A missing file is not an error.
///
/// # Errors
///
/// Returns an error string when the file exists but cannot be parsed.
pub async fn load_env() -> Result<(), String> {
    let path = config_dir().join(".env");
    if !path.is_file() {
        return Ok(());
    }

    dotenv::from_path(&path).map_err(|e| e.to_string())
}

fn var_or(name: &str, default: &str) -> String {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => value,
        _ => default.to_string(),
    }
}

fn required_var(name: &str, label: &'static str) -> Result<String, ConfigError> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::Missing(label)),
    }
}

/// Address the local OAuth helper binds to (`SERVER_ADDRESS`).
pub fn server_addr() -> String {
    var_or("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS)
}

/// Returns the Spotify API client ID (`SPOTIFY_CLIENT_ID`).
pub fn spotify_client_id() -> Result<String, ConfigError> {
    required_var("SPOTIFY_CLIENT_ID", "client_id")
}

/// Returns the Spotify API client secret (`SPOTIFY_CLIENT_SECRET`).
///
/// The secret should never end up in logs or version control.
pub fn spotify_client_secret() -> Result<String, ConfigError> {
    required_var("SPOTIFY_CLIENT_SECRET", "client_secret")
}

/// Returns the OAuth redirect URI (`SPOTIFY_REDIRECT_URI`).
///
/// This must match the redirect URI registered in the Spotify application
/// settings and point at the helper's `/callback` route.
pub fn spotify_redirect_uri() -> String {
    var_or("SPOTIFY_REDIRECT_URI", DEFAULT_REDIRECT_URI)
}

pub fn spotify_scope() -> String {
    var_or("SPOTIFY_SCOPE", DEFAULT_SCOPE)
}

pub fn spotify_apiauth_url() -> String {
    var_or("SPOTIFY_AUTH_URL", DEFAULT_AUTH_URL)
}

/// Returns the Spotify Web API base URL (`SPOTIFY_API_URL`).
pub fn spotify_apiurl() -> String {
    var_or("SPOTIFY_API_URL", SPOTIFY_API_URL)
}

pub fn spotify_apitoken_url() -> String {
    var_or("SPOTIFY_TOKEN_URL", DEFAULT_TOKEN_URL)
}
