//! # API Module
//!
//! HTTP endpoints of the local OAuth helper. The helper runs the Spotify
//! authorization-code flow in the user's browser and hands the resulting bearer
//! token to the CLI.
//!
//! ## Endpoints
//!
//! ### Authentication
//!
//! - [`index`] - Landing page with a "Login to Spotify" link.
//! - [`login`] - Generates a `state` value and redirects to Spotify's consent page.
//! - [`callback`] - Receives the authorization code, checks `state`, exchanges the
//!   code for a token and shows the token with a copy button.
//! - [`token`] - Returns the obtained token as JSON, or 403 before login.
//!
//! ### Spotify Passthrough
//!
//! - [`me`] - The profile of the logged in user.
//! - [`user_playlists`] - A page of a user's playlists, query string included.
//!
//! Both forward to the Spotify API with the obtained token and answer with
//! Spotify's status and body unchanged, or 403 before login.
//!
//! ### Monitoring
//!
//! - [`health`] - Status and version information.
//!
//! ## State
//!
//! All handlers share one [`AuthSession`](crate::management::AuthSession) passed
//! as router state, see [`crate::server::router`].
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use mergify::{config::OAuthSettings, management::AuthSession, server};
//!
//! let session = AuthSession::shared(OAuthSettings::from_env()?);
//! let app = server::router(session);
//! ```

mod callback;
mod health;
mod index;
mod login;
mod proxy;
mod token;

pub use callback::callback;
pub use health::health;
pub use index::index;
pub use login::login;
pub use proxy::{me, user_playlists};
pub use token::token;
