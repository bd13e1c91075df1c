use std::sync::Arc;

use log::debug;
use serde::{Serialize, de::DeserializeOwned};
use url::Url;

use crate::types::Page;

use super::{
    error::{Result, SpotifyError},
    transport::{HttpRequest, HttpResponse, Method, ReqwestTransport, Transport},
};

/// Base URL of the Spotify Web API.
pub const SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";

/// Authenticated client for the handful of Spotify Web API endpoints mergify needs.
///
/// The client owns the bearer token and the transport. Both are fixed at
/// construction time; every operation issues its requests one after another
/// over the same transport.
///
/// # Example
///
/// ```
/// let client = SpotifyClient::new(token, SPOTIFY_API_URL);
/// let user_id = client.get_user_id().await?;
/// ```
pub struct SpotifyClient {
    token: String,
    base_url: String,
    transport: Arc<dyn Transport>,
}

impl SpotifyClient {
    /// Creates a client talking to `base_url` over reqwest.
    pub fn new(token: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self::with_transport(token, base_url, Arc::new(ReqwestTransport::new()))
    }

    /// Creates a client sending its requests through `transport`.
    pub fn with_transport(
        token: impl Into<String>,
        base_url: impl Into<String>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            token: token.into(),
            base_url,
            transport,
        }
    }

    /// Sends one request to `base_url + endpoint` and returns the raw body.
    ///
    /// The bearer token goes into the `Authorization` header of every call. A
    /// GET must answer 200 and a POST must answer 201; anything else, including
    /// other 2xx codes, is reported as [`SpotifyError::UnexpectedStatus`].
    pub async fn request(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<Vec<u8>>,
    ) -> Result<Vec<u8>> {
        let response = self.send(method, endpoint, body).await?;

        if response.status != method.expected_status().as_u16() {
            return Err(SpotifyError::UnexpectedStatus {
                method,
                endpoint: endpoint.to_string(),
                status: response.status,
            });
        }

        Ok(response.body)
    }

    /// Sends an authenticated GET and hands back the response whatever its status.
    pub async fn forward(&self, endpoint: &str) -> Result<HttpResponse> {
        self.send(Method::Get, endpoint, None).await
    }

    async fn send(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<Vec<u8>>,
    ) -> Result<HttpResponse> {
        let mut headers = vec![(
            "Authorization".to_string(),
            format!("Bearer {}", self.token),
        )];
        if body.is_some() {
            headers.push(("Content-Type".to_string(), "application/json".to_string()));
        }

        let request = HttpRequest {
            method,
            url: format!("{}{}", self.base_url, endpoint),
            headers,
            body,
        };

        let response = self.transport.send(request).await?;
        debug!("{} {} -> {}", method, endpoint, response.status);
        Ok(response)
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        let body = self.request(Method::Get, endpoint, None).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    pub(crate) async fn post_json<B, T>(&self, endpoint: &str, payload: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = self
            .request(Method::Post, endpoint, Some(serde_json::to_vec(payload)?))
            .await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Follows `next` cursors from `endpoint` until the last page and returns
    /// the items of all pages in fetch order.
    ///
    /// There is no page cap. A failing page aborts the whole collection.
    pub(crate) async fn paginate<T: DeserializeOwned>(&self, endpoint: String) -> Result<Vec<T>> {
        let mut items = Vec::new();
        let mut endpoint = endpoint;

        loop {
            let page: Page<T> = self.get_json(&endpoint).await?;
            debug!("{} returned {} items", endpoint, page.items.len());
            items.extend(page.items);

            match page.next {
                Some(next) => endpoint = next_endpoint(&self.base_url, &next)?,
                None => break,
            }
        }

        Ok(items)
    }
}

/// Turns the absolute `next` URL of a page into an endpoint relative to `base_url`.
///
/// Only the path and query of `next` are used, so the scheme and host may differ
/// from the base. The path of the base (`/v1`) is removed when `next` starts with it.
///
/// # Example
///
/// ```
/// let endpoint = next_endpoint(
///     "https://api.spotify.com/v1",
///     "https://api.spotify.com/v1/users/joe/playlists?offset=20&limit=20",
/// )?;
/// assert_eq!(endpoint, "/users/joe/playlists?offset=20&limit=20");
/// ```
pub fn next_endpoint(base_url: &str, next: &str) -> Result<String> {
    let cursor = Url::parse(next).map_err(|source| SpotifyError::InvalidCursor {
        cursor: next.to_string(),
        source,
    })?;
    let base_path = Url::parse(base_url)
        .map(|base| base.path().trim_end_matches('/').to_string())
        .unwrap_or_default();

    let path = cursor.path();
    let relative = match path.strip_prefix(base_path.as_str()) {
        Some(rest) if rest.starts_with('/') => rest,
        _ => path,
    };

    let mut endpoint = relative.to_string();
    if let Some(query) = cursor.query() {
        endpoint.push('?');
        endpoint.push_str(query);
    }
    Ok(endpoint)
}
