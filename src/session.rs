#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use anyhow::{Context, Result};
use reqwest::{
    StatusCode,
    blocking::Client,
    header::{COOKIE, HeaderMap, HeaderValue},
};
use serde::de::DeserializeOwned;

use crate::config::Config;

/// Body of a response returned by a [`Session`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Response {
    /// Raw response body.
    content: Vec<u8>,
}

impl Response {
    /// Wraps a raw response body.
    pub fn new(content: impl Into<Vec<u8>>) -> Self {
        Self {
            content: content.into(),
        }
    }

    /// Returns the raw body.
    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// Returns true when the body is empty.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Decodes the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_slice(&self.content)
    }
}

/// An authenticated connection to the portal.
///
/// `Ok(None)` means the portal answered without a usable response (for HTTP,
/// an error status). Transport failures are reported as `Err`.
pub trait Session {
    /// Performs a GET request for an absolute endpoint path such as
    /// `/results/api/v1/evaluations/123`.
    fn get(&self, path: &str) -> Result<Option<Response>>;
}

impl<S: Session + ?Sized> Session for &S {
    fn get(&self, path: &str) -> Result<Option<Response>> {
        (**self).get(path)
    }
}

/// [`Session`] backed by a blocking reqwest client that replays a configured
/// cookie header.
#[derive(Debug, Clone)]
pub struct HttpSession {
    /// Connection settings.
    config: Config,
    /// Shared HTTP client.
    client: Client,
}

impl HttpSession {
    /// Builds a session for the given configuration.
    pub fn new(config: Config) -> Result<Self> {
        let mut headers = HeaderMap::new();
        if let Some(cookie) = config.cookie() {
            let mut value = HeaderValue::from_str(cookie)
                .context("SMARTSCHOOL_COOKIE is not a valid header value")?;
            value.set_sensitive(true);
            headers.insert(COOKIE, value);
        }

        let client = Client::builder()
            // Avoid macOS dynamic store lookups that fail in sandboxed environments.
            .no_proxy()
            .user_agent(config.user_agent())
            .default_headers(headers)
            .timeout(config.timeout())
            .build()
            .context("Failed to construct HTTP client")?;

        Ok(Self { config, client })
    }

    /// Builds a session from the environment, see [`Config::from_env`].
    pub fn from_env() -> Result<Self> {
        Self::new(Config::from_env()?)
    }

    /// Returns the configuration this session was built with.
    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl Session for HttpSession {
    fn get(&self, path: &str) -> Result<Option<Response>> {
        let url = self.config.url_for(path);
        tracing::debug!("GET {url}");

        let resp = self
            .client
            .get(&url)
            .send()
            .with_context(|| format!("Cannot get url: {url}"))?;

        let status = resp.status();
        let body = resp
            .bytes()
            .with_context(|| format!("Could not read the response body from {url}"))?;

        let response = to_response(status, body.to_vec());
        if response.is_none() {
            tracing::warn!("{url} answered with {status}");
        }
        Ok(response)
    }
}

/// Error statuses carry no usable payload; anything else keeps its body.
fn to_response(status: StatusCode, body: Vec<u8>) -> Option<Response> {
    if status.is_client_error() || status.is_server_error() {
        None
    } else {
        Some(Response::new(body))
    }
}
