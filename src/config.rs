#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::{fmt, time::Duration};

use anyhow::{Context, Result};
use typed_builder::TypedBuilder;

use crate::constants::{
    DEFAULT_TIMEOUT_SECS, ENV_COOKIE, ENV_TIMEOUT_SECS, ENV_URL, ENV_USER_AGENT,
};

/// Default user agent sent with every request.
fn default_user_agent() -> String {
    format!("smartschool-results/{}", env!("CARGO_PKG_VERSION"))
}

/// Connection settings for a Smartschool portal.
#[derive(Clone, TypedBuilder)]
#[builder(field_defaults(setter(into)))]
#[builder(doc)]
pub struct Config {
    /// Base URL of the portal.
    base_url:   String,
    /// Raw `Cookie` header of an authenticated session, if any.
    #[builder(default, setter(strip_option))]
    cookie:     Option<String>,
    /// User agent sent with every request.
    #[builder(default = default_user_agent())]
    user_agent: String,
    /// Timeout applied to each request.
    #[builder(default = Duration::from_secs(DEFAULT_TIMEOUT_SECS))]
    timeout:    Duration,
}

impl Config {
    /// Reads the configuration from the process environment.
    ///
    /// `SMARTSCHOOL_URL` is required; the remaining variables fall back to
    /// their defaults when unset or blank.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads the configuration through `get`, which maps a variable name to
    /// its value.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let read = |name: &str| non_blank(get(name));

        let base_url = read(ENV_URL)
            .with_context(|| format!("{ENV_URL} must point at your school's portal"))?;
        let cookie = read(ENV_COOKIE);
        let user_agent = read(ENV_USER_AGENT).unwrap_or_else(default_user_agent);
        let timeout = parse_timeout_secs(read(ENV_TIMEOUT_SECS), DEFAULT_TIMEOUT_SECS);

        Ok(Self {
            base_url: normalize_base_url(&base_url).to_owned(),
            cookie,
            user_agent,
            timeout,
        })
    }

    /// Returns the portal base URL, without surrounding whitespace or
    /// trailing slashes.
    pub fn base_url(&self) -> &str {
        normalize_base_url(&self.base_url)
    }

    /// Returns the configured cookie header, if any.
    pub fn cookie(&self) -> Option<&str> {
        self.cookie.as_deref()
    }

    /// Returns the user agent string.
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Returns the per-request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Joins an absolute endpoint path onto the base URL.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url(), path.trim_start_matches('/'))
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("base_url", &self.base_url)
            .field("cookie", &self.cookie.as_ref().map(|_| "<redacted>"))
            .field("user_agent", &self.user_agent)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Strips surrounding whitespace and trailing slashes from a base URL.
fn normalize_base_url(url: &str) -> &str {
    url.trim().trim_end_matches('/')
}

/// Trims a value, treating blank values as unset.
fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

/// Parses a number of seconds into a `Duration`, falling back to
/// `default_secs` when parsing fails or the value is missing.
fn parse_timeout_secs(value: Option<String>, default_secs: u64) -> Duration {
    value
        .and_then(|value| value.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
        .unwrap_or_else(|| Duration::from_secs(default_secs))
}
