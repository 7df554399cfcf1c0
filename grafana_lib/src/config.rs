//! Client configuration: base URL, auth strategy, and request defaults.

use crate::auth::Auth;
use crate::error::Error;
use crate::helpers::{resolve_auth, AuthSource};
use reqwest::header::{HeaderName, HeaderValue};
use std::time::Duration;
use url::Url;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Settings shared read-only by every call made through one client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    base_url: Url,
    auth: Auth,
    org_id: Option<i64>,
    headers: Vec<(String, String)>,
    timeout: Duration,
    user_agent: String,
}

impl ClientConfig {
    /// Validate `base_url` (must be an absolute `http`/`https` URL). A path
    /// prefix such as `https://host/grafana` is kept and prepended to every
    /// request path.
    pub fn new(base_url: &str) -> Result<Self, Error> {
        let base_url = Url::parse(base_url.trim())
            .map_err(|e| Error::Config(format!("invalid base URL {:?}: {}", base_url, e)))?;
        if !matches!(base_url.scheme(), "http" | "https") || base_url.cannot_be_a_base() {
            return Err(Error::Config(format!(
                "base URL must be http(s), got {:?}",
                base_url.as_str()
            )));
        }
        Ok(Self {
            base_url,
            auth: Auth::None,
            org_id: None,
            headers: Vec::new(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: format!("grafana-lib/{}", crate::VERSION),
        })
    }

    /// Load from the process environment; see [`ClientConfig::from_lookup`].
    pub fn from_env() -> Result<(Self, AuthSource), Error> {
        Self::from_lookup(&|key: &str| std::env::var(key).ok())
    }

    /// Load from `GRAFANA_URL` (required), `GRAFANA_ORG_ID`,
    /// `GRAFANA_TIMEOUT_SECS`, and credentials via
    /// [`resolve_auth`](crate::helpers::resolve_auth).
    pub fn from_lookup(
        lookup: &dyn Fn(&str) -> Option<String>,
    ) -> Result<(Self, AuthSource), Error> {
        let url = lookup("GRAFANA_URL")
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| Error::Config("GRAFANA_URL is not set".to_string()))?;
        let mut config = Self::new(&url)?;

        if let Some(raw) = lookup("GRAFANA_ORG_ID").filter(|s| !s.trim().is_empty()) {
            let org_id = raw
                .trim()
                .parse::<i64>()
                .map_err(|_| Error::Config(format!("GRAFANA_ORG_ID is not an integer: {}", raw)))?;
            config = config.with_org_id(org_id);
        }
        if let Some(raw) = lookup("GRAFANA_TIMEOUT_SECS").filter(|s| !s.trim().is_empty()) {
            let secs = raw.trim().parse::<u64>().map_err(|_| {
                Error::Config(format!("GRAFANA_TIMEOUT_SECS is not a number: {}", raw))
            })?;
            config = config.with_timeout(Duration::from_secs(secs));
        }

        let (auth, source) = resolve_auth(lookup);
        Ok((config.with_auth(auth), source))
    }

    pub fn with_auth(mut self, auth: Auth) -> Self {
        self.auth = auth;
        self
    }

    /// Send `X-Grafana-Org-Id` with every request.
    pub fn with_org_id(mut self, org_id: i64) -> Self {
        self.org_id = Some(org_id);
        self
    }

    /// Extra header sent with every request.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Per-request timeout for the default transport.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn auth(&self) -> &Auth {
        &self.auth
    }

    pub fn org_id(&self) -> Option<i64> {
        self.org_id
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Every header this config adds to a request must be valid on the wire.
    /// Values are never echoed in the error since they may hold credentials.
    pub(crate) fn check_headers(&self) -> Result<(), Error> {
        check_header("User-Agent", &self.user_agent)?;
        if let Some(value) = self.auth.header_value() {
            check_header("Authorization", &value)?;
        }
        for (name, value) in &self.headers {
            check_header(name, value)?;
        }
        Ok(())
    }
}

fn check_header(name: &str, value: &str) -> Result<(), Error> {
    HeaderName::from_bytes(name.as_bytes())
        .map_err(|_| Error::Config(format!("invalid header name {:?}", name)))?;
    HeaderValue::from_str(value)
        .map_err(|_| Error::Config(format!("invalid value for header {}", name)))?;
    Ok(())
}
