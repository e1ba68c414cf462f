use std::sync::Arc;
use std::time::Duration;

use macrostate_core::MacroError;
use url::Url;

use crate::FredConnector;
use crate::adapter::{FredHttp, RealAdapter};

/// Public FRED API host.
pub const DEFAULT_BASE_URL: &str = "https://api.stlouisfed.org";
/// Public FRED graph host serving keyless CSV downloads.
pub const DEFAULT_GRAPH_BASE_URL: &str = "https://fred.stlouisfed.org";
/// Environment variable consulted when no key is set on the builder.
pub const API_KEY_ENV: &str = "FRED_API_KEY";

/// Builder for [`FredConnector`].
pub struct FredConnectorBuilder {
    api_key: Option<String>,
    base_url: String,
    graph_base_url: String,
    timeout: Duration,
    http: Option<Arc<dyn FredHttp>>,
}

impl Default for FredConnectorBuilder {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            graph_base_url: DEFAULT_GRAPH_BASE_URL.to_string(),
            timeout: Duration::from_secs(10),
            http: None,
        }
    }
}

fn check_url(what: &str, raw: &str) -> Result<String, MacroError> {
    let url = Url::parse(raw).map_err(|e| MacroError::InvalidConfig(format!("{what}: {e}")))?;
    if url.cannot_be_a_base() {
        return Err(MacroError::InvalidConfig(format!("{what}: not a base URL")));
    }
    Ok(raw.trim_end_matches('/').to_string())
}

impl FredConnectorBuilder {
    /// Set the API key explicitly. Takes precedence over `FRED_API_KEY`.
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Override the API host (useful for tests).
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Override the CSV host.
    #[must_use]
    pub fn graph_base_url(mut self, url: impl Into<String>) -> Self {
        self.graph_base_url = url.into();
        self
    }

    /// Per-request client timeout. Default: 10 seconds.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Use a custom transport instead of the `reqwest` client.
    #[must_use]
    pub fn adapter(mut self, http: Arc<dyn FredHttp>) -> Self {
        self.http = Some(http);
        self
    }

    /// Build the connector.
    ///
    /// Without a key from the builder or the environment the connector still
    /// works: FRED rejects the JSON call and the CSV download is used instead.
    ///
    /// # Errors
    /// Returns `InvalidConfig` for unparseable base URLs, or a connector error
    /// if the HTTP client cannot be created.
    pub fn build(self) -> Result<FredConnector, MacroError> {
        let api_key = self
            .api_key
            .or_else(|| std::env::var(API_KEY_ENV).ok())
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());
        let base_url = check_url("base_url", &self.base_url)?;
        let graph_base_url = check_url("graph_base_url", &self.graph_base_url)?;
        let http = match self.http {
            Some(http) => http,
            None => Arc::new(RealAdapter::new(self.timeout)?),
        };
        Ok(FredConnector {
            http,
            api_key,
            base_url,
            graph_base_url,
        })
    }
}
