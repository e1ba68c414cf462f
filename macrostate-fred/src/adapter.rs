#[cfg(feature = "test-adapters")]
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use macrostate_core::MacroError;
use url::Url;

use crate::NAME;

/// Status code and body of one HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    /// HTTP status code.
    pub status: u16,
    /// Response body decoded as text.
    pub body: String,
}

impl HttpReply {
    /// Build a reply from parts.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// First 200 characters of the body, for error messages.
    #[must_use]
    pub fn snippet(&self) -> String {
        self.body.chars().take(200).collect()
    }
}

/// Transport abstraction (so we can inject fakes in tests).
///
/// Only transport failures are errors here; non-200 statuses come back as
/// replies and are interpreted by the connector.
#[async_trait]
pub trait FredHttp: Send + Sync {
    /// Issue a GET request for `url`.
    async fn get(&self, url: Url) -> Result<HttpReply, MacroError>;
}

/// Production transport backed by `reqwest`.
#[derive(Clone, Debug)]
pub struct RealAdapter {
    client: reqwest::Client,
}

impl RealAdapter {
    /// Build a client with the given request timeout.
    ///
    /// # Errors
    /// Returns a connector error if the TLS backend cannot be initialized.
    pub fn new(timeout: Duration) -> Result<Self, MacroError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| MacroError::connector(NAME, format!("http client: {e}")))?;
        Ok(Self { client })
    }

    /// Wrap an existing `reqwest::Client`.
    #[must_use]
    pub const fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

fn map_reqwest_err(e: &reqwest::Error) -> MacroError {
    if e.is_timeout() {
        MacroError::connector(NAME, "request timed out")
    } else if e.is_connect() {
        MacroError::connector(NAME, format!("connection failed: {e}"))
    } else {
        MacroError::connector(NAME, e.to_string())
    }
}

#[async_trait]
impl FredHttp for RealAdapter {
    async fn get(&self, url: Url) -> Result<HttpReply, MacroError> {
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| map_reqwest_err(&e))?;
        let status = resp.status().as_u16();
        let body = resp.text().await.map_err(|e| map_reqwest_err(&e))?;
        Ok(HttpReply { status, body })
    }
}

#[cfg(feature = "test-adapters")]
impl dyn FredHttp {
    /// Test helper that builds a transport from a closure over the full request URL.
    pub fn from_fn<F>(f: F) -> Arc<dyn FredHttp>
    where
        F: Send + Sync + 'static + Fn(Url) -> Result<HttpReply, MacroError>,
    {
        struct FnHttp<F>(F);
        #[async_trait]
        impl<F> FredHttp for FnHttp<F>
        where
            F: Send + Sync + 'static + Fn(Url) -> Result<HttpReply, MacroError>,
        {
            async fn get(&self, url: Url) -> Result<HttpReply, MacroError> {
                (self.0)(url)
            }
        }
        Arc::new(FnHttp(f))
    }
}
