//! macrostate-fred
//!
//! `SeriesProvider` for the St. Louis Fed FRED service. Observations come from
//! the JSON `series/observations` endpoint; when FRED rejects the request for
//! lack of an API key, the connector downloads the keyless `fredgraph.csv`
//! export for the same window instead.
#![warn(missing_docs)]

/// Transport abstraction and the production `reqwest` adapter.
pub mod adapter;
/// Connector builder.
pub mod builder;
/// JSON and CSV payload decoding.
pub mod parse;

use std::sync::Arc;

use adapter::{FredHttp, HttpReply};
use async_trait::async_trait;
use chrono::NaiveDate;
use macrostate_core::{MacroError, ProviderKey, RawObservation, SeriesProvider, SeriesRequest};
use url::Url;

pub use builder::{API_KEY_ENV, DEFAULT_BASE_URL, DEFAULT_GRAPH_BASE_URL, FredConnectorBuilder};

/// Provider name reported as the envelope `source`.
pub const NAME: &str = "fred_http";

/// FRED connector. Construct with [`FredConnector::builder`] or [`FredConnector::from_env`].
pub struct FredConnector {
    http: Arc<dyn FredHttp>,
    api_key: Option<String>,
    base_url: String,
    graph_base_url: String,
}

impl std::fmt::Debug for FredConnector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FredConnector")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("graph_base_url", &self.graph_base_url)
            .finish_non_exhaustive()
    }
}

fn date_param(d: Option<NaiveDate>) -> Option<String> {
    d.map(|d| d.format("%Y-%m-%d").to_string())
}

fn http_error(what: &str, reply: &HttpReply) -> MacroError {
    MacroError::connector(NAME, format!("{what} {}: {}", reply.status, reply.snippet()))
}

impl FredConnector {
    /// Static provider key for series routes.
    pub const KEY: ProviderKey = ProviderKey::new(NAME);

    /// Returns a builder with public FRED hosts and a 10 second timeout.
    #[must_use]
    pub fn builder() -> FredConnectorBuilder {
        FredConnectorBuilder::default()
    }

    /// Build with defaults, reading the API key from `FRED_API_KEY` when set.
    ///
    /// # Errors
    /// Returns a connector error if the HTTP client cannot be created.
    pub fn from_env() -> Result<Self, MacroError> {
        Self::builder().build()
    }

    /// Whether an API key is configured.
    #[must_use]
    pub const fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    fn observations_url(&self, req: &SeriesRequest) -> Result<Url, MacroError> {
        let mut params = vec![
            ("series_id", req.series_id.clone()),
            ("file_type", "json".to_string()),
        ];
        if let Some(start) = date_param(req.start) {
            params.push(("observation_start", start));
        }
        if let Some(end) = date_param(req.end) {
            params.push(("observation_end", end));
        }
        if let Some(key) = &self.api_key {
            params.push(("api_key", key.clone()));
        }
        let endpoint = format!("{}/fred/series/observations", self.base_url);
        Url::parse_with_params(&endpoint, &params)
            .map_err(|e| MacroError::InvalidArg(format!("observations url: {e}")))
    }

    fn csv_url(&self, req: &SeriesRequest) -> Result<Url, MacroError> {
        let mut params = vec![("id", req.series_id.clone())];
        if let Some(start) = date_param(req.start) {
            params.push(("cosd", start));
        }
        if let Some(end) = date_param(req.end) {
            params.push(("coed", end));
        }
        let endpoint = format!("{}/graph/fredgraph.csv", self.graph_base_url);
        Url::parse_with_params(&endpoint, &params)
            .map_err(|e| MacroError::InvalidArg(format!("csv url: {e}")))
    }

    async fn fetch_csv(&self, req: &SeriesRequest) -> Result<Vec<RawObservation>, MacroError> {
        let reply = self.http.get(self.csv_url(req)?).await?;
        if reply.status != 200 {
            return Err(http_error("FRED CSV", &reply));
        }
        parse::parse_csv(&reply.body)
    }
}

#[async_trait]
impl SeriesProvider for FredConnector {
    fn name(&self) -> &'static str {
        NAME
    }

    fn vendor(&self) -> &'static str {
        "Federal Reserve Bank of St. Louis"
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "macrostate::fred::observations",
            skip(self, req),
            fields(series_id = %req.series_id),
        )
    )]
    async fn observations(&self, req: &SeriesRequest) -> Result<Vec<RawObservation>, MacroError> {
        let reply = self.http.get(self.observations_url(req)?).await?;
        match reply.status {
            200 => parse::parse_json(&reply.body),
            400 if reply.body.contains("api_key") => {
                #[cfg(feature = "tracing")]
                tracing::warn!(
                    series_id = %req.series_id,
                    "FRED rejected the API key; using the CSV export"
                );
                self.fetch_csv(req).await
            }
            _ => Err(http_error("FRED HTTP", &reply)),
        }
    }
}
