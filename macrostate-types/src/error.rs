use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for the macrostate workspace.
///
/// Upstream failures, argument validation problems, configuration mistakes and
/// the combined failure of a primary/secondary provider chain all land here.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum MacroError {
    /// An individual provider returned an error.
    #[error("{connector} failed: {msg}")]
    Connector {
        /// Provider name that failed.
        connector: String,
        /// Human-readable error message.
        msg: String,
    },

    /// Issues with the returned or expected data (empty payloads, bad shape).
    #[error("data issue: {0}")]
    Data(String),

    /// Invalid input argument.
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// A resource or series could not be found.
    #[error("not found: {what}")]
    NotFound {
        /// Description of the missing resource, e.g. "series DGS10".
        what: String,
    },

    /// A provider call exceeded the configured per-attempt timeout.
    #[error("{connector} failed: timed out fetching {series_id}")]
    ProviderTimeout {
        /// Provider name that timed out.
        connector: String,
        /// Series identifier being fetched.
        series_id: String,
    },

    /// Both the primary and the secondary provider failed.
    ///
    /// The inner errors are usually `Connector` or `ProviderTimeout`, so the
    /// message reads `"<primary> failed: <msg>; <secondary> failed: <msg>"`.
    #[error("{primary}; {secondary}")]
    Fallback {
        /// Failure reported by the primary provider.
        primary: Box<MacroError>,
        /// Failure reported by the secondary provider.
        secondary: Box<MacroError>,
    },

    /// A series specification referenced a provider key that was never registered.
    #[error("unknown provider: {key}")]
    UnknownProvider {
        /// The unresolved provider key.
        key: String,
    },

    /// A configuration struct failed validation.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Filesystem failure while persisting output.
    #[error("io error: {0}")]
    Io(String),

    /// Serialization or deserialization failure.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Unknown/opaque error.
    #[error("unknown error: {0}")]
    Other(String),
}

impl MacroError {
    /// Helper: build a `Connector` error with the provider name and message.
    pub fn connector(connector: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Connector {
            connector: connector.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `NotFound` error for a description of the missing resource.
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }

    /// Helper: build a `ProviderTimeout` error.
    pub fn provider_timeout(connector: impl Into<String>, series_id: impl Into<String>) -> Self {
        Self::ProviderTimeout {
            connector: connector.into(),
            series_id: series_id.into(),
        }
    }

    /// Helper: combine a primary and secondary failure.
    #[must_use]
    pub fn fallback(primary: Self, secondary: Self) -> Self {
        Self::Fallback {
            primary: Box::new(primary),
            secondary: Box::new(secondary),
        }
    }

    /// Returns true if this error should be surfaced to users as actionable.
    ///
    /// A benign not-found is not actionable; a fallback aggregate is actionable
    /// when either side is.
    #[must_use]
    pub fn is_actionable(&self) -> bool {
        match self {
            Self::NotFound { .. } => false,
            Self::Fallback { primary, secondary } => {
                primary.is_actionable() || secondary.is_actionable()
            }
            _ => true,
        }
    }

    /// Flatten nested `Fallback` structures into a plain vector, primary first.
    #[must_use]
    pub fn flatten(self) -> Vec<Self> {
        match self {
            Self::Fallback { primary, secondary } => {
                let mut out = primary.flatten();
                out.extend(secondary.flatten());
                out
            }
            other => vec![other],
        }
    }
}

impl From<std::io::Error> for MacroError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}
