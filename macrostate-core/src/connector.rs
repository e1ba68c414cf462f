use async_trait::async_trait;

pub use macrostate_types::ProviderKey;
use macrostate_types::{MacroError, RawObservation, SeriesRequest};

/// A source of dated series observations.
///
/// Implementations return raw rows exactly as the upstream delivers them;
/// cleaning happens in [`crate::sanitize`], never inside a provider.
#[async_trait]
pub trait SeriesProvider: Send + Sync {
    /// Human-readable provider name, used as the envelope `source`.
    fn name(&self) -> &'static str;

    /// Typed key used by series routes to select this provider.
    fn key(&self) -> ProviderKey {
        ProviderKey::new(self.name())
    }

    /// Human-readable vendor name (e.g., "Federal Reserve Bank of St. Louis").
    ///
    /// Defaults to the provider name.
    fn vendor(&self) -> &'static str {
        self.name()
    }

    /// Fetch observations for `req.series_id` within the requested window.
    async fn observations(&self, req: &SeriesRequest) -> Result<Vec<RawObservation>, MacroError>;
}
