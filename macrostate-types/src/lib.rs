//! Macrostate data transfer objects and configuration primitives.
#![warn(missing_docs)]

mod config;
mod connector;
mod envelope;
mod error;
mod observation;
mod quality;
mod regime;
mod reports;
mod state;

pub use config::{AnchorConfig, IngestConfig, MacrostateConfig, RegimeConfig, TransformConfig};
pub use connector::ProviderKey;
pub use envelope::{DerivedChanges, EnvelopeMeta, IngestionEnvelope, IngestionStatus, SnapshotMeta};
pub use error::MacroError;
pub use observation::{Observation, RawObservation, RawValue, Series, SeriesKind, SeriesRequest};
pub use quality::{BlockHealth, DataQuality};
pub use regime::{BoundaryDetail, Classification, JointRegime, RegimeLabel};
pub use reports::{
    EquityRates, EquityRatesBoundary, FxAsOf, FxVolEntry, FxVolatilityReport,
    SystemHealthReport, VixMove, VolatilityBlockReport, VolatilityRegimeReport,
};
pub use state::{
    CrossAssetTransforms, HistoryMeta, HistoryState, RawState, RawStateMeta, SeriesEntry,
    SeriesTransforms, TransformSeries,
};
