//! macrostate-core
//!
//! Synchronous, stateless building blocks shared across the macrostate
//! ecosystem.
//!
//! - `connector`: the async `SeriesProvider` trait implemented by data sources.
//! - `sanitize`: the single place raw provider values become finite numbers.
//! - `anchor` / `snapshot` / `derive`: calendar anchors, snapshot sets and the
//!   deltas derived from them.
//! - `transforms`: rolling mean / std / z-score / ROC / realized volatility.
//! - `regime`: threshold-band classification with a TRANSITION band.
//! - `quality`: OK / PARTIAL / FAILED aggregation rules.
//! - `json`: NaN-safe, key-sorted JSON output.
//!
//! Only `connector` touches async; everything else is plain functions over
//! slices and configuration structs.
#![warn(missing_docs)]

/// Calendar-anchor selection.
pub mod anchor;
/// The `SeriesProvider` trait.
pub mod connector;
/// Derived deltas.
pub mod derive;
/// NaN-safe JSON output.
pub mod json;
/// Data-quality aggregation.
pub mod quality;
/// Regime classification.
pub mod regime;
/// Value sanitization.
pub mod sanitize;
/// Snapshot resolution.
pub mod snapshot;
/// Time-series inference and alignment helpers.
pub mod timeseries;
/// Rolling transform engine.
pub mod transforms;

pub use anchor::{select_anchor, select_anchor_within, select_prior};
pub use connector::SeriesProvider;
pub use derive::{derive_changes, pct_change, snapshot_meta};
pub use json::{sanitize_json, to_json_pretty, write_json};
pub use quality::{block_health, envelope_quality, metric_quality, quality_from_flags, rollup};
pub use regime::{JointClassifier, RegimeClassifier};
pub use sanitize::{clean_observations, parse_date, sanitize_f64, sanitize_raw, sanitize_values};
pub use snapshot::{SnapshotSet, anchor_window_start, select_snapshots};
pub use timeseries::infer::{is_high_frequency, median_spacing_days};
pub use timeseries::util::latest_value;
pub use transforms::{compute_transforms, cross_asset_transforms};

pub use macrostate_types::*;
