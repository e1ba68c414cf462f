//! Downstream blocks computed from a raw state or a history state.
//!
//! Everything here is synchronous and recomputed on every cycle; nothing is
//! persisted as authoritative state.

/// FX realized-volatility diagnostics.
pub mod fx_volatility;
/// Freshness and completeness of a raw state.
pub mod system_health;
/// Implied-volatility levels and momentum.
pub mod volatility_block;
/// Joint equity/rates volatility regime.
pub mod volatility_regime;

pub use fx_volatility::{FX_VOL_PAIRS, fx_volatility};
pub use system_health::{DEFAULT_BLOCKS, age_human, system_health};
pub use volatility_block::{stress_origin_read, volatility_block};
pub use volatility_regime::volatility_regime;

/// Raw-state category and history key of the equity volatility index.
pub const VIX_KEY: &str = "vix";
/// Raw-state category and history key of the rates volatility index.
pub const MOVE_KEY: &str = "move";
/// Raw-state category holding the volatility indices.
pub const VOLATILITY_CATEGORY: &str = "volatility";
