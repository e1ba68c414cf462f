//! Time-series utilities shared by the engine and the orchestrator.
//!
//! Modules include:
//! - `infer`: observation spacing and high-frequency detection
//! - `util`: alignment helpers for dated value slices
/// Spacing inference and high-frequency detection helpers.
pub mod infer;
/// Alignment and lookup helpers.
pub mod util;
