//! Data-quality verdicts.

use serde::{Deserialize, Serialize};

/// Completeness verdict for a metric, a block, or a whole cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DataQuality {
    /// Every required input was present.
    Ok,
    /// Some, but not all, required inputs were present.
    Partial,
    /// No required input was present.
    Failed,
}

impl DataQuality {
    /// Wire label (`"OK"`, `"PARTIAL"`, `"FAILED"`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Partial => "PARTIAL",
            Self::Failed => "FAILED",
        }
    }

    /// Ordinal rank, higher is better: FAILED < PARTIAL < OK.
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::Failed => 0,
            Self::Partial => 1,
            Self::Ok => 2,
        }
    }
}

impl std::fmt::Display for DataQuality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Health summary for a block of envelopes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockHealth {
    /// Rolled-up verdict.
    pub status: DataQuality,
    /// Number of envelopes in FAILED state.
    pub failed: usize,
    /// Number of envelopes in the block.
    pub total: usize,
}
