//! Regime labels produced by the classifiers.

use serde::{Deserialize, Serialize};

/// Single-input regime band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RegimeLabel {
    /// Below the lowest threshold.
    Calm,
    /// Between the lowest and middle thresholds.
    Normal,
    /// Between the middle and highest thresholds.
    Elevated,
    /// Above the highest threshold.
    Stress,
    /// Within tolerance of a threshold.
    #[serde(rename = "TRANSITION")]
    Transition,
    /// No input value.
    #[serde(rename = "UNAVAILABLE")]
    Unavailable,
}

impl RegimeLabel {
    /// Wire label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Calm => "Calm",
            Self::Normal => "Normal",
            Self::Elevated => "Elevated",
            Self::Stress => "Stress",
            Self::Transition => "TRANSITION",
            Self::Unavailable => "UNAVAILABLE",
        }
    }
}

impl std::fmt::Display for RegimeLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which threshold a boundary value sat on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundaryDetail {
    /// The threshold within tolerance of the value.
    pub threshold: f64,
    /// The observed value.
    pub observed: f64,
}

/// Result of classifying one value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    /// Regime band.
    pub label: RegimeLabel,
    /// True when the value sat within tolerance of a threshold.
    pub is_boundary: bool,
    /// Boundary detail, present exactly when `is_boundary`.
    pub boundary: Option<BoundaryDetail>,
}

impl Classification {
    /// The classification of an absent input.
    pub const UNAVAILABLE: Self = Self {
        label: RegimeLabel::Unavailable,
        is_boundary: false,
        boundary: None,
    };
}

/// Joint label over two inputs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum JointRegime {
    /// At least one input absent.
    Unavailable,
    /// At least one input on a boundary.
    Transition,
    /// Both inputs in stress.
    SystemicStress,
    /// Exactly one input in stress; carries that input's asset name.
    Led(String),
    /// Both inputs at or below the middle threshold.
    BroadCalm,
    /// Anything else.
    Mixed,
}

impl std::fmt::Display for JointRegime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable => f.write_str("UNAVAILABLE"),
            Self::Transition => f.write_str("TRANSITION"),
            Self::SystemicStress => f.write_str("Systemic stress"),
            Self::Led(asset) => write!(f, "{asset}-led stress"),
            Self::BroadCalm => f.write_str("Broad calm"),
            Self::Mixed => f.write_str("Mixed"),
        }
    }
}

impl From<JointRegime> for String {
    fn from(j: JointRegime) -> Self {
        j.to_string()
    }
}

impl TryFrom<String> for JointRegime {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.as_str() {
            "UNAVAILABLE" => Ok(Self::Unavailable),
            "TRANSITION" => Ok(Self::Transition),
            "Systemic stress" => Ok(Self::SystemicStress),
            "Broad calm" => Ok(Self::BroadCalm),
            "Mixed" => Ok(Self::Mixed),
            other => other
                .strip_suffix("-led stress")
                .filter(|asset| !asset.is_empty())
                .map(|asset| Self::Led(asset.to_string()))
                .ok_or_else(|| format!("unknown joint regime: {other}")),
        }
    }
}
