//! Threshold-band regime classification with an explicit transition band.

use macrostate_types::{
    BoundaryDetail, Classification, JointRegime, MacroError, RegimeConfig, RegimeLabel,
};

/// Classifies a standardized value into Calm / Normal / Elevated / Stress,
/// reporting TRANSITION when it sits within tolerance of a threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct RegimeClassifier {
    thresholds: [f64; 3],
    tolerance: f64,
}

impl Default for RegimeClassifier {
    fn default() -> Self {
        let cfg = RegimeConfig::default();
        Self {
            thresholds: cfg.thresholds,
            tolerance: cfg.tolerance,
        }
    }
}

impl RegimeClassifier {
    /// Build a classifier from a validated config.
    ///
    /// # Errors
    /// Returns `InvalidConfig` when thresholds are not strictly ascending or
    /// the tolerance is negative.
    pub fn new(cfg: &RegimeConfig) -> Result<Self, MacroError> {
        cfg.validate()?;
        Ok(Self {
            thresholds: cfg.thresholds,
            tolerance: cfg.tolerance,
        })
    }

    /// Band edges.
    #[must_use]
    pub const fn thresholds(&self) -> [f64; 3] {
        self.thresholds
    }

    /// First threshold within tolerance of `v`.
    ///
    /// A few ULPs of slack keep `τ ± tolerance` inside the band despite binary
    /// rounding of the subtraction.
    #[must_use]
    pub fn boundary(&self, v: f64) -> Option<BoundaryDetail> {
        self.thresholds.iter().find_map(|&t| {
            let slack = 4.0 * f64::EPSILON * v.abs().max(t.abs()).max(1.0);
            ((v - t).abs() <= self.tolerance + slack).then_some(BoundaryDetail {
                threshold: t,
                observed: v,
            })
        })
    }

    /// Classify a value; absent or non-finite input is UNAVAILABLE.
    #[must_use]
    pub fn classify(&self, value: Option<f64>) -> Classification {
        let Some(v) = value.filter(|v| v.is_finite()) else {
            return Classification::UNAVAILABLE;
        };
        if let Some(detail) = self.boundary(v) {
            return Classification {
                label: RegimeLabel::Transition,
                is_boundary: true,
                boundary: Some(detail),
            };
        }
        let [t0, t1, t2] = self.thresholds;
        let label = if v < t0 {
            RegimeLabel::Calm
        } else if v <= t1 {
            RegimeLabel::Normal
        } else if v <= t2 {
            RegimeLabel::Elevated
        } else {
            RegimeLabel::Stress
        };
        Classification {
            label,
            is_boundary: false,
            boundary: None,
        }
    }
}

/// Joint label over two inputs (by default equity first, rates second).
#[derive(Debug, Clone, PartialEq)]
pub struct JointClassifier {
    single: RegimeClassifier,
    names: (String, String),
}

impl Default for JointClassifier {
    fn default() -> Self {
        Self {
            single: RegimeClassifier::default(),
            names: RegimeConfig::default().asset_names,
        }
    }
}

impl JointClassifier {
    /// Build a joint classifier; asset names come from `cfg.asset_names`.
    ///
    /// # Errors
    /// Propagates threshold validation errors.
    pub fn new(cfg: &RegimeConfig) -> Result<Self, MacroError> {
        Ok(Self {
            single: RegimeClassifier::new(cfg)?,
            names: cfg.asset_names.clone(),
        })
    }

    /// The per-input classifier.
    #[must_use]
    pub const fn single(&self) -> &RegimeClassifier {
        &self.single
    }

    /// Joint label of `a` and `b`.
    #[must_use]
    pub fn classify(&self, a: Option<f64>, b: Option<f64>) -> JointRegime {
        let (Some(a), Some(b)) = (a.filter(|v| v.is_finite()), b.filter(|v| v.is_finite())) else {
            return JointRegime::Unavailable;
        };
        if self.single.boundary(a).is_some() || self.single.boundary(b).is_some() {
            return JointRegime::Transition;
        }
        let [_, t1, t2] = self.single.thresholds;
        match (a > t2, b > t2) {
            (true, true) => JointRegime::SystemicStress,
            (true, false) => JointRegime::Led(self.names.0.clone()),
            (false, true) => JointRegime::Led(self.names.1.clone()),
            (false, false) if a <= t1 && b <= t1 => JointRegime::BroadCalm,
            (false, false) => JointRegime::Mixed,
        }
    }
}
