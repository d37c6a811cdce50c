use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::GeometryParameters;
use crate::models::aero::AerodynamicMetrics;

/// Guard added to every reciprocal score's denominator.
const RECIPROCAL_GUARD: f64 = 1e-9;

/// Lift coefficient below which `min_CD_maintain_CL` applies its penalty.
const MAINTAIN_CL_THRESHOLD: f64 = 1.2;

/// What the optimizer is trying to improve.
///
/// Every objective maps to a higher-is-better score; "minimize" objectives
/// score the reciprocal of the quantity they minimize.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Objective {
    /// Maximize lift-to-drag ratio.
    #[default]
    #[serde(rename = "maximize_L_over_D", alias = "max_LD")]
    MaximizeLiftToDrag,

    /// Maximize lift coefficient.
    #[serde(rename = "max_CL")]
    MaxLift,

    /// Maximize lift coefficient for a takeoff configuration.
    #[serde(rename = "takeoff")]
    Takeoff,

    /// Minimize total drag.
    #[serde(rename = "min_CD")]
    MinDrag,

    /// Minimize total drag while holding `CL ≥ 1.2`.
    #[serde(rename = "min_CD_maintain_CL")]
    MinDragMaintainLift,

    /// Maximize span efficiency.
    #[serde(rename = "max_e")]
    MaxSpanEfficiency,

    /// Minimize induced drag.
    #[serde(rename = "min_CDi")]
    MinInducedDrag,

    /// Minimize an estimate of the root bending moment.
    #[serde(rename = "min_M_root")]
    MinRootMoment,
}

/// Error returned when parsing an unrecognized objective token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown objective token {token:?}")]
pub struct ObjectiveError {
    pub token: String,
}

impl Objective {
    pub const ALL: [Self; 8] = [
        Self::MaximizeLiftToDrag,
        Self::MaxLift,
        Self::Takeoff,
        Self::MinDrag,
        Self::MinDragMaintainLift,
        Self::MaxSpanEfficiency,
        Self::MinInducedDrag,
        Self::MinRootMoment,
    ];

    /// The canonical token for this objective.
    #[must_use]
    pub fn token(self) -> &'static str {
        match self {
            Self::MaximizeLiftToDrag => "maximize_L_over_D",
            Self::MaxLift => "max_CL",
            Self::Takeoff => "takeoff",
            Self::MinDrag => "min_CD",
            Self::MinDragMaintainLift => "min_CD_maintain_CL",
            Self::MaxSpanEfficiency => "max_e",
            Self::MinInducedDrag => "min_CDi",
            Self::MinRootMoment => "min_M_root",
        }
    }

    /// Scores a candidate; higher is better.
    ///
    /// The result may be non-finite for pathological metrics; the optimizer
    /// replaces such scores with its failure sentinel.
    #[must_use]
    pub fn score(self, geometry: &GeometryParameters, metrics: &AerodynamicMetrics) -> f64 {
        let reciprocal = |x: f64| 1.0 / (x + RECIPROCAL_GUARD);

        match self {
            Self::MaximizeLiftToDrag => metrics.lift_to_drag,
            Self::MaxLift | Self::Takeoff => metrics.cl,
            Self::MinDrag => reciprocal(metrics.cd),
            Self::MinDragMaintainLift => {
                if metrics.cl < MAINTAIN_CL_THRESHOLD {
                    -10.0 + metrics.cl
                } else {
                    reciprocal(metrics.cd)
                }
            }
            Self::MaxSpanEfficiency => metrics.e,
            Self::MinInducedDrag => reciprocal(metrics.cdi),
            Self::MinRootMoment => {
                // Lift ~ CL·S acting at roughly a quarter of the span.
                let moment =
                    metrics.cl * geometry.planform_area_m2() * (geometry.span_m() * 0.25);
                reciprocal(moment)
            }
        }
    }
}

impl FromStr for Objective {
    type Err = ObjectiveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "max_LD" {
            return Ok(Self::MaximizeLiftToDrag);
        }
        Self::ALL
            .into_iter()
            .find(|objective| objective.token() == s)
            .ok_or_else(|| ObjectiveError {
                token: s.to_owned(),
            })
    }
}

impl fmt::Display for Objective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}
