use serde::{Deserialize, Serialize};

use super::LiftingLineSolution;

/// Fixed parasitic (profile) drag coefficient added to induced drag.
pub const PARASITIC_DRAG: f64 = 0.02;

/// Keeps lift-to-drag finite when total drag vanishes.
const DRAG_GUARD: f64 = 1e-9;

/// Aerodynamic totals for one wing at one flight condition.
///
/// Serialized with the conventional coefficient names (`CL`, `CDi`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AerodynamicMetrics {
    #[serde(rename = "CL")]
    pub cl: f64,

    /// Induced drag coefficient.
    #[serde(rename = "CDi")]
    pub cdi: f64,

    /// Total drag coefficient, `PARASITIC_DRAG + cdi`.
    #[serde(rename = "CD")]
    pub cd: f64,

    /// Span efficiency factor.
    pub e: f64,

    #[serde(rename = "AR")]
    pub aspect_ratio: f64,

    #[serde(rename = "L_over_D")]
    pub lift_to_drag: f64,
}

impl AerodynamicMetrics {
    /// Adds parasitic drag to a lifting-line solution.
    #[must_use]
    pub fn from_solution(solution: &LiftingLineSolution) -> Self {
        let cd = PARASITIC_DRAG + solution.cdi;
        Self {
            cl: solution.cl,
            cdi: solution.cdi,
            cd,
            e: solution.e,
            aspect_ratio: solution.aspect_ratio,
            lift_to_drag: solution.cl / (cd + DRAG_GUARD),
        }
    }

    /// All-zero metrics reported for a candidate whose evaluation failed.
    #[must_use]
    pub fn failed() -> Self {
        Self {
            cl: 0.0,
            cdi: 0.0,
            cd: 0.0,
            e: 0.0,
            aspect_ratio: 0.0,
            lift_to_drag: 0.0,
        }
    }
}

impl From<LiftingLineSolution> for AerodynamicMetrics {
    fn from(solution: LiftingLineSolution) -> Self {
        Self::from_solution(&solution)
    }
}
