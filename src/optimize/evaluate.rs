//! Turning a deviation into a scored candidate.

use thiserror::Error;
use tracing::warn;

use crate::geometry::{DeviationVector, GeometryParameters, WingBaseline};
use crate::models::aero::{AerodynamicMetrics, LiftingLine, SolveError};

use super::{FAILURE_SCORE, Objective, ScoredCandidate};

/// Why a candidate could not be scored.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvaluationError {
    #[error("lifting-line solve failed")]
    Solve(#[from] SolveError),

    /// The planform has no area, so no coefficient is meaningful.
    #[error("degenerate planform (area {area} m²)")]
    Degenerate { area: f64 },

    #[error("objective produced a non-finite score ({score})")]
    NonFiniteScore { score: f64 },
}

/// Evaluates candidates against one baseline, model, and objective.
#[derive(Debug, Clone, Copy)]
pub struct Evaluator<'a> {
    baseline: &'a WingBaseline,
    model: LiftingLine,
    objective: Objective,
}

impl<'a> Evaluator<'a> {
    #[must_use]
    pub fn new(baseline: &'a WingBaseline, model: LiftingLine, objective: Objective) -> Self {
        Self {
            baseline,
            model,
            objective,
        }
    }

    /// Solves and scores the geometry produced by `deviation`.
    ///
    /// # Errors
    ///
    /// Returns [`EvaluationError`] if the planform has no area, the solve
    /// fails, or the score is not finite.
    pub fn try_evaluate(
        &self,
        deviation: &DeviationVector,
    ) -> Result<(AerodynamicMetrics, f64), EvaluationError> {
        self.score(&self.baseline.apply(deviation))
    }

    /// Evaluates `deviation`, scoring any failure with [`FAILURE_SCORE`].
    #[must_use]
    pub fn evaluate(&self, deviation: DeviationVector) -> ScoredCandidate {
        let geometry = self.baseline.apply(&deviation);

        let (metrics, score) = match self.score(&geometry) {
            Ok(scored) => scored,
            Err(error) => {
                warn!(%error, ?deviation, "candidate evaluation failed");
                (AerodynamicMetrics::failed(), FAILURE_SCORE)
            }
        };

        ScoredCandidate {
            deviation,
            geometry,
            metrics,
            score,
        }
    }

    fn score(
        &self,
        geometry: &GeometryParameters,
    ) -> Result<(AerodynamicMetrics, f64), EvaluationError> {
        let area = geometry.planform_area_m2();
        if area.is_nan() || area <= 0.0 {
            return Err(EvaluationError::Degenerate { area });
        }

        let metrics = AerodynamicMetrics::from(self.model.solve(geometry)?);
        let score = self.objective.score(geometry, &metrics);

        if score.is_finite() {
            Ok((metrics, score))
        } else {
            Err(EvaluationError::NonFiniteScore { score })
        }
    }
}
