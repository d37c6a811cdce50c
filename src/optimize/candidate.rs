use crate::geometry::{DeviationVector, GeometryParameters};
use crate::models::aero::AerodynamicMetrics;

/// Score given to a candidate whose evaluation failed.
///
/// Finite so candidates always sort; low enough that any successful
/// evaluation beats it.
pub const FAILURE_SCORE: f64 = -1e9;

/// One evaluated sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredCandidate {
    pub deviation: DeviationVector,
    pub geometry: GeometryParameters,
    pub metrics: AerodynamicMetrics,
    /// Objective score, always finite.
    pub score: f64,
}

impl ScoredCandidate {
    /// Whether this candidate's evaluation failed.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        self.score <= FAILURE_SCORE
    }
}
