//! Prandtl lifting-line theory in Fourier sine-series form.
//!
//! The spanwise circulation is expanded as `Γ(θ) ∝ Σ aₙ sin(nθ)` and the
//! coefficients are fitted at collocation points along the half-span.
//! From the fitted coefficients:
//!
//! - `CL = π (b/S) 2 a₁`
//! - `CDi = π (b/S) 4 Σ n aₙ²`
//! - `e = CL² / (π AR CDi)`

mod error;
mod solve;
mod trim;

pub use error::SolveError;
pub use trim::{TrimConfig, TrimError, TrimmedSolution};

use std::num::NonZeroUsize;

use twine_core::Model;
use uom::si::{angle::degree, f64::Angle};

use crate::geometry::GeometryParameters;

const DEFAULT_STATIONS: NonZeroUsize = NonZeroUsize::new(16).unwrap();

/// Lift, induced drag, and span efficiency of a wing at one angle of attack.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LiftingLineSolution {
    pub cl: f64,
    pub cdi: f64,
    /// Span efficiency factor.
    pub e: f64,
    pub aspect_ratio: f64,
}

impl LiftingLineSolution {
    /// The all-zero solution reported for a wing with no planform area.
    #[must_use]
    pub fn degenerate() -> Self {
        Self {
            cl: 0.0,
            cdi: 0.0,
            e: 0.0,
            aspect_ratio: 0.0,
        }
    }
}

/// Lifting-line model at a fixed angle of attack and station count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LiftingLine {
    /// Geometric angle of attack of the root chord line.
    pub alpha: Angle,

    /// Collocation stations on the half-span, which is also the number of
    /// Fourier modes solved for.
    pub stations: NonZeroUsize,
}

/// 5° angle of attack with 16 stations.
impl Default for LiftingLine {
    fn default() -> Self {
        Self {
            alpha: Angle::new::<degree>(5.0),
            stations: DEFAULT_STATIONS,
        }
    }
}

impl LiftingLine {
    /// Creates a model at `alpha` with the given station count.
    #[must_use]
    pub fn new(alpha: Angle, stations: NonZeroUsize) -> Self {
        Self { alpha, stations }
    }

    /// Returns the same model at a different angle of attack.
    #[must_use]
    pub fn at_alpha(self, alpha: Angle) -> Self {
        Self { alpha, ..self }
    }

    /// Solves for the wing's lift and induced drag.
    ///
    /// A wing with zero planform area returns
    /// [`LiftingLineSolution::degenerate`] rather than an error.
    ///
    /// # Errors
    ///
    /// Returns [`SolveError`] if the collocation system is not finite or its
    /// least-squares solve fails.
    pub fn solve(&self, geometry: &GeometryParameters) -> Result<LiftingLineSolution, SolveError> {
        solve::solve(geometry, self.alpha, self.stations.get())
    }

    /// Finds the angle of attack at which the wing produces `target_cl`.
    ///
    /// Uses bisection on `alpha` within the bracket in `config`.
    ///
    /// # Errors
    ///
    /// Returns [`TrimError`] if the wing is degenerate, the bracket does not
    /// contain the target, or the solver runs out of iterations.
    pub fn trim(
        &self,
        geometry: &GeometryParameters,
        target_cl: f64,
        config: TrimConfig,
    ) -> Result<TrimmedSolution, TrimError> {
        trim::trim(self, geometry, target_cl, config)
    }
}

impl Model for LiftingLine {
    type Input = GeometryParameters;
    type Output = LiftingLineSolution;
    type Error = SolveError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        self.solve(input)
    }
}
