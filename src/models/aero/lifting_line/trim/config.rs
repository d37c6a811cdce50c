use twine_solvers::equation::bisection;
use uom::si::{angle::degree, f64::Angle};

/// Solver configuration for trimming to a target lift coefficient.
#[derive(Debug, Clone, Copy)]
pub struct TrimConfig {
    /// Maximum iteration count for the bisection solve.
    pub max_iters: usize,

    /// Lower end of the angle-of-attack bracket.
    pub alpha_min: Angle,

    /// Upper end of the angle-of-attack bracket.
    pub alpha_max: Angle,

    /// Absolute tolerance for the angle-of-attack search variable.
    pub alpha_tol: Angle,

    /// Absolute tolerance for the lift coefficient residual (achieved - target).
    pub cl_tol: f64,
}

impl Default for TrimConfig {
    fn default() -> Self {
        Self {
            max_iters: 100,
            alpha_min: Angle::new::<degree>(-10.0),
            alpha_max: Angle::new::<degree>(20.0),
            alpha_tol: Angle::new::<degree>(1e-10),
            cl_tol: 1e-12,
        }
    }
}

impl TrimConfig {
    /// Bracket endpoints in degrees.
    pub(super) fn bracket(&self) -> [f64; 2] {
        [
            self.alpha_min.get::<degree>(),
            self.alpha_max.get::<degree>(),
        ]
    }

    /// Converts this configuration into a bisection solver configuration.
    pub(super) fn bisection(&self) -> bisection::Config {
        bisection::Config {
            max_iters: self.max_iters,
            x_abs_tol: self.alpha_tol.get::<degree>(),
            x_rel_tol: 0.0,
            residual_tol: self.cl_tol,
        }
    }
}
