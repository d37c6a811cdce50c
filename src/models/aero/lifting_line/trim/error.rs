use thiserror::Error;
use twine_solvers::equation::bisection;

/// Errors that can occur while trimming to a target lift coefficient.
#[derive(Debug, Error)]
pub enum TrimError {
    /// The wing has no planform area, so its lift is zero at every angle.
    #[error("cannot trim a wing with zero planform area")]
    Degenerate,

    /// The bisection solver encountered an error.
    #[error("bisection solver error")]
    Bisection(#[from] bisection::Error),

    /// The solver reached the iteration limit without converging.
    #[error("solver hit iteration limit: residual={residual}")]
    MaxIters {
        /// Best lift coefficient residual achieved.
        residual: f64,

        /// Iteration count performed by the solver.
        iters: usize,
    },
}
