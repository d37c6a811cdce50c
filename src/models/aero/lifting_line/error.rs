use thiserror::Error;

/// Errors that can occur while solving the lifting-line system.
///
/// None of these are fatal to an optimization run: the optimizer scores the
/// offending candidate with a penalty and moves on.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolveError {
    /// The collocation matrix or right-hand side contains `NaN` or infinity.
    ///
    /// Typically caused by a non-finite span or chord.
    #[error("collocation system is not finite at station {station}")]
    NonFiniteSystem {
        /// Zero-based collocation station index.
        station: usize,
    },

    /// The least-squares solve failed.
    #[error("least-squares solve failed: {reason}")]
    NumericFailure {
        /// Reason reported by the linear algebra backend.
        reason: &'static str,
    },

    /// The solve completed but produced a non-finite coefficient.
    #[error("non-finite result: CL={cl}, CDi={cdi}, e={e}")]
    NonFiniteResult { cl: f64, cdi: f64, e: f64 },
}
