use thiserror::Error;

use crate::models::aero::LiftingLine;
use crate::support::constraint::{
    Constrained, ConstraintError, PositiveFraction, StrictlyPositive,
};

/// Cross-entropy search settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CemConfig {
    /// Number of sample/select/update rounds. Zero evaluates only the baseline.
    pub iterations: usize,

    /// Samples drawn per iteration.
    pub population: usize,

    /// Share of each population kept as elites, in `(0, 1]`.
    pub elite_fraction: f64,

    /// Seed for the sampling RNG.
    pub seed: u64,

    /// Standard deviation of the initial search distribution, per dimension.
    pub initial_sigma: f64,

    /// Aerodynamic model used to evaluate each candidate.
    pub model: LiftingLine,
}

impl Default for CemConfig {
    fn default() -> Self {
        Self {
            iterations: 40,
            population: 60,
            elite_fraction: 0.2,
            seed: 0,
            initial_sigma: 0.3,
            model: LiftingLine::default(),
        }
    }
}

/// Errors from an invalid [`CemConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("population must be positive")]
    Population(#[source] ConstraintError),

    #[error("elite fraction must lie in (0, 1]")]
    EliteFraction(#[source] ConstraintError),

    #[error("initial sigma must be positive")]
    InitialSigma(#[source] ConstraintError),
}

/// A [`CemConfig`] whose invariants have been checked.
#[derive(Debug, Clone, Copy)]
pub(super) struct Validated {
    pub iterations: usize,
    pub population: Constrained<usize, StrictlyPositive>,
    pub elite_fraction: Constrained<f64, PositiveFraction>,
    pub seed: u64,
    pub initial_sigma: Constrained<f64, StrictlyPositive>,
    pub model: LiftingLine,
}

impl Validated {
    /// Elites kept per iteration, `max(1, ⌊P·f⌋)`.
    pub(super) fn elite_count(&self) -> usize {
        let population = *self.population.as_ref();
        let fraction = *self.elite_fraction.as_ref();

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let count = (population as f64 * fraction).floor() as usize;
        count.clamp(1, population)
    }
}

impl CemConfig {
    /// Checks the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the population is zero, the elite fraction
    /// is outside `(0, 1]`, or the initial sigma is not positive.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validated().map(|_| ())
    }

    pub(super) fn validated(&self) -> Result<Validated, ConfigError> {
        Ok(Validated {
            iterations: self.iterations,
            population: StrictlyPositive::new(self.population)
                .map_err(ConfigError::Population)?,
            elite_fraction: PositiveFraction::new(self.elite_fraction)
                .map_err(ConfigError::EliteFraction)?,
            seed: self.seed,
            initial_sigma: StrictlyPositive::new(self.initial_sigma)
                .map_err(ConfigError::InitialSigma)?,
            model: self.model,
        })
    }
}
