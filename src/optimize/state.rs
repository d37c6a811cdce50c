use std::f64::consts::TAU;

use rand::Rng;

use crate::geometry::{DEVIATION_DIM, DeviationVector};

use super::ScoredCandidate;

/// Added to each elite standard deviation so the search never collapses.
pub const SIGMA_FLOOR: f64 = 1e-6;

/// Where the search loop currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Init,
    Sampling,
    Evaluating,
    Selecting,
    Updating,
    Done,
}

/// The search distribution plus the best candidate seen so far.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizationState {
    pub phase: Phase,
    /// Per-dimension mean of the sampling distribution.
    pub mu: [f64; DEVIATION_DIM],
    /// Per-dimension standard deviation of the sampling distribution.
    pub sigma: [f64; DEVIATION_DIM],
    /// Best successful candidate so far; `None` until one succeeds.
    pub best: Option<ScoredCandidate>,
    /// 1-based index of the current iteration, zero before the first.
    pub iteration: usize,
}

impl OptimizationState {
    /// A zero-mean distribution with equal spread in every dimension.
    #[must_use]
    pub fn new(initial_sigma: f64) -> Self {
        Self {
            phase: Phase::Init,
            mu: [0.0; DEVIATION_DIM],
            sigma: [initial_sigma; DEVIATION_DIM],
            best: None,
            iteration: 0,
        }
    }

    /// Draws `count` clipped deviations from `N(mu, sigma)`.
    ///
    /// Samples are drawn row by row so a given seed always yields the same
    /// population regardless of how it is later evaluated.
    pub fn sample<R: Rng>(&self, rng: &mut R, count: usize) -> Vec<DeviationVector> {
        (0..count)
            .map(|_| {
                let mut raw = [0.0; DEVIATION_DIM];
                for ((value, mu), sigma) in raw.iter_mut().zip(&self.mu).zip(&self.sigma) {
                    *value = mu + sigma * standard_normal(rng);
                }
                DeviationVector::new(raw)
            })
            .collect()
    }

    /// Replaces the best candidate if `population` holds a strictly better one.
    ///
    /// Within `population` the first maximum wins; failed candidates never
    /// become best. Returns whether the best changed.
    pub fn observe(&mut self, population: &[ScoredCandidate]) -> bool {
        let Some(iteration_best) = population
            .iter()
            .filter(|candidate| !candidate.is_failure())
            .reduce(|best, candidate| {
                if candidate.score > best.score {
                    candidate
                } else {
                    best
                }
            })
        else {
            return false;
        };

        let improved = self
            .best
            .is_none_or(|best| iteration_best.score > best.score);
        if improved {
            self.best = Some(*iteration_best);
        }
        improved
    }

    /// Sets `mu` and `sigma` to the mean and population standard deviation
    /// of `elites`, plus [`SIGMA_FLOOR`].
    ///
    /// An empty slice leaves the distribution unchanged.
    pub fn refit(&mut self, elites: &[DeviationVector]) {
        if elites.is_empty() {
            return;
        }
        let n = elites.len() as f64;

        for dim in 0..DEVIATION_DIM {
            let mean = elites.iter().map(|e| e.as_array()[dim]).sum::<f64>() / n;
            let variance = elites
                .iter()
                .map(|e| (e.as_array()[dim] - mean).powi(2))
                .sum::<f64>()
                / n;

            self.mu[dim] = mean;
            self.sigma[dim] = variance.sqrt() + SIGMA_FLOOR;
        }
    }
}

/// One draw from `N(0, 1)` by the Box-Muller transform.
fn standard_normal<R: Rng>(rng: &mut R) -> f64 {
    // `1 - u` lies in (0, 1], keeping the logarithm finite.
    let u1 = 1.0 - rng.random::<f64>();
    let u2 = rng.random::<f64>();
    (-2.0 * u1.ln()).sqrt() * (TAU * u2).cos()
}

/// The `count` highest-scoring deviations, best first.
///
/// Ties keep sample order.
pub(super) fn select_elites(population: &[ScoredCandidate], count: usize) -> Vec<DeviationVector> {
    let mut ranked: Vec<&ScoredCandidate> = population.iter().collect();
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked
        .into_iter()
        .take(count)
        .map(|candidate| candidate.deviation)
        .collect()
}
