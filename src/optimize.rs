//! Cross-entropy wing optimization.
//!
//! Each iteration draws a population of deviations from a per-dimension
//! normal distribution, scores every resulting wing, and refits the
//! distribution to the best-scoring fraction (the elites). The best
//! candidate ever seen is tracked separately and only replaced by a strictly
//! better one, so the reported best never gets worse.
//!
//! ```no_run
//! use wing_opt::geometry::WingBaseline;
//! use wing_opt::optimize::{self, CemConfig, Objective};
//!
//! let optimum = optimize::run(
//!     &WingBaseline::default(),
//!     Objective::MaxLift,
//!     &CemConfig::default(),
//!     |step| println!("iteration {}: {:?}", step.index, step.best.map(|b| b.score)),
//! )
//! .unwrap();
//!
//! println!("best CL = {}", optimum.metrics.cl);
//! ```

mod candidate;
mod config;
mod evaluate;
mod objective;
mod state;

pub use candidate::{FAILURE_SCORE, ScoredCandidate};
pub use config::{CemConfig, ConfigError};
pub use evaluate::{EvaluationError, Evaluator};
pub use objective::{Objective, ObjectiveError};
pub use state::{OptimizationState, Phase, SIGMA_FLOOR};

use rand::{SeedableRng, rngs::StdRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, info_span};

use crate::geometry::{DeviationVector, GeometryParameters, GeometryRecord, WingBaseline};
use crate::models::aero::AerodynamicMetrics;

use state::select_elites;

/// Progress report passed to the iteration callback.
#[derive(Debug, Clone, Copy)]
pub struct Iteration<'a> {
    /// 1-based iteration index.
    pub index: usize,

    /// Best candidate so far, or `None` if every evaluation has failed.
    pub best: Option<&'a ScoredCandidate>,

    pub state: &'a OptimizationState,
}

/// Result of a completed search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Optimum {
    pub geometry: GeometryParameters,
    pub deviation: DeviationVector,
    pub metrics: AerodynamicMetrics,
    pub score: f64,
}

impl Optimum {
    /// Flattens this result into a persistable record.
    #[must_use]
    pub fn to_design(&self, objective: Objective) -> OptimizedDesign {
        OptimizedDesign {
            objective,
            geometry: self.geometry.to_record(),
            deviation: self.deviation,
            metrics: self.metrics,
            score: self.score,
        }
    }
}

impl From<ScoredCandidate> for Optimum {
    fn from(candidate: ScoredCandidate) -> Self {
        Self {
            geometry: candidate.geometry,
            deviation: candidate.deviation,
            metrics: candidate.metrics,
            score: candidate.score,
        }
    }
}

/// The persisted outcome of a finished run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptimizedDesign {
    pub objective: Objective,
    pub geometry: GeometryRecord,
    pub deviation: DeviationVector,
    pub metrics: AerodynamicMetrics,
    pub score: f64,
}

/// Runs a cross-entropy search from `baseline` for `objective`.
///
/// `on_iteration` is called once per iteration, after the distribution
/// update. Population evaluation runs in parallel but results are gathered
/// in sample order, so a given seed always produces the same run.
///
/// If every evaluation fails, returns the baseline with a zero deviation.
///
/// # Errors
///
/// Returns [`ConfigError`] if `config` is invalid. Evaluation failures are
/// absorbed as [`FAILURE_SCORE`] and never surface here.
pub fn run<F>(
    baseline: &WingBaseline,
    objective: Objective,
    config: &CemConfig,
    mut on_iteration: F,
) -> Result<Optimum, ConfigError>
where
    F: FnMut(&Iteration<'_>),
{
    let config = config.validated()?;
    let population = *config.population.as_ref();
    let elite_count = config.elite_count();

    let _span = info_span!("cem", %objective, population, iterations = config.iterations).entered();
    info!(elite_count, seed = config.seed, "starting search");

    let evaluator = Evaluator::new(baseline, config.model, objective);
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut state = OptimizationState::new(*config.initial_sigma.as_ref());

    for index in 1..=config.iterations {
        state.iteration = index;

        state.phase = Phase::Sampling;
        let samples = state.sample(&mut rng, population);

        state.phase = Phase::Evaluating;
        let scored: Vec<ScoredCandidate> = samples
            .into_par_iter()
            .map(|deviation| evaluator.evaluate(deviation))
            .collect();

        state.phase = Phase::Selecting;
        let improved = state.observe(&scored);
        let elites = select_elites(&scored, elite_count);

        state.phase = Phase::Updating;
        state.refit(&elites);

        debug!(
            iteration = index,
            improved,
            best = state.best.map(|best| best.score),
            failures = scored.iter().filter(|c| c.is_failure()).count(),
            "iteration complete"
        );

        on_iteration(&Iteration {
            index,
            best: state.best.as_ref(),
            state: &state,
        });
    }

    state.phase = Phase::Done;

    let optimum = match state.best {
        Some(best) => Optimum::from(best),
        None => {
            info!("no successful evaluation; falling back to baseline");
            Optimum::from(evaluator.evaluate(DeviationVector::zero()))
        }
    };

    info!(score = optimum.score, "search complete");
    Ok(optimum)
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::geometry::DEVIATION_DIM;

    fn small_config(seed: u64) -> CemConfig {
        CemConfig {
            iterations: 5,
            population: 10,
            seed,
            ..CemConfig::default()
        }
    }

    #[test]
    fn best_score_never_decreases() {
        let mut trace = Vec::new();
        let optimum = run(
            &WingBaseline::default(),
            Objective::MaxLift,
            &small_config(0),
            |step| trace.push(step.best.map(|best| best.score)),
        )
        .unwrap();

        assert_eq!(trace.len(), 5);
        let scores: Vec<f64> = trace.into_iter().map(Option::unwrap).collect();
        assert!(scores.windows(2).all(|pair| pair[1] >= pair[0]));
        assert!(scores[4] >= scores[0]);
        assert_eq!(optimum.score, scores[4]);
    }

    #[test]
    fn callback_indices_are_one_based() {
        let mut indices = Vec::new();
        run(
            &WingBaseline::default(),
            Objective::MaximizeLiftToDrag,
            &small_config(3),
            |step| {
                assert_eq!(step.state.iteration, step.index);
                indices.push(step.index);
            },
        )
        .unwrap();
        assert_eq!(indices, [1, 2, 3, 4, 5]);
    }

    #[test]
    fn same_seed_same_result() {
        let a = run(
            &WingBaseline::default(),
            Objective::MaximizeLiftToDrag,
            &small_config(11),
            |_| {},
        )
        .unwrap();
        let b = run(
            &WingBaseline::default(),
            Objective::MaximizeLiftToDrag,
            &small_config(11),
            |_| {},
        )
        .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn optimum_geometry_matches_its_deviation() {
        let baseline = WingBaseline::default();
        let optimum = run(&baseline, Objective::MaxLift, &small_config(0), |_| {}).unwrap();

        assert_eq!(optimum.geometry, baseline.apply(&optimum.deviation));
        assert!(optimum.score > FAILURE_SCORE);
        assert_eq!(optimum.score, optimum.metrics.cl);
    }

    #[test]
    fn zero_iterations_returns_baseline() {
        let baseline = WingBaseline::default();
        let config = CemConfig {
            iterations: 0,
            ..CemConfig::default()
        };

        let mut calls = 0;
        let optimum = run(&baseline, Objective::MaxLift, &config, |_| calls += 1).unwrap();

        assert_eq!(calls, 0);
        assert_eq!(optimum.deviation, DeviationVector::new([0.0; DEVIATION_DIM]));
        assert_eq!(optimum.geometry, *baseline.geometry());
    }

    #[test]
    fn all_failures_fall_back_to_baseline() {
        let mut record = WingBaseline::default().geometry().to_record();
        record.span = f64::INFINITY;
        let baseline = WingBaseline::new(GeometryParameters::try_from(record).unwrap());

        let mut saw_best = false;
        let optimum = run(&baseline, Objective::MaxLift, &small_config(0), |step| {
            saw_best |= step.best.is_some();
        })
        .unwrap();

        assert!(!saw_best);
        assert_eq!(optimum.deviation, DeviationVector::zero());
        assert_eq!(optimum.score, FAILURE_SCORE);
        assert_eq!(optimum.metrics, AerodynamicMetrics::failed());
    }

    #[test]
    fn zero_area_wing_never_wins_min_induced_drag() {
        let mut record = WingBaseline::default().geometry().to_record();
        record.root_chord = 0.0;
        record.tip_chord = 0.0;
        let baseline = WingBaseline::new(GeometryParameters::try_from(record).unwrap());
        let config = CemConfig {
            iterations: 2,
            population: 4,
            ..CemConfig::default()
        };

        let optimum = run(&baseline, Objective::MinInducedDrag, &config, |_| {}).unwrap();

        assert_eq!(optimum.score, FAILURE_SCORE);
        assert_eq!(optimum.metrics, AerodynamicMetrics::failed());
    }

    #[test]
    fn invalid_config_is_rejected_before_running() {
        let config = CemConfig {
            population: 0,
            ..CemConfig::default()
        };
        let result = run(&WingBaseline::default(), Objective::MaxLift, &config, |_| {
            panic!("callback must not run");
        });
        assert!(matches!(result, Err(ConfigError::Population(_))));
    }

    #[test]
    fn design_record_round_trips_through_json() {
        let optimum = run(
            &WingBaseline::default(),
            Objective::MinInducedDrag,
            &CemConfig {
                iterations: 1,
                population: 4,
                ..CemConfig::default()
            },
            |_| {},
        )
        .unwrap();

        let design = optimum.to_design(Objective::MinInducedDrag);
        let json = serde_json::to_value(design).unwrap();
        assert_eq!(json["objective"], "min_CDi");
        assert_eq!(json["deviation"].as_array().unwrap().len(), DEVIATION_DIM);
        assert!(json["metrics"]["L_over_D"].is_number());

        let back: OptimizedDesign = serde_json::from_value(json).unwrap();
        assert_eq!(back.objective, design.objective);
        assert_eq!(back.geometry.span, design.geometry.span);
    }
}
