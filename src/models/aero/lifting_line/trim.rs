//! Iterative solver for a target lift coefficient.
//!
//! Lift from the lifting-line model is linear in angle of attack, so a
//! bracketed bisection on `alpha` converges reliably whenever the target lies
//! between the lift at the two bracket ends.

mod config;
mod error;
mod problem;

pub use config::TrimConfig;
pub use error::TrimError;

use twine_solvers::equation::bisection;
use uom::si::f64::Angle;

use crate::geometry::GeometryParameters;

use super::{LiftingLine, LiftingLineSolution};

use problem::{TrimModel, TrimProblem};

/// Angle of attack found by trimming, with the solution at that angle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrimmedSolution {
    pub alpha: Angle,
    pub solution: LiftingLineSolution,
}

pub(super) fn trim(
    base: &LiftingLine,
    geometry: &GeometryParameters,
    target_cl: f64,
    config: TrimConfig,
) -> Result<TrimmedSolution, TrimError> {
    let area = geometry.planform_area_m2();
    if area.is_nan() || area <= 0.0 {
        return Err(TrimError::Degenerate);
    }

    let model = TrimModel::new(base, geometry);
    let problem = TrimProblem::new(target_cl);

    let solution = bisection::solve(
        &model,
        &problem,
        config.bracket(),
        &config.bisection(),
        |event: &bisection::Event<'_, _, _>| {
            // A failed solve carries no lift information; treat it as
            // overshooting so the bracket shrinks toward lower angles.
            if event.result().is_err() {
                return Some(bisection::Action::assume_positive());
            }
            None
        },
    )?;

    if solution.status != bisection::Status::Converged {
        return Err(TrimError::MaxIters {
            residual: solution.residual,
            iters: solution.iters,
        });
    }

    Ok(solution.snapshot.output)
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::angle::degree;

    use crate::geometry::WingBaseline;

    #[test]
    fn recovers_alpha_from_its_lift() {
        let geometry = *WingBaseline::default().geometry();
        let base = LiftingLine::default();

        let target = base
            .at_alpha(Angle::new::<degree>(7.0))
            .solve(&geometry)
            .unwrap();

        let trimmed = base
            .trim(&geometry, target.cl, TrimConfig::default())
            .expect("trim should converge");

        assert_relative_eq!(trimmed.alpha.get::<degree>(), 7.0, epsilon = 1e-6);
        assert_relative_eq!(trimmed.solution.cl, target.cl, epsilon = 1e-10);
    }

    #[test]
    fn zero_area_wing_cannot_be_trimmed() {
        let mut record = WingBaseline::default().geometry().to_record();
        record.span = 0.0;
        let geometry = GeometryParameters::try_from(record).unwrap();

        let result = LiftingLine::default().trim(&geometry, 0.01, TrimConfig::default());
        assert!(matches!(result, Err(TrimError::Degenerate)));
    }

    #[test]
    fn target_outside_bracket_is_an_error() {
        let geometry = *WingBaseline::default().geometry();
        let result = LiftingLine::default().trim(&geometry, 10.0, TrimConfig::default());
        assert!(result.is_err());
    }
}
