//! Problem formulation for iterative lift matching.

use std::convert::Infallible;

use twine_core::{EquationProblem, Model};
use uom::si::{angle::degree, f64::Angle};

use crate::geometry::GeometryParameters;

use super::super::{LiftingLine, SolveError};
use super::TrimmedSolution;

/// Model adapter that exposes angle of attack as the sole input variable.
pub(super) struct TrimModel<'a> {
    base: &'a LiftingLine,
    geometry: &'a GeometryParameters,
}

impl<'a> TrimModel<'a> {
    pub(super) fn new(base: &'a LiftingLine, geometry: &'a GeometryParameters) -> Self {
        Self { base, geometry }
    }
}

impl Model for TrimModel<'_> {
    type Input = Angle;
    type Output = TrimmedSolution;
    type Error = SolveError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        let solution = self.base.at_alpha(*input).solve(self.geometry)?;
        Ok(TrimmedSolution {
            alpha: *input,
            solution,
        })
    }
}

/// Computes the residual as `achieved_cl - target_cl`.
pub(super) struct TrimProblem {
    target_cl: f64,
}

impl TrimProblem {
    pub(super) fn new(target_cl: f64) -> Self {
        Self { target_cl }
    }
}

impl EquationProblem<1> for TrimProblem {
    type Input = Angle;
    type Output = TrimmedSolution;
    type Error = Infallible;

    fn input(&self, x: &[f64; 1]) -> Result<Self::Input, Self::Error> {
        Ok(Angle::new::<degree>(x[0]))
    }

    fn residuals(
        &self,
        _input: &Self::Input,
        output: &Self::Output,
    ) -> Result<[f64; 1], Self::Error> {
        Ok([output.solution.cl - self.target_cl])
    }
}
