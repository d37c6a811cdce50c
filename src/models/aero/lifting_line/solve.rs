use std::f64::consts::PI;

use nalgebra::{DMatrix, DVector};
use uom::si::{angle::radian, f64::Angle};

use crate::geometry::GeometryParameters;

use super::{LiftingLineSolution, SolveError};

/// Keeps the normalized span position finite when all stations coincide.
const ETA_GUARD: f64 = 1e-9;

/// Keeps span efficiency finite when induced drag vanishes.
const EFFICIENCY_GUARD: f64 = 1e-9;

const SVD_MAX_ITERS: usize = 10_000;

/// Local conditions at each collocation station.
struct Stations {
    theta: Vec<f64>,
    chord: Vec<f64>,
    alpha_eff: Vec<f64>,
}

impl Stations {
    /// Places `n` stations at `θᵢ = iπ/(2n+1)`, which stops short of the tip
    /// where `sin θ` would vanish, and interpolates chord and twist root→tip.
    fn new(geometry: &GeometryParameters, alpha: Angle, n: usize) -> Self {
        let b = geometry.span_m();
        let theta: Vec<f64> = (1..=n)
            .map(|i| i as f64 * PI / (2 * n + 1) as f64)
            .collect();
        let y: Vec<f64> = theta.iter().map(|t| 0.5 * b * t.cos()).collect();

        let y_min = y.iter().copied().fold(f64::INFINITY, f64::min);
        let y_max = y.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        let c_root = geometry.root_chord_m();
        let c_tip = geometry.tip_chord_m();
        let tw_root = geometry.twist_root.get::<radian>();
        let tw_tip = geometry.twist_tip.get::<radian>();
        let alpha = alpha.get::<radian>();

        let mut chord = Vec::with_capacity(n);
        let mut alpha_eff = Vec::with_capacity(n);
        for &y_i in &y {
            let eta = (y_i - y_min) / (y_max - y_min + ETA_GUARD);
            chord.push((1.0 - eta) * c_root + eta * c_tip);
            alpha_eff.push(alpha - ((1.0 - eta) * tw_root + eta * tw_tip));
        }

        Self {
            theta,
            chord,
            alpha_eff,
        }
    }
}

/// Solves the lifting-line system for `geometry` at `alpha` with `n` modes.
pub(super) fn solve(
    geometry: &GeometryParameters,
    alpha: Angle,
    n: usize,
) -> Result<LiftingLineSolution, SolveError> {
    let b = geometry.span_m();
    let area = geometry.planform_area_m2();
    if area.is_nan() || area <= 0.0 {
        return Ok(LiftingLineSolution::degenerate());
    }

    let stations = Stations::new(geometry, alpha, n);
    let matrix = collocation_matrix(b, &stations);
    let rhs = DVector::from_column_slice(&stations.alpha_eff);

    if let Some(station) = first_non_finite_row(&matrix, &rhs) {
        return Err(SolveError::NonFiniteSystem { station });
    }

    let coeffs = least_squares(matrix, &rhs)?;

    let factor = PI * b / area;
    let cl = factor * 2.0 * coeffs[0];
    let cdi = factor
        * 4.0
        * coeffs
            .iter()
            .enumerate()
            .map(|(k, a)| (k + 1) as f64 * a * a)
            .sum::<f64>();
    let aspect_ratio = b * b / area;
    let e = cl * cl / (PI * aspect_ratio * cdi + EFFICIENCY_GUARD);

    if !(cl.is_finite() && cdi.is_finite() && e.is_finite()) {
        return Err(SolveError::NonFiniteResult { cl, cdi, e });
    }

    Ok(LiftingLineSolution {
        cl,
        cdi,
        e,
        aspect_ratio,
    })
}

/// `A[i, k] = [(2b/cᵢ) sin θᵢ + m sin(mθᵢ)/sin θᵢ] · sin(mθᵢ)` with `m = k + 1`.
fn collocation_matrix(b: f64, stations: &Stations) -> DMatrix<f64> {
    let n = stations.theta.len();
    DMatrix::from_fn(n, n, |i, k| {
        let th = stations.theta[i];
        let m = (k + 1) as f64;
        let sin_th = th.sin();
        let sin_m = (m * th).sin();
        ((2.0 * b / stations.chord[i]) * sin_th + m * sin_m / sin_th) * sin_m
    })
}

fn first_non_finite_row(matrix: &DMatrix<f64>, rhs: &DVector<f64>) -> Option<usize> {
    (0..matrix.nrows())
        .find(|&i| !rhs[i].is_finite() || matrix.row(i).iter().any(|v| !v.is_finite()))
}

/// Minimum-norm least-squares solution via SVD.
///
/// Singular values below `ε · n · σ_max` are treated as zero.
fn least_squares(matrix: DMatrix<f64>, rhs: &DVector<f64>) -> Result<DVector<f64>, SolveError> {
    let n = matrix.nrows().max(matrix.ncols());
    let svd = matrix
        .try_svd(true, true, f64::EPSILON, SVD_MAX_ITERS)
        .ok_or(SolveError::NumericFailure {
            reason: "SVD did not converge",
        })?;

    let cutoff = f64::EPSILON * n as f64 * svd.singular_values.max();
    svd.solve(rhs, cutoff)
        .map_err(|reason| SolveError::NumericFailure { reason })
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::angle::degree;

    use crate::geometry::{DEVIATION_DIM, DeviationVector, GeometryParameters, WingBaseline};
    use crate::models::aero::LiftingLine;

    fn alpha(deg: f64) -> Angle {
        Angle::new::<degree>(deg)
    }

    fn baseline_geometry() -> GeometryParameters {
        *WingBaseline::default().geometry()
    }

    #[test]
    fn baseline_wing_at_five_degrees() {
        let solution = solve(&baseline_geometry(), alpha(5.0), 16).unwrap();

        assert!(solution.cl > 0.0 && solution.cl < 2.0);
        assert!(solution.cdi > 0.0);
        assert_relative_eq!(solution.aspect_ratio, 100.0 / 11.5);

        // Reference values from an independent dense solve of the same system.
        assert_relative_eq!(solution.cl, 0.008_935_906_074_396, max_relative = 1e-6);
        assert_relative_eq!(solution.cdi, 0.000_755_745_778_761, max_relative = 1e-6);
        assert_relative_eq!(solution.e, 0.003_867_669_957_319, max_relative = 1e-6);
    }

    #[test]
    fn repeated_solves_are_identical() {
        let a = solve(&baseline_geometry(), alpha(5.0), 16).unwrap();
        let b = solve(&baseline_geometry(), alpha(5.0), 16).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn lift_is_linear_in_alpha() {
        let geometry = baseline_geometry();
        let cl = |deg| solve(&geometry, alpha(deg), 16).unwrap().cl;

        assert_relative_eq!(cl(10.0) - cl(5.0), cl(5.0) - cl(0.0), max_relative = 1e-9);
        assert!(cl(10.0) > cl(5.0));
    }

    #[test]
    fn zero_area_is_degenerate_not_an_error() {
        let mut record = baseline_geometry().to_record();
        record.span = 0.0;
        let geometry = GeometryParameters::try_from(record).unwrap();

        assert_eq!(
            solve(&geometry, alpha(5.0), 16),
            Ok(LiftingLineSolution::degenerate())
        );

        let mut record = baseline_geometry().to_record();
        record.root_chord = 0.0;
        record.tip_chord = 0.0;
        let geometry = GeometryParameters::try_from(record).unwrap();

        assert_eq!(
            solve(&geometry, alpha(5.0), 16),
            Ok(LiftingLineSolution::degenerate())
        );
    }

    #[test]
    fn infinite_span_is_reported_not_propagated() {
        let mut record = baseline_geometry().to_record();
        record.span = f64::INFINITY;
        let geometry = GeometryParameters::try_from(record).unwrap();

        assert!(matches!(
            solve(&geometry, alpha(5.0), 16),
            Err(SolveError::NonFiniteSystem { .. })
        ));
    }

    #[test]
    fn shortest_span_still_solves() {
        let mut raw = [0.0; DEVIATION_DIM];
        raw[0] = -1.0;
        let geometry = WingBaseline::default().apply(&DeviationVector::new(raw));

        let solution = LiftingLine::default().solve(&geometry).unwrap();
        assert!(solution.cl.is_finite());
        assert!(solution.cdi.is_finite());
        assert!(solution.e.is_finite());
    }

    #[test]
    fn every_bound_corner_gives_finite_output() {
        let baseline = WingBaseline::default();
        let model = LiftingLine::default();

        for mask in 0_u32..(1 << DEVIATION_DIM) {
            let mut raw = [0.0; DEVIATION_DIM];
            for (i, value) in raw.iter_mut().enumerate() {
                *value = if mask & (1 << i) == 0 { -1e3 } else { 1e3 };
            }
            let geometry = baseline.apply(&DeviationVector::new(raw));
            let solution = model.solve(&geometry).unwrap();

            assert!(
                solution.cl.is_finite() && solution.cdi.is_finite() && solution.e.is_finite(),
                "non-finite output for corner {mask:#012b}: {solution:?}"
            );
        }
    }

    #[test]
    fn single_station_solves() {
        let solution = solve(&baseline_geometry(), alpha(5.0), 1).unwrap();
        assert!(solution.cl.is_finite());
    }
}
