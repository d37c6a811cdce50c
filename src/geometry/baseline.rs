use uom::si::{
    angle::degree,
    f64::{Angle, Length},
    length::meter,
};

use crate::support::constraint::{Constrained, NonNegative, StrictlyPositive};

use super::{BOUNDS, DeviationBound, DeviationKind, DeviationVector, GeometryParameters};

/// The reference wing that deviations are applied to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WingBaseline {
    geometry: GeometryParameters,
}

impl WingBaseline {
    /// Uses `geometry` as the reference wing.
    #[must_use]
    pub fn new(geometry: GeometryParameters) -> Self {
        Self { geometry }
    }

    /// The undeviated geometry.
    #[must_use]
    pub fn geometry(&self) -> &GeometryParameters {
        &self.geometry
    }

    /// Equivalent to [`apply_deviation`] with this baseline.
    #[must_use]
    pub fn apply(&self, deviation: &DeviationVector) -> GeometryParameters {
        apply_deviation(self, deviation)
    }
}

/// A 10 m span tapered wing with 20° sweep and a canted winglet.
impl Default for WingBaseline {
    fn default() -> Self {
        let length = |value: f64| {
            NonNegative::new(Length::new::<meter>(value)).unwrap_or_else(|_| NonNegative::zero())
        };

        Self::new(GeometryParameters {
            span: length(10.0),
            root_chord: length(1.5),
            tip_chord: length(0.8),
            sweep_le: Angle::new::<degree>(20.0),
            dihedral: Angle::new::<degree>(5.0),
            twist_root: Angle::new::<degree>(2.0),
            twist_tip: Angle::new::<degree>(-2.0),
            winglet_height: length(1.0),
            winglet_cant: Angle::new::<degree>(70.0),
            winglet_toe_out: Angle::new::<degree>(0.0),
        })
    }
}

/// Applies a deviation to a baseline wing.
///
/// Scale components multiply their length by `1 + delta`; offset components
/// add `delta` degrees. The deviation is already clipped, so lengths stay
/// non-negative and this never fails.
#[must_use]
pub fn apply_deviation(baseline: &WingBaseline, deviation: &DeviationVector) -> GeometryParameters {
    let base = baseline.geometry();
    let [d_span, d_root, d_tip, d_sweep, d_dihedral, d_tw_root, d_tw_tip, d_wl_h, d_cant, d_toe] =
        *deviation.as_array();

    GeometryParameters {
        span: scale(base.span, &BOUNDS[0], d_span),
        root_chord: scale(base.root_chord, &BOUNDS[1], d_root),
        tip_chord: scale(base.tip_chord, &BOUNDS[2], d_tip),
        sweep_le: offset(base.sweep_le, &BOUNDS[3], d_sweep),
        dihedral: offset(base.dihedral, &BOUNDS[4], d_dihedral),
        twist_root: offset(base.twist_root, &BOUNDS[5], d_tw_root),
        twist_tip: offset(base.twist_tip, &BOUNDS[6], d_tw_tip),
        winglet_height: scale(base.winglet_height, &BOUNDS[7], d_wl_h),
        winglet_cant: offset(base.winglet_cant, &BOUNDS[8], d_cant),
        winglet_toe_out: offset(base.winglet_toe_out, &BOUNDS[9], d_toe),
    }
}

fn scale(
    value: Constrained<Length, NonNegative>,
    bound: &DeviationBound,
    delta: f64,
) -> Constrained<Length, NonNegative> {
    debug_assert_eq!(bound.kind, DeviationKind::Scale);
    match StrictlyPositive::new(1.0 + bound.clip(delta)) {
        Ok(factor) => value * factor,
        Err(_) => NonNegative::zero(),
    }
}

fn offset(value: Angle, bound: &DeviationBound, delta: f64) -> Angle {
    debug_assert_eq!(bound.kind, DeviationKind::OffsetDegrees);
    value + Angle::new::<degree>(bound.clip(delta))
}
