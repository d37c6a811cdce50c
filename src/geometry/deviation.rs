use serde::{Deserialize, Serialize};

/// Number of independently deviated wing dimensions.
pub const DEVIATION_DIM: usize = 10;

/// How a deviation component modifies its baseline value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviationKind {
    /// `value * (1 + delta)`, for lengths.
    Scale,
    /// `value + delta` in degrees, for angles.
    OffsetDegrees,
}

/// Allowed range for one deviation component.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeviationBound {
    /// Name of the geometry field this component drives.
    pub field: &'static str,
    pub kind: DeviationKind,
    pub lower: f64,
    pub upper: f64,
}

impl DeviationBound {
    const fn scale(field: &'static str, lower: f64, upper: f64) -> Self {
        Self {
            field,
            kind: DeviationKind::Scale,
            lower,
            upper,
        }
    }

    const fn offset(field: &'static str, lower: f64, upper: f64) -> Self {
        Self {
            field,
            kind: DeviationKind::OffsetDegrees,
            lower,
            upper,
        }
    }

    /// Clamps `value` into this bound. `NaN` maps to zero deviation.
    #[must_use]
    pub fn clip(&self, value: f64) -> f64 {
        if value.is_nan() {
            0.0
        } else {
            value.clamp(self.lower, self.upper)
        }
    }
}

/// Per-dimension deviation bounds, in [`GeometryParameters`] field order.
///
/// Scale bounds stay above `-1` so no length can be driven negative.
///
/// [`GeometryParameters`]: super::GeometryParameters
pub const BOUNDS: [DeviationBound; DEVIATION_DIM] = [
    DeviationBound::scale("span", -0.3, 0.5),
    DeviationBound::scale("root_chord", -0.3, 0.5),
    DeviationBound::scale("tip_chord", -0.3, 0.5),
    DeviationBound::offset("sweep_le_deg", -10.0, 10.0),
    DeviationBound::offset("dihedral_deg", -5.0, 10.0),
    DeviationBound::offset("twist_root_deg", -5.0, 5.0),
    DeviationBound::offset("twist_tip_deg", -5.0, 5.0),
    DeviationBound::scale("winglet_height", -0.5, 1.0),
    DeviationBound::offset("winglet_cant_deg", -15.0, 15.0),
    DeviationBound::offset("winglet_toe_out_deg", -20.0, 20.0),
];

const _: () = {
    let mut i = 0;
    while i < DEVIATION_DIM {
        let bound = BOUNDS[i];
        assert!(bound.lower <= bound.upper);
        if let DeviationKind::Scale = bound.kind {
            assert!(bound.lower > -1.0);
        }
        i += 1;
    }
};

/// Ten deviation components, always within [`BOUNDS`].
///
/// The only way to build one is through [`DeviationVector::new`], which
/// clips, so holders never need to re-check the range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(into = "[f64; DEVIATION_DIM]", from = "[f64; DEVIATION_DIM]")]
pub struct DeviationVector([f64; DEVIATION_DIM]);

impl DeviationVector {
    /// Clips `raw` component-wise into [`BOUNDS`].
    #[must_use]
    pub fn new(raw: [f64; DEVIATION_DIM]) -> Self {
        let mut clipped = raw;
        for (value, bound) in clipped.iter_mut().zip(BOUNDS.iter()) {
            *value = bound.clip(*value);
        }
        Self(clipped)
    }

    /// The zero deviation, which reproduces the baseline.
    #[must_use]
    pub fn zero() -> Self {
        Self([0.0; DEVIATION_DIM])
    }

    /// The clipped components.
    #[must_use]
    pub fn as_array(&self) -> &[f64; DEVIATION_DIM] {
        &self.0
    }
}

impl From<[f64; DEVIATION_DIM]> for DeviationVector {
    fn from(raw: [f64; DEVIATION_DIM]) -> Self {
        Self::new(raw)
    }
}

impl From<DeviationVector> for [f64; DEVIATION_DIM] {
    fn from(deviation: DeviationVector) -> Self {
        deviation.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clipping_lands_within_bounds() {
        let wild = [
            -5.0, 5.0, 0.1, -100.0, 100.0, 4.9, -4.9, -2.0, 16.0, f64::NAN,
        ];
        let deviation = DeviationVector::new(wild);

        for (value, bound) in deviation.as_array().iter().zip(BOUNDS.iter()) {
            assert!(
                *value >= bound.lower && *value <= bound.upper,
                "{} = {value} escaped [{}, {}]",
                bound.field,
                bound.lower,
                bound.upper
            );
        }

        assert_eq!(deviation.as_array()[0], -0.3);
        assert_eq!(deviation.as_array()[1], 0.5);
        assert_eq!(deviation.as_array()[2], 0.1);
        assert_eq!(deviation.as_array()[4], 10.0);
        assert_eq!(deviation.as_array()[9], 0.0);
    }

    #[test]
    fn infinities_clip_to_endpoints() {
        let deviation = DeviationVector::new([f64::INFINITY; DEVIATION_DIM]);
        for (value, bound) in deviation.as_array().iter().zip(BOUNDS.iter()) {
            assert_eq!(*value, bound.upper);
        }

        let deviation = DeviationVector::new([f64::NEG_INFINITY; DEVIATION_DIM]);
        for (value, bound) in deviation.as_array().iter().zip(BOUNDS.iter()) {
            assert_eq!(*value, bound.lower);
        }
    }

    #[test]
    fn deserializing_clips() {
        let deviation: DeviationVector =
            serde_json::from_str("[9.0, 0, 0, 0, 0, 0, 0, 0, 0, 0]").unwrap();
        assert_eq!(deviation.as_array()[0], 0.5);
    }
}
