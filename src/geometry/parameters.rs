use serde::{Deserialize, Serialize};
use uom::si::{
    angle::degree,
    f64::{Angle, Length},
    length::meter,
};

use crate::support::constraint::{Constrained, ConstraintError, NonNegative};

/// A complete wing planform with its winglet.
///
/// Lengths are non-negative by construction; angles are unrestricted.
/// The mesh builder lays `span` out along one side of the symmetry plane,
/// while the lifting-line solver reads it as the full span `b`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometryParameters {
    pub span: Constrained<Length, NonNegative>,
    pub root_chord: Constrained<Length, NonNegative>,
    pub tip_chord: Constrained<Length, NonNegative>,
    /// Leading-edge sweep.
    pub sweep_le: Angle,
    pub dihedral: Angle,
    /// Incidence at the root, positive nose-up.
    pub twist_root: Angle,
    /// Incidence at the tip, positive nose-up.
    pub twist_tip: Angle,
    pub winglet_height: Constrained<Length, NonNegative>,
    /// Winglet inclination from the horizontal.
    pub winglet_cant: Angle,
    pub winglet_toe_out: Angle,
}

impl GeometryParameters {
    /// Span in metres.
    #[must_use]
    pub fn span_m(&self) -> f64 {
        self.span.as_ref().get::<meter>()
    }

    /// Root chord in metres.
    #[must_use]
    pub fn root_chord_m(&self) -> f64 {
        self.root_chord.as_ref().get::<meter>()
    }

    /// Tip chord in metres.
    #[must_use]
    pub fn tip_chord_m(&self) -> f64 {
        self.tip_chord.as_ref().get::<meter>()
    }

    /// Trapezoidal planform area `(c_r + c_t) / 2 * b`, in square metres.
    #[must_use]
    pub fn planform_area_m2(&self) -> f64 {
        0.5 * (self.root_chord_m() + self.tip_chord_m()) * self.span_m()
    }

    /// Aspect ratio `b² / S`, or zero for a degenerate planform.
    #[must_use]
    pub fn aspect_ratio(&self) -> f64 {
        let area = self.planform_area_m2();
        if area > 0.0 {
            self.span_m().powi(2) / area
        } else {
            0.0
        }
    }

    /// Flattens this geometry into metres and degrees.
    #[must_use]
    pub fn to_record(&self) -> GeometryRecord {
        GeometryRecord {
            span: self.span_m(),
            root_chord: self.root_chord_m(),
            tip_chord: self.tip_chord_m(),
            sweep_le_deg: self.sweep_le.get::<degree>(),
            dihedral_deg: self.dihedral.get::<degree>(),
            twist_root_deg: self.twist_root.get::<degree>(),
            twist_tip_deg: self.twist_tip.get::<degree>(),
            winglet_height: self.winglet_height.as_ref().get::<meter>(),
            winglet_cant_deg: self.winglet_cant.get::<degree>(),
            winglet_toe_out_deg: self.winglet_toe_out.get::<degree>(),
        }
    }
}

/// A [`GeometryParameters`] flattened to plain numbers, for persistence.
///
/// Lengths are in metres and angles in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeometryRecord {
    pub span: f64,
    pub root_chord: f64,
    pub tip_chord: f64,
    pub sweep_le_deg: f64,
    pub dihedral_deg: f64,
    pub twist_root_deg: f64,
    pub twist_tip_deg: f64,
    pub winglet_height: f64,
    pub winglet_cant_deg: f64,
    pub winglet_toe_out_deg: f64,
}

impl TryFrom<GeometryRecord> for GeometryParameters {
    type Error = ConstraintError;

    fn try_from(record: GeometryRecord) -> Result<Self, Self::Error> {
        let length = |value: f64| NonNegative::new(Length::new::<meter>(value));

        Ok(Self {
            span: length(record.span)?,
            root_chord: length(record.root_chord)?,
            tip_chord: length(record.tip_chord)?,
            sweep_le: Angle::new::<degree>(record.sweep_le_deg),
            dihedral: Angle::new::<degree>(record.dihedral_deg),
            twist_root: Angle::new::<degree>(record.twist_root_deg),
            twist_tip: Angle::new::<degree>(record.twist_tip_deg),
            winglet_height: length(record.winglet_height)?,
            winglet_cant: Angle::new::<degree>(record.winglet_cant_deg),
            winglet_toe_out: Angle::new::<degree>(record.winglet_toe_out_deg),
        })
    }
}
