//! Parametric wing geometry.
//!
//! A wing is described by ten named dimensions ([`GeometryParameters`]).
//! The optimizer never edits those directly: it proposes a
//! [`DeviationVector`] of ten bounded offsets, and [`apply_deviation`]
//! turns a [`WingBaseline`] plus a deviation into a new geometry.
//!
//! ```
//! use uom::si::length::meter;
//! use wing_opt::geometry::{DeviationVector, WingBaseline, apply_deviation};
//!
//! let baseline = WingBaseline::default();
//!
//! // Stretch the span by 20%; everything else stays at baseline.
//! let mut raw = [0.0; 10];
//! raw[0] = 0.2;
//! let geometry = apply_deviation(&baseline, &DeviationVector::new(raw));
//!
//! assert!((geometry.span.as_ref().get::<meter>() - 12.0).abs() < 1e-12);
//! ```

mod baseline;
mod deviation;
mod parameters;

pub use baseline::{WingBaseline, apply_deviation};
pub use deviation::{BOUNDS, DEVIATION_DIM, DeviationBound, DeviationKind, DeviationVector};
pub use parameters::{GeometryParameters, GeometryRecord};
