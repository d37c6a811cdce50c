//! Finite-wing aerodynamics.
//!
//! [`LiftingLine`] estimates lift, induced drag, and span efficiency for a
//! [`GeometryParameters`](crate::geometry::GeometryParameters).
//! [`AerodynamicMetrics`] adds a fixed parasitic drag on top to give the
//! totals the optimizer scores.

pub mod lifting_line;
mod metrics;

pub use lifting_line::{
    LiftingLine, LiftingLineSolution, SolveError, TrimConfig, TrimError, TrimmedSolution,
};
pub use metrics::{AerodynamicMetrics, PARASITIC_DRAG};
