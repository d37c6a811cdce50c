//! # Wing Opt
//!
//! Aerodynamic wing-shape optimization: a parametric wing, a lifting-line
//! solver, a cross-entropy optimizer, and a surface mesh builder, plus a
//! single-flight service that runs the optimizer in the background and
//! streams its progress.
//!
//! ## Crate layout
//!
//! - [`geometry`]: Baseline wing, bounded deviations, and derived geometry.
//! - [`models`]: [`twine_core::Model`] implementations (the lifting-line solver).
//! - [`optimize`]: Objectives and the cross-entropy search loop.
//! - [`service`]: Background runs, the event stream, and artifact sinks.
//! - [`support`]: Airfoil sections, numeric constraints, and meshing.
//!
//! ## Data flow
//!
//! A [`geometry::DeviationVector`] applied to a [`geometry::WingBaseline`]
//! yields [`geometry::GeometryParameters`]. The lifting-line model turns that
//! into coefficients, an [`optimize::Objective`] turns those into a score,
//! and [`optimize::run`] repeats this across populations. The best geometry
//! is meshed by [`support::mesh::build_mesh`].
//!
//! Note: Modules in [`support`] are public because they're useful on their
//! own, but their APIs are not stable.

pub mod geometry;
pub mod models;
pub mod optimize;
pub mod service;
pub mod support;
