//! Aerodynamic models.
//!
//! Each model exposes a [`twine_core::Model`] implementation that maps a wing
//! geometry to a solution, so it can be driven by `twine_solvers` the same
//! way it is driven by the optimizer.
//!
//! # Organization
//!
//! Models are grouped by domain. Only `aero` exists today.
//!
//! # Model structure
//!
//! The `Model` implementation is a thin adapter; the numerical work lives in
//! a private `solve` submodule next to it, and higher-level helpers (such as
//! trimming to a target lift coefficient) are built on top of the adapter.

pub mod aero;
