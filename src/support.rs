//! Building blocks shared across the crate.
//!
//! These are public because they are useful on their own (an airfoil section
//! or a wing mesh is meaningful outside an optimization run), but their APIs
//! are not stable.

pub mod airfoil;
pub mod constraint;
pub mod mesh;
