//! Numeric invariants checked once, at construction.
//!
//! Wing geometry and optimizer settings carry invariants that would otherwise
//! be re-checked at every call site: a chord is never negative, a population
//! is never empty, an elite fraction lies in `(0, 1]`.
//! Wrapping such values in [`Constrained<T, C>`] proves the check happened.
//!
//! # Provided constraints
//!
//! - [`NonNegative`]: Zero or greater
//! - [`StrictlyPositive`]: Greater than zero
//! - [`PositiveFraction`]: Lower-open unit interval `0 < x ≤ 1`
//!
//! All three work with plain numbers and with [`uom`] quantities:
//!
//! ```
//! use uom::si::{f64::Length, length::meter};
//! use wing_opt::support::constraint::NonNegative;
//!
//! let chord = NonNegative::new(Length::new::<meter>(1.5)).unwrap();
//! assert_eq!(chord.as_ref().get::<meter>(), 1.5);
//!
//! assert!(NonNegative::new(Length::new::<meter>(-0.1)).is_err());
//! ```

mod non_negative;
mod positive_fraction;
mod strictly_positive;

use std::marker::PhantomData;

use thiserror::Error;

pub use non_negative::NonNegative;
pub use positive_fraction::PositiveFraction;
pub use strictly_positive::StrictlyPositive;

/// A check applied by [`Constrained::new`].
///
/// Implemented by zero-sized marker types such as [`NonNegative`].
pub trait Constraint<T> {
    /// Checks that the given value satisfies this constraint.
    ///
    /// # Errors
    ///
    /// Returns a [`ConstraintError`] if the value does not satisfy the constraint.
    fn check(value: &T) -> Result<(), ConstraintError>;
}

/// An error returned when a [`Constraint`] is violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ConstraintError {
    #[error("value must not be negative")]
    Negative,
    #[error("value must not be zero")]
    Zero,
    #[error("value is not a number")]
    NotANumber,
    #[error("value is below the minimum allowed")]
    BelowMinimum,
    #[error("value is above the maximum allowed")]
    AboveMaximum,
}

/// A value that has passed the check for constraint `C`.
///
/// # Example
///
/// ```
/// use wing_opt::support::constraint::{Constrained, StrictlyPositive};
///
/// let population = Constrained::<usize, StrictlyPositive>::new(60).unwrap();
/// assert_eq!(population.into_inner(), 60);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Constrained<T, C: Constraint<T>> {
    value: T,
    _marker: PhantomData<C>,
}

impl<T, C: Constraint<T>> Constrained<T, C> {
    /// Constructs a new constrained value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value does not satisfy the constraint.
    pub fn new(value: T) -> Result<Self, ConstraintError> {
        C::check(&value)?;
        Ok(Self {
            value,
            _marker: PhantomData,
        })
    }

    /// Consumes the wrapper and returns the inner value.
    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<T, C: Constraint<T>> AsRef<T> for Constrained<T, C> {
    fn as_ref(&self) -> &T {
        &self.value
    }
}
