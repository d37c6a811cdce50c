use std::{cmp::Ordering, marker::PhantomData, ops::Mul};

use num_traits::Zero;

use super::{Constrained, Constraint, ConstraintError, StrictlyPositive};

/// Marker type enforcing that a value is zero or greater.
///
/// Span, chords, and winglet height are stored as
/// `Constrained<Length, NonNegative>` so a negative dimension can't exist.
///
/// # Examples
///
/// ```
/// use wing_opt::support::constraint::{Constrained, NonNegative};
///
/// let x = Constrained::<_, NonNegative>::new(5).unwrap();
/// assert_eq!(x.into_inner(), 5);
///
/// let y = NonNegative::new(0.0).unwrap();
/// assert_eq!(y.into_inner(), 0.0);
///
/// assert!(NonNegative::new(-7).is_err());
/// assert!(NonNegative::new(f64::NAN).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct NonNegative;

impl NonNegative {
    /// Constructs a [`Constrained<T, NonNegative>`] if the value is non-negative.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is negative or not a number (`NaN`).
    pub fn new<T: PartialOrd + Zero>(
        value: T,
    ) -> Result<Constrained<T, NonNegative>, ConstraintError> {
        Constrained::<T, NonNegative>::new(value)
    }

    /// Returns zero as a non-negative constrained value.
    #[must_use]
    pub fn zero<T: PartialOrd + Zero>() -> Constrained<T, NonNegative> {
        Constrained {
            value: T::zero(),
            _marker: PhantomData,
        }
    }
}

impl<T: PartialOrd + Zero> Constraint<T> for NonNegative {
    fn check(value: &T) -> Result<(), ConstraintError> {
        match value.partial_cmp(&T::zero()) {
            Some(Ordering::Greater | Ordering::Equal) => Ok(()),
            Some(Ordering::Less) => Err(ConstraintError::Negative),
            None => Err(ConstraintError::NotANumber),
        }
    }
}

/// Scales a non-negative value by a strictly positive factor.
///
/// The product of a non-negative and a positive number stays non-negative,
/// which is what lets a multiplicative wing deviation skip re-validation.
///
/// # Panics
///
/// Panics in debug builds if the product is unexpectedly negative.
impl<T> Mul<Constrained<f64, StrictlyPositive>> for Constrained<T, NonNegative>
where
    T: Mul<f64, Output = T> + PartialOrd + Zero,
{
    type Output = Self;

    fn mul(self, factor: Constrained<f64, StrictlyPositive>) -> Self {
        let value = self.value * factor.into_inner();
        debug_assert!(
            value.partial_cmp(&T::zero()) != Some(Ordering::Less),
            "Scaling produced a negative value, violating NonNegative bound invariant"
        );
        Self {
            value,
            _marker: PhantomData,
        }
    }
}
