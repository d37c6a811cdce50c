use std::cmp::Ordering;

use super::{Constrained, Constraint, ConstraintError};

/// Marker type enforcing `0 < x ≤ 1` on an `f64`.
///
/// The cross-entropy elite fraction uses this: zero would select nobody and
/// anything above one would select more samples than exist.
///
/// # Examples
///
/// ```
/// use wing_opt::support::constraint::PositiveFraction;
///
/// assert_eq!(PositiveFraction::new(0.2).unwrap().into_inner(), 0.2);
/// assert!(PositiveFraction::new(1.0).is_ok());
///
/// assert!(PositiveFraction::new(0.0).is_err());
/// assert!(PositiveFraction::new(1.5).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PositiveFraction;

impl PositiveFraction {
    /// Constructs `Constrained<f64, PositiveFraction>` if `0 < value ≤ 1`.
    ///
    /// # Errors
    ///
    /// - [`ConstraintError::BelowMinimum`] if less than or equal to zero.
    /// - [`ConstraintError::AboveMaximum`] if greater than one.
    /// - [`ConstraintError::NotANumber`] if the value is `NaN`.
    pub fn new(value: f64) -> Result<Constrained<f64, PositiveFraction>, ConstraintError> {
        Constrained::<f64, PositiveFraction>::new(value)
    }
}

impl Constraint<f64> for PositiveFraction {
    fn check(value: &f64) -> Result<(), ConstraintError> {
        match (value.partial_cmp(&0.0), value.partial_cmp(&1.0)) {
            (None, _) | (_, None) => Err(ConstraintError::NotANumber),
            (Some(Ordering::Less | Ordering::Equal), _) => Err(ConstraintError::BelowMinimum),
            (_, Some(Ordering::Greater)) => Err(ConstraintError::AboveMaximum),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_upper_endpoint() {
        assert!(PositiveFraction::new(1.0).is_ok());
        assert!(PositiveFraction::new(1e-9).is_ok());
    }

    #[test]
    fn rejects_out_of_range() {
        assert!(matches!(
            PositiveFraction::new(0.0),
            Err(ConstraintError::BelowMinimum)
        ));
        assert!(matches!(
            PositiveFraction::new(1.000_000_1),
            Err(ConstraintError::AboveMaximum)
        ));
        assert!(matches!(
            PositiveFraction::new(f64::NAN),
            Err(ConstraintError::NotANumber)
        ));
    }
}
