use uom::si::{f64::Ratio, ratio::ratio};

use super::{Constrained, Constraint, ConstraintError};

/// Supplies 0 and 1 for types used in the closed unit interval `[0, 1]`.
pub trait UnitBounds: PartialOrd {
    fn zero() -> Self;
    fn one() -> Self;
}

impl UnitBounds for f64 {
    fn zero() -> Self {
        0.0
    }
    fn one() -> Self {
        1.0
    }
}

impl UnitBounds for Ratio {
    fn zero() -> Self {
        Ratio::new::<ratio>(0.0)
    }
    fn one() -> Self {
        Ratio::new::<ratio>(1.0)
    }
}

/// Marker type enforcing that a value lies in the closed unit interval.
///
/// Used for fractions such as the compressor heat share rejected to the
/// condenser or the heat recovery capacity fraction.
///
/// # Examples
///
/// ```
/// use plant_models::support::constraint::UnitInterval;
///
/// assert!(UnitInterval::new(1.0).is_ok());
/// assert!(UnitInterval::new(1.2).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct UnitInterval;

impl UnitInterval {
    /// Constructs a [`Constrained<T, UnitInterval>`] if `0 ≤ value ≤ 1`.
    ///
    /// # Errors
    ///
    /// Returns an error if the value lies outside the interval or is `NaN`.
    pub fn new<T: UnitBounds>(value: T) -> Result<Constrained<T, UnitInterval>, ConstraintError> {
        Constrained::<T, UnitInterval>::new(value)
    }
}

impl<T: UnitBounds> Constraint<T> for UnitInterval {
    fn check(value: &T) -> Result<(), ConstraintError> {
        match (value.partial_cmp(&T::zero()), value.partial_cmp(&T::one())) {
            (None, _) | (_, None) => Err(ConstraintError::NotANumber),
            (Some(std::cmp::Ordering::Less), _) => Err(ConstraintError::BelowMinimum),
            (_, Some(std::cmp::Ordering::Greater)) => Err(ConstraintError::AboveMaximum),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_included() {
        assert_eq!(UnitInterval::new(0.0).unwrap().into_inner(), 0.0);
        assert_eq!(UnitInterval::new(1.0).unwrap().into_inner(), 1.0);
    }

    #[test]
    fn out_of_range_fractions() {
        assert_eq!(UnitInterval::new(-0.01), Err(ConstraintError::BelowMinimum));
        assert_eq!(UnitInterval::new(1.01), Err(ConstraintError::AboveMaximum));
        assert_eq!(UnitInterval::new(f64::NAN), Err(ConstraintError::NotANumber));
    }

    #[test]
    fn ratios() {
        let frac = Ratio::new::<ratio>(0.75);
        assert!(UnitInterval::new(frac).is_ok());
    }
}
