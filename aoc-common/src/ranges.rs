//! Inclusive integer ranges with a step increment

use thiserror::Error;

/// Error type for range construction and splitting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RangeError {
    /// min must not exceed max
    #[error("range minimum {min} is greater than maximum {max}")]
    InvertedBounds { min: i64, max: i64 },
    /// increment must be at least 1
    #[error("range increment must be positive, got {0}")]
    NonPositiveIncrement(i64),
    /// split midpoints must lie strictly between min and max
    #[error("midpoint {midpoint} is not strictly inside ({min}, {max})")]
    MidpointOutOfRange { midpoint: i64, min: i64, max: i64 },
}

/// An inclusive range of integers
///
/// Immutable `[min, max]` interval stepping by `increment`. Splitting
/// produces new ranges with increment 1, matching how the solvers use
/// split ranges for interval arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IntegerRange {
    min: i64,
    max: i64,
    increment: i64,
}

impl IntegerRange {
    /// Create a range with increment 1
    ///
    /// # Errors
    /// Returns [`RangeError::InvertedBounds`] when `min > max`.
    pub fn new(min: i64, max: i64) -> Result<Self, RangeError> {
        Self::with_increment(min, max, 1)
    }

    /// Create a range with an explicit increment
    ///
    /// # Errors
    /// Returns [`RangeError::InvertedBounds`] when `min > max` and
    /// [`RangeError::NonPositiveIncrement`] when `increment <= 0`.
    pub fn with_increment(min: i64, max: i64, increment: i64) -> Result<Self, RangeError> {
        if min > max {
            return Err(RangeError::InvertedBounds { min, max });
        }
        if increment <= 0 {
            return Err(RangeError::NonPositiveIncrement(increment));
        }
        Ok(Self {
            min,
            max,
            increment,
        })
    }

    /// The range's minimum integer
    pub fn min(&self) -> i64 {
        self.min
    }

    /// The range's maximum integer
    pub fn max(&self) -> i64 {
        self.max
    }

    /// The range's increment amount
    pub fn increment(&self) -> i64 {
        self.increment
    }

    /// The range's integer count (`max - min + 1`)
    pub fn len(&self) -> i64 {
        self.max - self.min + 1
    }

    /// Always false; a valid range holds at least one integer
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Whether an integer is in `[min, max]`
    pub fn contains(&self, value: i64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Split this range and return the lower half
    ///
    /// The midpoint must lie strictly between min and max. When
    /// `include_midpoint` is set the lower half keeps the midpoint,
    /// otherwise it ends just below it.
    ///
    /// # Errors
    /// Returns [`RangeError::MidpointOutOfRange`] when `midpoint <= min`
    /// or `midpoint >= max`.
    pub fn split_lower(&self, midpoint: i64, include_midpoint: bool) -> Result<Self, RangeError> {
        self.check_midpoint(midpoint)?;
        let max = if include_midpoint {
            midpoint
        } else {
            midpoint - 1
        };
        Self::new(self.min, max)
    }

    /// Split this range and return the upper half
    ///
    /// # Errors
    /// Returns [`RangeError::MidpointOutOfRange`] when `midpoint <= min`
    /// or `midpoint >= max`.
    pub fn split_upper(&self, midpoint: i64, include_midpoint: bool) -> Result<Self, RangeError> {
        self.check_midpoint(midpoint)?;
        let min = if include_midpoint {
            midpoint
        } else {
            midpoint + 1
        };
        Self::new(min, self.max)
    }

    /// The value one increment above `current`, while it stays in range
    pub fn next_value(&self, current: i64) -> Option<i64> {
        let next = current + self.increment;
        self.contains(next).then_some(next)
    }

    /// The value one increment below `current`, while it stays in range
    pub fn previous_value(&self, current: i64) -> Option<i64> {
        let previous = current - self.increment;
        self.contains(previous).then_some(previous)
    }

    /// Iterate from min to max, stepping by the increment
    pub fn iter(&self) -> impl Iterator<Item = i64> + use<> {
        let (min, max, increment) = (self.min, self.max, self.increment);
        std::iter::successors(Some(min), move |&v| {
            let next = v + increment;
            (next <= max).then_some(next)
        })
    }

    fn check_midpoint(&self, midpoint: i64) -> Result<(), RangeError> {
        if midpoint <= self.min || midpoint >= self.max {
            return Err(RangeError::MidpointOutOfRange {
                midpoint,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

impl IntoIterator for IntegerRange {
    type Item = i64;
    type IntoIter = Box<dyn Iterator<Item = i64>>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn constructor_validates_bounds() {
        assert!(IntegerRange::new(0, 10).is_ok());
        assert!(IntegerRange::new(0, 0).is_ok());
        assert_eq!(
            IntegerRange::new(10, 0),
            Err(RangeError::InvertedBounds { min: 10, max: 0 })
        );
        assert_eq!(
            IntegerRange::with_increment(0, 10, 0),
            Err(RangeError::NonPositiveIncrement(0))
        );
        assert_eq!(
            IntegerRange::with_increment(0, 10, -1),
            Err(RangeError::NonPositiveIncrement(-1))
        );
    }

    #[test]
    fn len_and_contains() {
        let range = IntegerRange::new(0, 10).unwrap();
        assert_eq!(range.len(), 11);
        assert!(range.contains(0));
        assert!(range.contains(10));
        assert!(range.contains(5));
        assert!(!range.contains(-1));
        assert!(!range.contains(11));
    }

    #[test]
    fn iteration_respects_increment() {
        let values: Vec<i64> = IntegerRange::with_increment(0, 10, 3).unwrap().iter().collect();
        assert_eq!(values, vec![0, 3, 6, 9]);

        let values: Vec<i64> = IntegerRange::with_increment(-10, 0, 3).unwrap().iter().collect();
        assert_eq!(values, vec![-10, -7, -4, -1]);

        let values: Vec<i64> = IntegerRange::new(0, 0).unwrap().iter().collect();
        assert_eq!(values, vec![0]);
    }

    #[test]
    fn split_lower_and_upper() {
        let range = IntegerRange::new(0, 10).unwrap();

        let lower = range.split_lower(5, false).unwrap();
        assert_eq!((lower.min(), lower.max()), (0, 4));
        let lower = range.split_lower(5, true).unwrap();
        assert_eq!((lower.min(), lower.max()), (0, 5));

        let upper = range.split_upper(5, false).unwrap();
        assert_eq!((upper.min(), upper.max()), (6, 10));
        let upper = range.split_upper(5, true).unwrap();
        assert_eq!((upper.min(), upper.max()), (5, 10));
    }

    #[test]
    fn split_rejects_boundary_midpoints() {
        let range = IntegerRange::new(0, 10).unwrap();
        for midpoint in [0, 10, -1, 11] {
            assert!(range.split_lower(midpoint, false).is_err());
            assert!(range.split_upper(midpoint, false).is_err());
        }
    }

    #[test]
    fn stepping_stays_in_range() {
        let range = IntegerRange::new(0, 10).unwrap();
        assert_eq!(range.next_value(9), Some(10));
        assert_eq!(range.next_value(10), None);
        assert_eq!(range.previous_value(1), Some(0));
        assert_eq!(range.previous_value(0), None);

        let stepped = IntegerRange::with_increment(0, 10, 4).unwrap();
        assert_eq!(stepped.next_value(4), Some(8));
        assert_eq!(stepped.next_value(8), None);
    }

    proptest! {
        /// exclusive lower half + exclusive upper half + midpoint cover the range
        #[test]
        fn prop_split_partitions_range(min in -500i64..500, span in 2i64..500, offset in 1i64..500) {
            let max = min + span;
            let midpoint = min + 1 + (offset % (span - 1));
            let range = IntegerRange::new(min, max).unwrap();

            let lower = range.split_lower(midpoint, false).unwrap();
            let upper = range.split_upper(midpoint, false).unwrap();
            prop_assert_eq!(lower.len() + upper.len() + 1, range.len());

            // inclusive halves overlap the midpoint once each
            let lower_inc = range.split_lower(midpoint, true).unwrap();
            let upper_inc = range.split_upper(midpoint, true).unwrap();
            prop_assert_eq!(lower_inc.len() + upper_inc.len(), range.len() + 1);
        }
    }
}
