//! Math helper free functions

/// The greatest common factor of two numbers
///
/// Euclid's algorithm over absolute values; `gcd(0, 0)` is 0.
pub fn gcd(a: i64, b: i64) -> i64 {
    let (mut a, mut b) = (a.abs(), b.abs());
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// The least common multiple of two numbers
pub fn lcm(a: i64, b: i64) -> i64 {
    let (a, b) = (a.abs(), b.abs());
    if a == 0 || b == 0 {
        return 0;
    }
    a / gcd(a, b) * b
}

/// The greatest common factor over a sequence of numbers
///
/// An empty sequence yields 0; a singleton yields its element.
pub fn gcd_all(values: impl IntoIterator<Item = i64>) -> i64 {
    values.into_iter().fold(0, gcd)
}

/// The least common multiple over a sequence of numbers
///
/// An empty sequence yields 0; a singleton yields its element.
pub fn lcm_all(values: impl IntoIterator<Item = i64>) -> i64 {
    let mut iter = values.into_iter();
    let Some(first) = iter.next() else {
        return 0;
    };
    iter.fold(first.abs(), lcm)
}

/// The minimum and maximum of two values, in that order
pub fn min_max(a: i64, b: i64) -> (i64, i64) {
    if a < b { (a, b) } else { (b, a) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn gcd_known_values() {
        assert_eq!(gcd(12, 18), 6);
        assert_eq!(gcd(18, 12), 6);
        assert_eq!(gcd(-12, 18), 6);
        assert_eq!(gcd(12, -18), 6);
        assert_eq!(gcd(7, 13), 1);
        assert_eq!(gcd(0, 5), 5);
        assert_eq!(gcd(5, 0), 5);
        assert_eq!(gcd(0, 0), 0);
    }

    #[test]
    fn lcm_known_values() {
        assert_eq!(lcm(4, 6), 12);
        assert_eq!(lcm(-4, 6), 12);
        assert_eq!(lcm(7, 13), 91);
        assert_eq!(lcm(0, 5), 0);
    }

    #[test]
    fn folded_variants() {
        assert_eq!(gcd_all([12, 18, 24]), 6);
        assert_eq!(lcm_all([2, 3, 4]), 12);
        assert_eq!(gcd_all([]), 0);
        assert_eq!(lcm_all([]), 0);
        assert_eq!(gcd_all([42]), 42);
        assert_eq!(lcm_all([42]), 42);
    }

    #[test]
    fn min_max_orders_pairs() {
        assert_eq!(min_max(3, 7), (3, 7));
        assert_eq!(min_max(7, 3), (3, 7));
        assert_eq!(min_max(5, 5), (5, 5));
        assert_eq!(min_max(-1, -9), (-9, -1));
    }

    proptest! {
        /// gcd(a,b) * lcm(a,b) == |a*b| for nonzero a, b
        #[test]
        fn prop_gcd_lcm_product(a in -10_000i64..10_000, b in -10_000i64..10_000) {
            prop_assume!(a != 0 && b != 0);
            prop_assert_eq!(gcd(a, b) * lcm(a, b), (a * b).abs());
        }

        /// gcd divides both arguments
        #[test]
        fn prop_gcd_divides(a in -10_000i64..10_000, b in -10_000i64..10_000) {
            prop_assume!(a != 0 || b != 0);
            let g = gcd(a, b);
            prop_assert!(g > 0);
            prop_assert_eq!(a % g, 0);
            prop_assert_eq!(b % g, 0);
        }
    }
}
