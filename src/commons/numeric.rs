/// Every integer from `min_incl` to `max_incl`, both ends included.
///
/// Returns an empty vector when `min_incl >= max_incl`.
pub fn range(min_incl: i32, max_incl: i32) -> Vec<i32> {
    if min_incl >= max_incl {
        return Vec::new();
    }
    (min_incl..=max_incl).collect()
}

/// Narrow to `i32`, saturating at the type's bounds.
pub fn safe_int(value: i64) -> i32 {
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// True when every flag is set. Vacuously true for an empty slice.
pub fn all(flags: &[bool]) -> bool {
    flags.iter().all(|flag| *flag)
}

/// True when at least one flag is set.
pub fn any(flags: &[bool]) -> bool {
    flags.iter().any(|flag| *flag)
}

/// The larger of two values; `a` on ties or when they are unordered.
pub fn max<T: PartialOrd>(a: T, b: T) -> T {
    if b > a {
        b
    } else {
        a
    }
}

/// The smaller of two values; `a` on ties or when they are unordered.
pub fn min<T: PartialOrd>(a: T, b: T) -> T {
    if b < a {
        b
    } else {
        a
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_inclusive() {
        assert_eq!(range(1, 4), vec![1, 2, 3, 4]);
        assert_eq!(range(-2, 0), vec![-2, -1, 0]);
    }

    #[test]
    fn test_range_empty_when_not_increasing() {
        assert!(range(3, 3).is_empty());
        assert!(range(5, 1).is_empty());
    }

    #[test]
    fn test_safe_int_saturates() {
        assert_eq!(safe_int(42), 42);
        assert_eq!(safe_int(i64::MAX), i32::MAX);
        assert_eq!(safe_int(i64::MIN), i32::MIN);
    }

    #[test]
    fn test_all_any() {
        assert!(all(&[true, true]));
        assert!(!all(&[true, false]));
        assert!(all(&[]));
        assert!(any(&[false, true]));
        assert!(!any(&[]));
    }

    #[test]
    fn test_min_max() {
        assert_eq!(max(3, 7), 7);
        assert_eq!(min(3, 7), 3);
        assert_eq!(max(2.5, -1.0), 2.5);
        assert_eq!(min("b", "a"), "a");
    }
}
