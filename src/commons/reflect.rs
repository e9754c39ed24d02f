//! Runtime type helpers over boxed values.

use std::any::{self, Any, TypeId};

use crate::error::{JutilsError, Result};

/// Borrow every element as `T`, failing on the first element of another type.
pub fn cast_slice<T: Any>(values: &[Box<dyn Any>]) -> Result<Vec<&T>> {
    values
        .iter()
        .map(|value| {
            value.downcast_ref::<T>().ok_or(JutilsError::Cast {
                expected: any::type_name::<T>(),
                found: "another type",
            })
        })
        .collect()
}

/// Run `action` on every element viewed as `T`.
///
/// Checks every element before running `action` on any of them.
pub fn for_each_as<T, F>(values: &[Box<dyn Any>], action: F) -> Result<()>
where
    T: Any,
    F: FnMut(&T),
{
    cast_slice::<T>(values)?.into_iter().for_each(action);
    Ok(())
}

/// Whether `T` is one of the scalar primitive types.
pub fn is_primitive<T: ?Sized + Any>() -> bool {
    let id = TypeId::of::<T>();
    [
        TypeId::of::<bool>(),
        TypeId::of::<char>(),
        TypeId::of::<i8>(),
        TypeId::of::<i16>(),
        TypeId::of::<i32>(),
        TypeId::of::<i64>(),
        TypeId::of::<i128>(),
        TypeId::of::<isize>(),
        TypeId::of::<u8>(),
        TypeId::of::<u16>(),
        TypeId::of::<u32>(),
        TypeId::of::<u64>(),
        TypeId::of::<u128>(),
        TypeId::of::<usize>(),
        TypeId::of::<f32>(),
        TypeId::of::<f64>(),
    ]
    .contains(&id)
}

/// Name of the concrete type of `value`.
pub fn type_name_of<T: ?Sized>(_value: &T) -> &'static str {
    any::type_name::<T>()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn boxed_numbers() -> Vec<Box<dyn Any>> {
        [1_u32, 2, 3]
            .into_iter()
            .map(|n| Box::new(n) as Box<dyn Any>)
            .collect()
    }

    #[test]
    fn test_cast_slice() {
        let values = boxed_numbers();
        let numbers: Vec<u32> = cast_slice::<u32>(&values)
            .unwrap()
            .into_iter()
            .copied()
            .collect();
        assert_eq!(numbers, vec![1, 2, 3]);
    }

    #[test]
    fn test_cast_slice_mixed_types_fails() {
        let mut values = boxed_numbers();
        values.push(Box::new("four"));
        assert!(matches!(
            cast_slice::<u32>(&values),
            Err(JutilsError::Cast { expected: "u32", .. })
        ));
    }

    #[test]
    fn test_for_each_as() {
        let values = boxed_numbers();
        let mut sum = 0;
        for_each_as::<u32, _>(&values, |n| sum += n).unwrap();
        assert_eq!(sum, 6);

        let mut calls = 0;
        assert!(for_each_as::<String, _>(&values, |_| calls += 1).is_err());
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_is_primitive() {
        assert!(is_primitive::<i32>());
        assert!(is_primitive::<char>());
        assert!(!is_primitive::<String>());
        assert!(!is_primitive::<str>());
    }

    #[test]
    fn test_type_name_of() {
        assert_eq!(type_name_of(&1.5_f64), "f64");
    }
}
