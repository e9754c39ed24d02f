use std::any::{self, Any};
use std::fmt;

use crate::error::{JutilsError, Result};

/// A value whose type is only known at runtime.
///
/// The value is boxed together with its type name and a debug rendering, so
/// it can be printed and inspected without knowing the concrete type.
pub struct Dynamic {
    value: Option<Box<dyn Any>>,
    type_name: Option<&'static str>,
    repr: String,
}

impl Dynamic {
    /// A dynamic value holding nothing.
    pub fn empty() -> Self {
        Self {
            value: None,
            type_name: None,
            repr: "null".to_string(),
        }
    }

    pub fn new<T: Any + fmt::Debug>(value: T) -> Self {
        Self {
            repr: format!("{value:?}"),
            type_name: Some(any::type_name::<T>()),
            value: Some(Box::new(value)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_none()
    }

    /// Name of the stored type, or `None` when empty.
    pub fn type_name(&self) -> Option<&'static str> {
        self.type_name
    }

    pub fn is<T: Any>(&self) -> bool {
        self.value.as_ref().is_some_and(|value| value.is::<T>())
    }

    /// Borrow the stored value as `T`.
    pub fn it<T: Any>(&self) -> Result<&T> {
        let value = self.value.as_ref().ok_or(JutilsError::EmptyValue)?;
        value.downcast_ref::<T>().ok_or_else(|| JutilsError::Cast {
            expected: any::type_name::<T>(),
            found: self.type_name.unwrap_or("()"),
        })
    }

    /// Take the stored value out as `T`, or hand the container back.
    pub fn into_inner<T: Any>(self) -> std::result::Result<T, Self> {
        match self.value {
            Some(value) => match value.downcast::<T>() {
                Ok(value) => Ok(*value),
                Err(value) => Err(Self {
                    value: Some(value),
                    ..self
                }),
            },
            None => Err(self),
        }
    }
}

impl Default for Dynamic {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Display for Dynamic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.repr)
    }
}

impl fmt::Debug for Dynamic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dynamic")
            .field("type_name", &self.type_name)
            .field("value", &self.repr)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_through_it() {
        let value = Dynamic::new(42_i64);
        assert_eq!(*value.it::<i64>().unwrap(), 42);
        assert!(value.is::<i64>());
        assert_eq!(value.type_name(), Some("i64"));
        assert_eq!(value.to_string(), "42");
    }

    #[test]
    fn test_wrong_type_is_cast_error() {
        let value = Dynamic::new("text".to_string());
        match value.it::<u8>() {
            Err(JutilsError::Cast { expected, found }) => {
                assert_eq!(expected, "u8");
                assert_eq!(found, "alloc::string::String");
            }
            other => panic!("expected cast error, got {other:?}"),
        }
    }

    #[test]
    fn test_empty() {
        let value = Dynamic::empty();
        assert!(value.is_empty());
        assert!(matches!(value.it::<i32>(), Err(JutilsError::EmptyValue)));
        assert_eq!(value.to_string(), "null");
    }

    #[test]
    fn test_into_inner() {
        let value = Dynamic::new(vec![1, 2]);
        let value = value.into_inner::<String>().unwrap_err();
        assert_eq!(value.into_inner::<Vec<i32>>().unwrap(), vec![1, 2]);
    }
}
