//! Typed field values.
//!
//! [`Value`] is the currency between records and receptors: reading a field
//! yields one, assigning a field consumes one. Scalar kinds carry their
//! native Rust value, every other field type travels as an [`OtherValue`].

use std::any::{Any, TypeId};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::fmt;

use crate::kind::Kind;

/// A field value, tagged by kind.
#[derive(Debug)]
pub enum Value {
    Bool(bool),
    Int(isize),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Uint(usize),
    Uint8(u8),
    Uint16(u16),
    Uint32(u32),
    Uint64(u64),
    Float32(f32),
    Float64(f64),
    String(String),
    Other(OtherValue),
}

impl Value {
    pub fn kind(&self) -> Kind {
        match self {
            Value::Bool(_) => Kind::Bool,
            Value::Int(_) => Kind::Int,
            Value::Int8(_) => Kind::Int8,
            Value::Int16(_) => Kind::Int16,
            Value::Int32(_) => Kind::Int32,
            Value::Int64(_) => Kind::Int64,
            Value::Uint(_) => Kind::Uint,
            Value::Uint8(_) => Kind::Uint8,
            Value::Uint16(_) => Kind::Uint16,
            Value::Uint32(_) => Kind::Uint32,
            Value::Uint64(_) => Kind::Uint64,
            Value::Float32(_) => Kind::Float32,
            Value::Float64(_) => Kind::Float64,
            Value::String(_) => Kind::String,
            Value::Other(_) => Kind::Other,
        }
    }

    /// Compares two scalar values.
    ///
    /// Returns `None` when either side is [`Value::Other`]; those need a
    /// codec to compare. Scalars of different kinds are never equal.
    pub fn scalar_eq(&self, other: &Value) -> Option<bool> {
        let eq = match (self, other) {
            (Value::Other(_), _) | (_, Value::Other(_)) => return None,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Int8(a), Value::Int8(b)) => a == b,
            (Value::Int16(a), Value::Int16(b)) => a == b,
            (Value::Int32(a), Value::Int32(b)) => a == b,
            (Value::Int64(a), Value::Int64(b)) => a == b,
            (Value::Uint(a), Value::Uint(b)) => a == b,
            (Value::Uint8(a), Value::Uint8(b)) => a == b,
            (Value::Uint16(a), Value::Uint16(b)) => a == b,
            (Value::Uint32(a), Value::Uint32(b)) => a == b,
            (Value::Uint64(a), Value::Uint64(b)) => a == b,
            (Value::Float32(a), Value::Float32(b)) => a == b,
            (Value::Float64(a), Value::Float64(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            _ => false,
        };
        Some(eq)
    }
}

/// A type-erased value of an unsupported kind.
pub struct OtherValue {
    inner: Box<dyn Any + Send + Sync>,
    type_name: &'static str,
}

impl OtherValue {
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            inner: Box::new(value),
            type_name: std::any::type_name::<T>(),
        }
    }

    /// Rust type name of the wrapped value.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn type_id(&self) -> TypeId {
        (*self.inner).type_id()
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }

    /// Unwraps the value, handing `self` back on a type mismatch.
    pub fn downcast<T: Any>(self) -> Result<T, Self> {
        let type_name = self.type_name;
        match self.inner.downcast::<T>() {
            Ok(value) => Ok(*value),
            Err(inner) => Err(Self { inner, type_name }),
        }
    }
}

impl fmt::Debug for OtherValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OtherValue")
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}

/// A Rust type usable as a record field.
///
/// Scalars override every item. Any other `Clone + Send + Sync` type can opt
/// in with an empty impl and is then handled as [`Kind::Other`]:
///
/// ```
/// #[derive(Clone, Default)]
/// struct Endpoint {
///     host: String,
/// }
///
/// impl structconf_core::FieldValue for Endpoint {}
/// ```
pub trait FieldValue: Clone + Send + Sync + 'static {
    const KIND: Kind = Kind::Other;

    fn to_value(&self) -> Value {
        Value::Other(OtherValue::new(self.clone()))
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Other(other) => other.downcast::<Self>().ok(),
            _ => None,
        }
    }
}

/// One of the fourteen scalar field types.
pub trait Scalar: FieldValue + Default + PartialEq + fmt::Display {
    /// Strictly parses a raw source string.
    fn parse_scalar(raw: &str) -> Result<Self, String>;
}

/// Parses a boolean literal: `1 t T TRUE true True 0 f F FALSE false False`.
pub fn parse_bool(raw: &str) -> Result<bool, String> {
    match raw {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err("invalid syntax".to_string()),
    }
}

macro_rules! scalar {
    ($ty:ty, $kind:ident, $parse:expr) => {
        impl FieldValue for $ty {
            const KIND: Kind = Kind::$kind;

            fn to_value(&self) -> Value {
                Value::$kind(self.clone())
            }

            fn from_value(value: Value) -> Option<Self> {
                match value {
                    Value::$kind(v) => Some(v),
                    _ => None,
                }
            }
        }

        impl Scalar for $ty {
            fn parse_scalar(raw: &str) -> Result<Self, String> {
                $parse(raw)
            }
        }
    };
}

fn parse_signed<T>(raw: &str) -> Result<T, String>
where
    T: std::str::FromStr<Err = std::num::ParseIntError>,
{
    raw.parse::<T>().map_err(|e| e.to_string())
}

fn parse_unsigned<T>(raw: &str) -> Result<T, String>
where
    T: std::str::FromStr<Err = std::num::ParseIntError>,
{
    if raw.starts_with('+') {
        return Err("invalid digit found in string".to_string());
    }
    raw.parse::<T>().map_err(|e| e.to_string())
}

fn parse_float<T>(raw: &str) -> Result<T, String>
where
    T: std::str::FromStr<Err = std::num::ParseFloatError>,
{
    raw.parse::<T>().map_err(|e| e.to_string())
}

scalar!(bool, Bool, parse_bool);
scalar!(isize, Int, parse_signed::<isize>);
scalar!(i8, Int8, parse_signed::<i8>);
scalar!(i16, Int16, parse_signed::<i16>);
scalar!(i32, Int32, parse_signed::<i32>);
scalar!(i64, Int64, parse_signed::<i64>);
scalar!(usize, Uint, parse_unsigned::<usize>);
scalar!(u8, Uint8, parse_unsigned::<u8>);
scalar!(u16, Uint16, parse_unsigned::<u16>);
scalar!(u32, Uint32, parse_unsigned::<u32>);
scalar!(u64, Uint64, parse_unsigned::<u64>);
scalar!(f32, Float32, parse_float::<f32>);
scalar!(f64, Float64, parse_float::<f64>);
scalar!(String, String, |raw: &str| Ok::<_, String>(raw.to_string()));

impl<T: Clone + Send + Sync + 'static> FieldValue for Vec<T> {}
impl<T: Clone + Send + Sync + 'static> FieldValue for Option<T> {}
impl<K, V> FieldValue for BTreeMap<K, V>
where
    K: Clone + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
}
impl<K, V> FieldValue for HashMap<K, V>
where
    K: Clone + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
}
impl<T: Clone + Send + Sync + 'static> FieldValue for BTreeSet<T> {}
impl<T: Clone + Send + Sync + 'static> FieldValue for HashSet<T> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bool_literals() {
        for raw in ["1", "t", "T", "TRUE", "true", "True"] {
            assert_eq!(parse_bool(raw), Ok(true), "{raw}");
        }
        for raw in ["0", "f", "F", "FALSE", "false", "False"] {
            assert_eq!(parse_bool(raw), Ok(false), "{raw}");
        }
        assert!(parse_bool("yes").is_err());
        assert!(parse_bool("").is_err());
    }

    #[test]
    fn test_parse_is_strict() {
        assert_eq!(i8::parse_scalar("-128"), Ok(-128));
        assert!(i8::parse_scalar("128").is_err());
        assert!(u8::parse_scalar("-1").is_err());
        assert!(u16::parse_scalar("+1").is_err());
        assert_eq!(i32::parse_scalar("+7"), Ok(7));
        assert!(i64::parse_scalar("0x10").is_err());
        assert!(isize::parse_scalar("1.5").is_err());
        assert_eq!(f32::parse_scalar("1.1"), Ok(1.1));
        assert!(f64::parse_scalar("one").is_err());
        assert_eq!(String::parse_scalar(""), Ok(String::new()));
    }

    #[test]
    fn test_scalar_round_trip_through_value() {
        let v = 42u16.to_value();
        assert_eq!(v.kind(), Kind::Uint16);
        assert_eq!(u16::from_value(v), Some(42));
        assert_eq!(u32::from_value(7u16.to_value()), None);
    }

    #[test]
    fn test_scalar_eq() {
        assert_eq!(Value::Int8(1).scalar_eq(&Value::Int8(1)), Some(true));
        assert_eq!(Value::Int8(1).scalar_eq(&Value::Int16(1)), Some(false));
        let other = vec![1].to_value();
        assert_eq!(other.scalar_eq(&Value::Bool(true)), None);
    }

    #[test]
    fn test_other_value_downcast() {
        let v = vec![1, 2, 3].to_value();
        assert_eq!(v.kind(), Kind::Other);
        let Value::Other(other) = v else {
            panic!("expected Other");
        };
        assert_eq!(other.type_id(), TypeId::of::<Vec<i32>>());
        assert_eq!(other.downcast_ref::<Vec<i32>>(), Some(&vec![1, 2, 3]));
        let other = other.downcast::<Vec<u8>>().unwrap_err();
        assert_eq!(other.downcast::<Vec<i32>>().ok(), Some(vec![1, 2, 3]));
    }
}
