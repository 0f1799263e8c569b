//! Raw string to scalar conversion.

use crate::error::{Error, Result};
use crate::field::StructField;
use crate::value::Scalar;

/// Turns an extracted raw string into a typed scalar.
pub trait Converter {
    fn convert<T: Scalar>(&self, field: &StructField, raw: &str) -> Result<T>;
}

impl<C: Converter + ?Sized> Converter for &C {
    fn convert<T: Scalar>(&self, field: &StructField, raw: &str) -> Result<T> {
        (**self).convert::<T>(field, raw)
    }
}

/// Strict decimal parsing shared by every string-backed source.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScalarConverter;

impl Converter for ScalarConverter {
    fn convert<T: Scalar>(&self, field: &StructField, raw: &str) -> Result<T> {
        T::parse_scalar(raw).map_err(|reason| Error::Conversion {
            field: field.name().to_string(),
            kind: T::KIND,
            raw: raw.to_string(),
            reason,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldSpec;
    use crate::kind::Kind;
    use crate::tag::RawTag;

    fn field() -> StructField {
        StructField::new(FieldSpec::of::<u8>("level", RawTag::default()), "")
    }

    #[test]
    fn test_convert_ok() {
        let v: u8 = ScalarConverter.convert(&field(), "12").unwrap();
        assert_eq!(v, 12);
    }

    #[test]
    fn test_convert_error_names_field() {
        let err = ScalarConverter.convert::<u8>(&field(), "256").unwrap_err();
        match err {
            Error::Conversion { field, kind, raw, .. } => {
                assert_eq!(field, "level");
                assert_eq!(kind, Kind::Uint8);
                assert_eq!(raw, "256");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
