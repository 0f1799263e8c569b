//! Extraction, conversion and assignment of one field.
//!
//! A [`ParsePair`] couples an [`Extract`] (field to raw string), a
//! [`Converter`] (raw string to typed value) and a [`TypedReceptor`] sink.
//! It implements [`Receptor`], so a [`Type`](crate::Type) can drive it over
//! every field of a record.

use tracing::trace;

use crate::convert::Converter;
use crate::error::Result;
use crate::field::StructField;
use crate::receptor::Receptor;
use crate::value::Scalar;

/// Outcome of extracting a raw value from a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extracted {
    /// A raw value to convert.
    Found(String),
    /// No value, but the sink still sees the field with the zero value.
    Zero,
    /// Leave the field alone.
    Skip,
}

/// What the sink receives.
#[derive(Debug, Clone, PartialEq)]
pub enum Parsed<T> {
    Value(T),
    /// The source had nothing for this field.
    Zero,
}

impl<T: Default> Parsed<T> {
    pub fn into_value(self) -> T {
        match self {
            Parsed::Value(v) => v,
            Parsed::Zero => T::default(),
        }
    }
}

/// Pulls a raw value out of a field.
pub trait Extract {
    fn extract(&self, field: &StructField) -> Result<Extracted>;
}

impl<F> Extract for F
where
    F: Fn(&StructField) -> Result<Extracted>,
{
    fn extract(&self, field: &StructField) -> Result<Extracted> {
        self(field)
    }
}

/// Accepts converted values.
pub trait TypedReceptor {
    fn scalar<T: Scalar>(&mut self, field: &StructField, value: Parsed<T>) -> Result<()>;

    /// Fields of [`Kind::Other`](crate::Kind::Other) arrive as their raw string.
    fn any(&mut self, field: &StructField, raw: Parsed<String>) -> Result<()>;
}

/// One failable extract / convert / accept step per field.
#[derive(Debug, Clone)]
pub struct ParsePair<E, C, S> {
    extract: E,
    converter: C,
    sink: S,
}

impl<E, C, S> ParsePair<E, C, S>
where
    E: Extract,
    C: Converter,
    S: TypedReceptor,
{
    pub fn new(extract: E, converter: C, sink: S) -> Self {
        Self {
            extract,
            converter,
            sink,
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    fn parse<T: Scalar>(&self, field: &StructField) -> Result<Option<Parsed<T>>> {
        match self.extract.extract(field)? {
            Extracted::Found(raw) => {
                let value = self.converter.convert::<T>(field, &raw)?;
                Ok(Some(Parsed::Value(value)))
            }
            Extracted::Zero => Ok(Some(Parsed::Zero)),
            Extracted::Skip => {
                trace!(field = field.name(), "skipped");
                Ok(None)
            }
        }
    }

    /// Process a scalar field of type `T`.
    pub fn try_scalar<T: Scalar>(&mut self, field: &StructField) -> Result<()> {
        match self.parse::<T>(field)? {
            Some(parsed) => self.sink.scalar(field, parsed),
            None => Ok(()),
        }
    }

    /// Process a field of an unsupported kind.
    pub fn try_any(&mut self, field: &StructField) -> Result<()> {
        match self.parse::<String>(field)? {
            Some(parsed) => self.sink.any(field, parsed),
            None => Ok(()),
        }
    }
}

impl<E, C, S> Receptor for ParsePair<E, C, S>
where
    E: Extract,
    C: Converter,
    S: TypedReceptor,
{
    fn bool(&mut self, field: &StructField) -> Result<()> {
        self.try_scalar::<bool>(field)
    }

    fn int(&mut self, field: &StructField) -> Result<()> {
        self.try_scalar::<isize>(field)
    }

    fn int8(&mut self, field: &StructField) -> Result<()> {
        self.try_scalar::<i8>(field)
    }

    fn int16(&mut self, field: &StructField) -> Result<()> {
        self.try_scalar::<i16>(field)
    }

    fn int32(&mut self, field: &StructField) -> Result<()> {
        self.try_scalar::<i32>(field)
    }

    fn int64(&mut self, field: &StructField) -> Result<()> {
        self.try_scalar::<i64>(field)
    }

    fn uint(&mut self, field: &StructField) -> Result<()> {
        self.try_scalar::<usize>(field)
    }

    fn uint8(&mut self, field: &StructField) -> Result<()> {
        self.try_scalar::<u8>(field)
    }

    fn uint16(&mut self, field: &StructField) -> Result<()> {
        self.try_scalar::<u16>(field)
    }

    fn uint32(&mut self, field: &StructField) -> Result<()> {
        self.try_scalar::<u32>(field)
    }

    fn uint64(&mut self, field: &StructField) -> Result<()> {
        self.try_scalar::<u64>(field)
    }

    fn float32(&mut self, field: &StructField) -> Result<()> {
        self.try_scalar::<f32>(field)
    }

    fn float64(&mut self, field: &StructField) -> Result<()> {
        self.try_scalar::<f64>(field)
    }

    fn string(&mut self, field: &StructField) -> Result<()> {
        self.try_scalar::<String>(field)
    }

    fn any(&mut self, field: &StructField) -> Result<()> {
        self.try_any(field)
    }
}
