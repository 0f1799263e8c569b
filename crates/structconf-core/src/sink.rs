//! The assignment sink shared by the default, environment and flag sources.

use tracing::{trace, warn};

use crate::codec::CodecSet;
use crate::error::{Error, Result};
use crate::field::StructField;
use crate::pair::{Parsed, TypedReceptor};
use crate::record::{Record, Shape};
use crate::value::{Scalar, Value};

/// Writes converted values into a borrowed record.
pub struct FieldSetter<'a, R> {
    target: &'a mut R,
    codecs: &'a CodecSet,
}

impl<'a, R: Record> FieldSetter<'a, R> {
    /// Fails with [`Error::NotStructPointer`] when `R` has no fields to assign.
    pub fn new(target: &'a mut R, codecs: &'a CodecSet) -> Result<Self> {
        if let Shape::Opaque { type_name } = R::shape() {
            return Err(Error::NotStructPointer { type_name });
        }
        Ok(Self { target, codecs })
    }

    fn assign(&mut self, field: &StructField, value: Value) -> Result<()> {
        trace!(field = field.name(), kind = %field.kind(), "assign");
        self.target.set_field(field.name(), value)
    }
}

impl<R: Record> TypedReceptor for FieldSetter<'_, R> {
    fn scalar<T: Scalar>(&mut self, field: &StructField, value: Parsed<T>) -> Result<()> {
        self.assign(field, value.into_value().to_value())
    }

    fn any(&mut self, field: &StructField, raw: Parsed<String>) -> Result<()> {
        let Parsed::Value(raw) = raw else {
            return Ok(());
        };
        let Some(codec) = self.codecs.get(field) else {
            warn!(
                field = field.name(),
                type_name = field.type_name(),
                "no codec registered, field left unchanged"
            );
            return Ok(());
        };
        let value = codec
            .decode(field, &raw)
            .map_err(|source| Error::any(field.name(), source))?;
        self.assign(field, Value::Other(value))
    }
}
