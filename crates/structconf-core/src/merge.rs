//! Default-aware merge of two records.

use std::fmt;
use std::marker::PhantomData;

use tracing::{debug, trace};

use crate::codec::CodecSet;
use crate::error::{Error, Result};
use crate::field::StructField;
use crate::record::Record;
use crate::source::default_receptor;
use crate::typ::Type;
use crate::value::Value;

/// Which input a merged field was taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Winner {
    Right,
    Left,
    Zero,
}

/// Combines two records field by field, preferring values that differ
/// from the declared defaults.
///
/// For every field: the right value if it is not the default, else the left
/// value if it is not the default, else the default. Values are replaced
/// whole; nested contents are never merged.
pub struct Merger<T> {
    codecs: CodecSet,
    prefix: String,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Record> Merger<T> {
    pub fn new(prefix: impl Into<String>, codecs: CodecSet) -> Self {
        Self {
            codecs,
            prefix: prefix.into(),
            _marker: PhantomData,
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn codecs(&self) -> &CodecSet {
        &self.codecs
    }

    /// A record populated from the `default` facets alone.
    pub fn default_value(&self) -> Result<T> {
        let ty = Type::of::<T>(&self.prefix)?;
        let mut zero = T::default();
        ty.accept(&mut default_receptor(&mut zero, &self.codecs)?)?;
        Ok(zero)
    }

    pub fn merge(&self, left: &T, right: &T) -> Result<T> {
        let ty = Type::of::<T>(&self.prefix)?;
        let zero = self.default_value()?;
        debug!(record = ty.name(), "merge");

        let mut out = T::default();
        for field in ty.fields() {
            let l = read(left, &field)?;
            let r = read(right, &field)?;
            let z = read(&zero, &field)?;

            let (winner, value) = if !self.equal(&field, &r, &z)? {
                (Winner::Right, r)
            } else if !self.equal(&field, &l, &z)? {
                (Winner::Left, l)
            } else {
                (Winner::Zero, z)
            };
            trace!(field = field.name(), winner = ?winner, "merged");
            out.set_field(field.name(), value)?;
        }
        Ok(out)
    }

    /// Scalars compare by value. Other kinds use their codec; without one
    /// they count as equal, so the default is kept.
    fn equal(&self, field: &StructField, a: &Value, b: &Value) -> Result<bool> {
        if let Some(eq) = a.scalar_eq(b) {
            return Ok(eq);
        }
        let Some(codec) = self.codecs.get(field) else {
            trace!(field = field.name(), "no codec, treated as default");
            return Ok(true);
        };
        match (a, b) {
            (Value::Other(a), Value::Other(b)) => codec
                .equal(field, a, b)
                .map_err(|source| Error::any(field.name(), source)),
            _ => Ok(false),
        }
    }
}

fn read<T: Record>(record: &T, field: &StructField) -> Result<Value> {
    record.field(field.name()).ok_or_else(|| Error::UnknownField {
        record: std::any::type_name::<T>(),
        field: field.name().to_string(),
    })
}

impl<T> Clone for Merger<T> {
    fn clone(&self) -> Self {
        Self {
            codecs: self.codecs.clone(),
            prefix: self.prefix.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T> fmt::Debug for Merger<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Merger")
            .field("record", &std::any::type_name::<T>())
            .field("prefix", &self.prefix)
            .field("codecs", &self.codecs)
            .finish()
    }
}
