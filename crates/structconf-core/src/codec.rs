//! Codecs for fields of unsupported kinds.
//!
//! Scalar kinds are parsed and compared natively. Any other field type
//! needs an [`AnyCodec`] to be decoded from a raw source string, rendered
//! back to a string, and compared against its default during a merge.
//! Codecs are registered in a [`CodecSet`] by Rust type or by field.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::BoxError;
use crate::field::StructField;
use crate::value::OtherValue;

/// Decode, encode and compare values of one unsupported field type.
pub trait AnyCodec: Send + Sync {
    fn decode(&self, field: &StructField, raw: &str) -> Result<OtherValue, BoxError>;

    fn encode(&self, field: &StructField, value: &OtherValue) -> Result<String, BoxError>;

    fn equal(
        &self,
        field: &StructField,
        left: &OtherValue,
        right: &OtherValue,
    ) -> Result<bool, BoxError>;
}

/// A value handed to a codec was not of the codec's type.
#[derive(Debug, thiserror::Error)]
#[error("expected a value of type {expected}, found {found}")]
pub struct DowncastError {
    pub expected: &'static str,
    pub found: &'static str,
}

fn downcast<'a, T: Any>(value: &'a OtherValue) -> Result<&'a T, DowncastError> {
    value.downcast_ref::<T>().ok_or(DowncastError {
        expected: std::any::type_name::<T>(),
        found: value.type_name(),
    })
}

/// Codec for any serde type, using JSON as the raw string form.
pub struct JsonCodec<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> JsonCodec<T> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for JsonCodec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for JsonCodec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "JsonCodec<{}>", std::any::type_name::<T>())
    }
}

impl<T> AnyCodec for JsonCodec<T>
where
    T: Serialize + DeserializeOwned + PartialEq + Send + Sync + 'static,
{
    fn decode(&self, _field: &StructField, raw: &str) -> Result<OtherValue, BoxError> {
        let value: T = serde_json::from_str(raw)?;
        Ok(OtherValue::new(value))
    }

    fn encode(&self, _field: &StructField, value: &OtherValue) -> Result<String, BoxError> {
        Ok(serde_json::to_string(downcast::<T>(value)?)?)
    }

    fn equal(
        &self,
        _field: &StructField,
        left: &OtherValue,
        right: &OtherValue,
    ) -> Result<bool, BoxError> {
        Ok(downcast::<T>(left)? == downcast::<T>(right)?)
    }
}

type DecodeFn<T> = dyn Fn(&str) -> Result<T, BoxError> + Send + Sync;
type EncodeFn<T> = dyn Fn(&T) -> String + Send + Sync;
type EqualFn<T> = dyn Fn(&T, &T) -> bool + Send + Sync;

/// Codec assembled from three closures.
pub struct FnCodec<T> {
    decode: Box<DecodeFn<T>>,
    encode: Box<EncodeFn<T>>,
    equal: Box<EqualFn<T>>,
}

impl<T> FnCodec<T> {
    pub fn new(
        decode: impl Fn(&str) -> Result<T, BoxError> + Send + Sync + 'static,
        encode: impl Fn(&T) -> String + Send + Sync + 'static,
        equal: impl Fn(&T, &T) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            decode: Box::new(decode),
            encode: Box::new(encode),
            equal: Box::new(equal),
        }
    }
}

impl<T> fmt::Debug for FnCodec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FnCodec<{}>", std::any::type_name::<T>())
    }
}

impl<T: Send + Sync + 'static> AnyCodec for FnCodec<T> {
    fn decode(&self, _field: &StructField, raw: &str) -> Result<OtherValue, BoxError> {
        Ok(OtherValue::new((self.decode)(raw)?))
    }

    fn encode(&self, _field: &StructField, value: &OtherValue) -> Result<String, BoxError> {
        Ok((self.encode)(downcast::<T>(value)?))
    }

    fn equal(
        &self,
        _field: &StructField,
        left: &OtherValue,
        right: &OtherValue,
    ) -> Result<bool, BoxError> {
        Ok((self.equal)(downcast::<T>(left)?, downcast::<T>(right)?))
    }
}

/// Codecs by field identifier and by Rust type.
///
/// A codec registered for a field wins over one registered for its type.
#[derive(Clone, Default)]
pub struct CodecSet {
    by_field: HashMap<String, Arc<dyn AnyCodec>>,
    by_type: HashMap<TypeId, Arc<dyn AnyCodec>>,
}

impl CodecSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `codec` for every field of Rust type `T`.
    pub fn with_type<T: 'static>(mut self, codec: impl AnyCodec + 'static) -> Self {
        self.by_type.insert(TypeId::of::<T>(), Arc::new(codec));
        self
    }

    /// Use `codec` for the field with identifier `ident`.
    pub fn with_field(mut self, ident: impl Into<String>, codec: impl AnyCodec + 'static) -> Self {
        self.by_field.insert(ident.into(), Arc::new(codec));
        self
    }

    pub fn get(&self, field: &StructField) -> Option<&dyn AnyCodec> {
        self.by_field
            .get(field.name())
            .or_else(|| self.by_type.get(&field.type_id()))
            .map(|codec| &**codec)
    }

    pub fn is_empty(&self) -> bool {
        self.by_field.is_empty() && self.by_type.is_empty()
    }
}

impl fmt::Debug for CodecSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CodecSet")
            .field("fields", &self.by_field.keys().collect::<Vec<_>>())
            .field("types", &self.by_type.len())
            .finish()
    }
}
