//! Field descriptors.

use std::any::TypeId;

use crate::kind::Kind;
use crate::tag::{RawTag, Tag};
use crate::value::FieldValue;

/// Static metadata of one declared field, as reported by a [`Record`](crate::Record).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub ident: &'static str,
    pub kind: Kind,
    pub type_id: TypeId,
    pub type_name: &'static str,
    pub tag: RawTag,
}

impl FieldSpec {
    /// Describe a field of Rust type `V`.
    pub fn of<V: FieldValue>(ident: &'static str, tag: RawTag) -> Self {
        Self {
            ident,
            kind: V::KIND,
            type_id: TypeId::of::<V>(),
            type_name: std::any::type_name::<V>(),
            tag,
        }
    }
}

/// A field as seen by receptors: identifier, kind and prefixed tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructField {
    name: &'static str,
    kind: Kind,
    type_id: TypeId,
    type_name: &'static str,
    tag: Tag,
}

impl StructField {
    pub fn new(spec: FieldSpec, prefix: &str) -> Self {
        Self {
            name: spec.ident,
            kind: spec.kind,
            type_id: spec.type_id,
            type_name: spec.type_name,
            tag: Tag::new(spec.tag, prefix),
        }
    }

    /// Field identifier.
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn tag(&self) -> &Tag {
        &self.tag
    }

    /// Rust type of the field; used to route unsupported kinds to a codec.
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}
