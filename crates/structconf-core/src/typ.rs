//! Type descriptor: the ordered fields of a record type.

use crate::error::{Error, Result};
use crate::field::{FieldSpec, StructField};
use crate::receptor::{call, Receptor};
use crate::record::{Record, Shape};

/// Metadata of a record type.
#[derive(Debug, Clone)]
pub struct Type {
    name: &'static str,
    specs: Vec<FieldSpec>,
    prefix: String,
}

impl Type {
    /// Introspect `T`; `prefix` is applied to every tag key.
    pub fn of<T: Record>(prefix: &str) -> Result<Self> {
        let name = std::any::type_name::<T>();
        match T::shape() {
            Shape::Struct(specs) => Ok(Self {
                name,
                specs,
                prefix: prefix.to_string(),
            }),
            Shape::Opaque { type_name } => Err(Error::NotStruct { type_name }),
        }
    }

    /// Name of the record type.
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Descriptors of all fields, in declaration order.
    pub fn fields(&self) -> Vec<StructField> {
        self.specs
            .iter()
            .cloned()
            .map(|spec| StructField::new(spec, &self.prefix))
            .collect()
    }

    /// [`call`] `receptor` on every field, stopping at the first error.
    pub fn accept<R: Receptor + ?Sized>(&self, receptor: &mut R) -> Result<()> {
        for field in self.fields() {
            call(receptor, &field)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::Kind;

    crate::record! {
        #[derive(Debug, Default)]
        struct Pair {
            #[tag(r#"xname:"left""#)]
            left: u8,
            right: f64,
        }
    }

    #[test]
    fn test_fields() {
        let ty = Type::of::<Pair>("x").unwrap();
        let fields = ty.fields();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].name(), "left");
        assert_eq!(fields[0].kind(), Kind::Uint8);
        assert_eq!(fields[0].tag().name(), Some("left".to_string()));
        assert_eq!(fields[1].kind(), Kind::Float64);
        assert!(ty.name().ends_with("Pair"));
    }

    #[test]
    fn test_not_struct() {
        let err = Type::of::<String>("").unwrap_err();
        assert!(matches!(err, Error::NotStruct { .. }));
    }
}
