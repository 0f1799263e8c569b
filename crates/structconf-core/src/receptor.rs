//! Kind-based dispatch of fields to receptors.

use crate::error::Result;
use crate::field::StructField;
use crate::kind::Kind;

/// Accepts [`StructField`]s, one handler per kind.
///
/// [`Receptor::any`] receives every field whose kind is [`Kind::Other`].
pub trait Receptor {
    fn bool(&mut self, field: &StructField) -> Result<()>;
    fn int(&mut self, field: &StructField) -> Result<()>;
    fn int8(&mut self, field: &StructField) -> Result<()>;
    fn int16(&mut self, field: &StructField) -> Result<()>;
    fn int32(&mut self, field: &StructField) -> Result<()>;
    fn int64(&mut self, field: &StructField) -> Result<()>;
    fn uint(&mut self, field: &StructField) -> Result<()>;
    fn uint8(&mut self, field: &StructField) -> Result<()>;
    fn uint16(&mut self, field: &StructField) -> Result<()>;
    fn uint32(&mut self, field: &StructField) -> Result<()>;
    fn uint64(&mut self, field: &StructField) -> Result<()>;
    fn float32(&mut self, field: &StructField) -> Result<()>;
    fn float64(&mut self, field: &StructField) -> Result<()>;
    fn string(&mut self, field: &StructField) -> Result<()>;
    fn any(&mut self, field: &StructField) -> Result<()>;
}

/// Handler signature selected by [`switch`].
pub type Handler<R> = fn(&mut R, &StructField) -> Result<()>;

/// Choose the handler of `R` for `kind`.
pub fn switch<R: Receptor + ?Sized>(kind: Kind) -> Handler<R> {
    match kind {
        Kind::Bool => R::bool,
        Kind::Int => R::int,
        Kind::Int8 => R::int8,
        Kind::Int16 => R::int16,
        Kind::Int32 => R::int32,
        Kind::Int64 => R::int64,
        Kind::Uint => R::uint,
        Kind::Uint8 => R::uint8,
        Kind::Uint16 => R::uint16,
        Kind::Uint32 => R::uint32,
        Kind::Uint64 => R::uint64,
        Kind::Float32 => R::float32,
        Kind::Float64 => R::float64,
        Kind::String => R::string,
        Kind::Other => R::any,
    }
}

/// Call the handler of `receptor` matching the kind of `field`.
pub fn call<R: Receptor + ?Sized>(receptor: &mut R, field: &StructField) -> Result<()> {
    switch::<R>(field.kind())(receptor, field)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldSpec;
    use crate::tag::RawTag;

    /// Records which handler saw which field.
    #[derive(Default)]
    struct Recorder {
        seen: Vec<(&'static str, &'static str)>,
    }

    impl Recorder {
        fn push(&mut self, handler: &'static str, field: &StructField) -> Result<()> {
            self.seen.push((handler, field.name()));
            Ok(())
        }
    }

    impl Receptor for Recorder {
        fn bool(&mut self, f: &StructField) -> Result<()> {
            self.push("bool", f)
        }

        fn int(&mut self, f: &StructField) -> Result<()> {
            self.push("int", f)
        }

        fn int8(&mut self, f: &StructField) -> Result<()> {
            self.push("int8", f)
        }

        fn int16(&mut self, f: &StructField) -> Result<()> {
            self.push("int16", f)
        }

        fn int32(&mut self, f: &StructField) -> Result<()> {
            self.push("int32", f)
        }

        fn int64(&mut self, f: &StructField) -> Result<()> {
            self.push("int64", f)
        }

        fn uint(&mut self, f: &StructField) -> Result<()> {
            self.push("uint", f)
        }

        fn uint8(&mut self, f: &StructField) -> Result<()> {
            self.push("uint8", f)
        }

        fn uint16(&mut self, f: &StructField) -> Result<()> {
            self.push("uint16", f)
        }

        fn uint32(&mut self, f: &StructField) -> Result<()> {
            self.push("uint32", f)
        }

        fn uint64(&mut self, f: &StructField) -> Result<()> {
            self.push("uint64", f)
        }

        fn float32(&mut self, f: &StructField) -> Result<()> {
            self.push("float32", f)
        }

        fn float64(&mut self, f: &StructField) -> Result<()> {
            self.push("float64", f)
        }

        fn string(&mut self, f: &StructField) -> Result<()> {
            self.push("string", f)
        }

        fn any(&mut self, f: &StructField) -> Result<()> {
            self.push("any", f)
        }
    }

    fn field<V: crate::FieldValue>(ident: &'static str) -> StructField {
        StructField::new(FieldSpec::of::<V>(ident, RawTag::default()), "")
    }

    #[test]
    fn test_call_routes_by_kind() {
        let mut r = Recorder::default();
        call(&mut r, &field::<bool>("b")).unwrap();
        call(&mut r, &field::<i16>("i")).unwrap();
        call(&mut r, &field::<usize>("u")).unwrap();
        call(&mut r, &field::<f32>("f")).unwrap();
        call(&mut r, &field::<String>("s")).unwrap();
        call(&mut r, &field::<Vec<i32>>("v")).unwrap();
        assert_eq!(
            r.seen,
            vec![
                ("bool", "b"),
                ("int16", "i"),
                ("uint", "u"),
                ("float32", "f"),
                ("string", "s"),
                ("any", "v"),
            ]
        );
    }

    #[test]
    fn test_every_supported_kind_has_its_own_handler() {
        let mut r = Recorder::default();
        for kind in Kind::SUPPORTED {
            let spec = FieldSpec {
                kind,
                ..FieldSpec::of::<bool>("x", RawTag::default())
            };
            call(&mut r, &StructField::new(spec, "")).unwrap();
        }
        let handlers: Vec<_> = r.seen.iter().map(|(h, _)| *h).collect();
        let expected: Vec<_> = Kind::SUPPORTED.iter().map(|k| k.as_str()).collect();
        assert_eq!(handlers, expected);
    }
}
