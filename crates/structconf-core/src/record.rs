//! Records: the types structconf populates.
//!
//! Rust has no runtime struct reflection, so a record describes itself
//! through [`Record::shape`] and exposes its fields by identifier. The
//! [`record!`](crate::record) macro writes the impl for plain structs.

use crate::error::{Error, Result};
use crate::field::FieldSpec;
use crate::value::Value;

/// What introspection sees of a type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape {
    /// A composite type with named fields, in declaration order.
    Struct(Vec<FieldSpec>),
    /// Anything else.
    Opaque { type_name: &'static str },
}

/// A type whose fields structconf can read and assign.
pub trait Record: Default + 'static {
    fn shape() -> Shape;

    /// Current value of the field named `ident`.
    fn field(&self, ident: &str) -> Option<Value>;

    /// Assign the field named `ident`.
    fn set_field(&mut self, ident: &str, value: Value) -> Result<()>;
}

macro_rules! opaque_record {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Record for $ty {
                fn shape() -> Shape {
                    Shape::Opaque {
                        type_name: std::any::type_name::<$ty>(),
                    }
                }

                fn field(&self, _ident: &str) -> Option<Value> {
                    None
                }

                fn set_field(&mut self, _ident: &str, _value: Value) -> Result<()> {
                    Err(Error::NotStructPointer {
                        type_name: std::any::type_name::<$ty>(),
                    })
                }
            }
        )*
    };
}

opaque_record!(
    bool, isize, i8, i16, i32, i64, usize, u8, u16, u32, u64, f32, f64, String,
);

/// Declare a struct and implement [`Record`] for it.
///
/// Each field may carry one `#[tag("...")]` attribute holding its
/// annotation string. Doc comments may come before the tag; any other
/// field attribute, doc comments included, must come after it. Untagged
/// fields accept doc comments only. The struct must implement `Default`.
///
/// ```
/// structconf_core::record! {
///     #[derive(Debug, Default, Clone, PartialEq)]
///     pub struct Server {
///         /// Address to bind.
///         #[tag(r#"name:"addr" default:"127.0.0.1""#)]
///         pub addr: String,
///         #[tag(r#"name:"port" short:"p" default:"8080""#)]
///         /// Port to bind.
///         pub port: u16,
///         pub internal: bool,
///     }
/// }
///
/// use structconf_core::{Record, Shape};
/// let Shape::Struct(fields) = Server::shape() else { unreachable!() };
/// assert_eq!(fields.len(), 3);
/// ```
#[macro_export]
macro_rules! record {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[doc = $doc:expr])*
                $(
                    #[tag($tag:literal)]
                    $(#[$fmeta:meta])*
                )?
                $fvis:vis $field:ident : $fty:ty
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $(
                $(#[doc = $doc])*
                $($(#[$fmeta])*)?
                $fvis $field: $fty,
            )*
        }

        impl $crate::Record for $name {
            fn shape() -> $crate::Shape {
                $crate::Shape::Struct(::std::vec![
                    $(
                        $crate::FieldSpec::of::<$fty>(
                            ::core::stringify!($field),
                            $crate::record!(@tag $($tag)?),
                        ),
                    )*
                ])
            }

            fn field(&self, ident: &str) -> ::core::option::Option<$crate::Value> {
                match ident {
                    $(
                        ::core::stringify!($field) => ::core::option::Option::Some(
                            <$fty as $crate::FieldValue>::to_value(&self.$field),
                        ),
                    )*
                    _ => ::core::option::Option::None,
                }
            }

            fn set_field(&mut self, ident: &str, value: $crate::Value) -> $crate::Result<()> {
                match ident {
                    $(
                        ::core::stringify!($field) => {
                            let found = value.kind();
                            match <$fty as $crate::FieldValue>::from_value(value) {
                                ::core::option::Option::Some(v) => {
                                    self.$field = v;
                                    ::core::result::Result::Ok(())
                                }
                                ::core::option::Option::None => {
                                    ::core::result::Result::Err($crate::Error::TypeMismatch {
                                        field: ident.to_string(),
                                        expected: <$fty as $crate::FieldValue>::KIND,
                                        found,
                                    })
                                }
                            }
                        }
                    )*
                    _ => ::core::result::Result::Err($crate::Error::UnknownField {
                        record: ::core::any::type_name::<$name>(),
                        field: ident.to_string(),
                    }),
                }
            }
        }
    };
    (@tag $tag:literal) => {
        $crate::RawTag::new($tag)
    };
    (@tag) => {
        $crate::RawTag::new("")
    };
}
