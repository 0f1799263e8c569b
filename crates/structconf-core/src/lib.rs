//! Field introspection, source receptors and default-aware merging for
//! configuration records.
//!
//! A [`Record`] describes its fields; each field carries a struct-tag
//! string with up to four facets (`name`, `usage`, `default`, `short`).
//! A [`Type`] walks those fields and hands each one to a [`Receptor`]
//! chosen by [`Kind`]. The source receptors in [`source`] fill a record
//! from tag defaults, the environment or a flag registry, and [`Merger`]
//! combines two filled records, preferring values that are not the
//! declared default.

pub mod codec;
pub mod convert;
pub mod env;
pub mod error;
pub mod field;
pub mod kind;
pub mod merge;
pub mod pair;
pub mod receptor;
pub mod record;
pub mod sink;
pub mod source;
pub mod tag;
pub mod typ;
pub mod value;

pub use codec::{AnyCodec, CodecSet, DowncastError, FnCodec, JsonCodec};
pub use convert::{Converter, ScalarConverter};
pub use env::{Env, EnvVar, ProcessEnv};
pub use error::{BoxError, Error, ErrorKind, Result};
pub use field::{FieldSpec, StructField};
pub use kind::Kind;
pub use merge::Merger;
pub use pair::{Extract, Extracted, ParsePair, Parsed, TypedReceptor};
pub use receptor::{call, switch, Receptor};
pub use record::{Record, Shape};
pub use sink::FieldSetter;
pub use source::{FlagDefault, FlagRegistry};
pub use tag::{RawTag, Tag, TagBuilder};
pub use typ::Type;
pub use value::{parse_bool, FieldValue, OtherValue, Scalar, Value};
