//! structconf - populate configuration records from struct tags
//!
//! Fields of a [`Record`] are annotated with a tag string such as
//! `name:"port" short:"p" usage:"port to bind" default:"8080"`. From those
//! tags a [`StructConfig`] fills records from the declared defaults, the
//! environment (`PORT`), command-line flags (`--port`, `-p`) or a JSON/TOML
//! file. A [`Merger`] combines two records, keeping whichever value differs
//! from the declared default, and a [`Builder`] folds a chain of such
//! records into the final configuration.

pub mod builder;
pub mod config;

pub use builder::{new_config_with_merge, new_config_with_merge_env, Builder};
pub use config::{Options, StructConfig};

pub use structconf_core::{
    record, AnyCodec, BoxError, CodecSet, Env, EnvVar, Error, ErrorKind, FieldValue, FlagDefault,
    FlagRegistry, FnCodec, JsonCodec, Kind, Merger, OtherValue, ProcessEnv, RawTag, Receptor,
    Record, Result, Scalar, Shape, StructField, Tag, TagBuilder, Type, Value,
};
pub use structconf_flags::FlagSet;

/// Tag keys read by every source, before any prefix is applied.
pub mod tag {
    pub use structconf_core::tag::{TAG_DEFAULT, TAG_NAME, TAG_NAME_IGNORED, TAG_SHORT, TAG_USAGE};
}
