//! Error types shared by every structconf crate.

use crate::kind::Kind;

/// Boxed error returned by caller-supplied codecs and generators.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result alias used throughout structconf.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Every failure surfaced by structconf.
///
/// Skipped fields and zero-valued fields are not errors; they never reach
/// this type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Introspection target is not a record type.
    #[error("cannot accept type {type_name}: not a struct")]
    NotStruct { type_name: &'static str },

    /// Assignment target is not a record type.
    #[error("cannot assign into {type_name}: not a struct")]
    NotStructPointer { type_name: &'static str },

    /// A raw string does not parse as the field's kind.
    #[error("field {field}: cannot parse {raw:?} as {kind}: {reason}")]
    Conversion {
        field: String,
        kind: Kind,
        raw: String,
        reason: String,
    },

    /// A value of the wrong kind was assigned to a field.
    #[error("field {field}: expected {expected} value, found {found}")]
    TypeMismatch {
        field: String,
        expected: Kind,
        found: Kind,
    },

    /// The record has no field with this identifier.
    #[error("{record} has no field {field}")]
    UnknownField { record: &'static str, field: String },

    /// A codec for an unsupported kind failed.
    #[error("field {field}: {source}")]
    Any {
        field: String,
        #[source]
        source: BoxError,
    },

    /// The flag registry failed, e.g. while parsing arguments.
    #[error("flags: {0}")]
    Flags(#[source] BoxError),

    /// A long or short flag name was registered twice.
    #[error("flag {flag} is already defined")]
    DuplicateFlag { flag: String },

    /// A short alias is not exactly one character.
    #[error("flag --{name}: short alias {short:?} must be a single character")]
    InvalidShort { name: String, short: String },

    /// A flag was read that was never registered.
    #[error("flag --{name} is not defined")]
    UnknownFlag { name: String },

    /// File-layer input could not be decoded.
    #[error("file: {0}")]
    File(String),
}

/// Stable classification of [`Error`] values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotStruct,
    NotStructPointer,
    Conversion,
    TypeMismatch,
    UnknownField,
    Any,
    Flags,
    File,
}

impl Error {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::NotStruct { .. } => ErrorKind::NotStruct,
            Error::NotStructPointer { .. } => ErrorKind::NotStructPointer,
            Error::Conversion { .. } => ErrorKind::Conversion,
            Error::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            Error::UnknownField { .. } => ErrorKind::UnknownField,
            Error::Any { .. } => ErrorKind::Any,
            Error::Flags(_)
            | Error::DuplicateFlag { .. }
            | Error::InvalidShort { .. }
            | Error::UnknownFlag { .. } => ErrorKind::Flags,
            Error::File(_) => ErrorKind::File,
        }
    }

    /// Wrap a codec failure for `field`.
    pub fn any(field: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Error::Any {
            field: field.into(),
            source: source.into(),
        }
    }
}
