//! Primitive kind classification of record fields.

use std::fmt;

/// Kind of a record field.
///
/// The fourteen scalar kinds are fixed; everything else is [`Kind::Other`]
/// and is handled through an [`AnyCodec`](crate::AnyCodec).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Bool,
    Int,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Float32,
    Float64,
    String,
    Other,
}

impl Kind {
    /// All scalar kinds, in dispatch order.
    pub const SUPPORTED: [Kind; 14] = [
        Kind::Bool,
        Kind::Int,
        Kind::Int8,
        Kind::Int16,
        Kind::Int32,
        Kind::Int64,
        Kind::Uint,
        Kind::Uint8,
        Kind::Uint16,
        Kind::Uint32,
        Kind::Uint64,
        Kind::Float32,
        Kind::Float64,
        Kind::String,
    ];

    /// Reports whether the kind is one of the fixed scalar kinds.
    pub fn is_supported(self) -> bool {
        !matches!(self, Kind::Other)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Kind::Bool => "bool",
            Kind::Int => "int",
            Kind::Int8 => "int8",
            Kind::Int16 => "int16",
            Kind::Int32 => "int32",
            Kind::Int64 => "int64",
            Kind::Uint => "uint",
            Kind::Uint8 => "uint8",
            Kind::Uint16 => "uint16",
            Kind::Uint32 => "uint32",
            Kind::Uint64 => "uint64",
            Kind::Float32 => "float32",
            Kind::Float64 => "float64",
            Kind::String => "string",
            Kind::Other => "other",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported() {
        assert!(Kind::SUPPORTED.iter().all(|k| k.is_supported()));
        assert!(!Kind::Other.is_supported());
    }

    #[test]
    fn test_display() {
        assert_eq!(Kind::Uint16.to_string(), "uint16");
        assert_eq!(Kind::Other.to_string(), "other");
    }
}
