//! Shared settings for every structconf operation.

use structconf_core::{AnyCodec, CodecSet};

/// Tag prefix, codecs and argument list.
///
/// ```
/// use structconf::{JsonCodec, Options};
///
/// let options = Options::new()
///     .with_prefix("app")
///     .with_codec::<Vec<String>>(JsonCodec::<Vec<String>>::new())
///     .with_arguments(["--port", "80"]);
/// assert_eq!(options.prefix(), "app");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Options {
    prefix: String,
    codecs: CodecSet,
    arguments: Option<Vec<String>>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read `<prefix>name`, `<prefix>default` and so on instead of the bare keys.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn with_codecs(mut self, codecs: CodecSet) -> Self {
        self.codecs = codecs;
        self
    }

    /// Register `codec` for every field of type `T`.
    pub fn with_codec<T: 'static>(self, codec: impl AnyCodec + 'static) -> Self {
        Self {
            codecs: self.codecs.with_type::<T>(codec),
            ..self
        }
    }

    /// Register `codec` for the field with identifier `ident`.
    pub fn with_field_codec(
        self,
        ident: impl Into<String>,
        codec: impl AnyCodec + 'static,
    ) -> Self {
        Self {
            codecs: self.codecs.with_field(ident, codec),
            ..self
        }
    }

    /// Arguments to parse instead of the process arguments, program name excluded.
    pub fn with_arguments<I, S>(mut self, arguments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.arguments = Some(arguments.into_iter().map(Into::into).collect());
        self
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn codecs(&self) -> &CodecSet {
        &self.codecs
    }

    pub fn arguments(&self) -> Option<&[String]> {
        self.arguments.as_deref()
    }
}
