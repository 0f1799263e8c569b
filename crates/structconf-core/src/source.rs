//! Source receptors: defaults, environment and command-line flags.
//!
//! Every source is a [`ParsePair`] with a different extraction step.
//!
//! | source            | extraction                                  | sink              |
//! |-------------------|---------------------------------------------|-------------------|
//! | default           | `default` facet, else skip                  | [`FieldSetter`]   |
//! | environment       | variable named after `name`, else skip      | [`FieldSetter`]   |
//! | flag registration | `default` facet, else zero                  | [`FlagSetSink`]   |
//! | flag retrieval    | `name` as registry key, else skip           | [`FieldSetter`]   |

use tracing::{debug, trace};

use crate::codec::CodecSet;
use crate::convert::{Converter, ScalarConverter};
use crate::env::{Env, EnvVar};
use crate::error::Result;
use crate::field::StructField;
use crate::pair::{Extract, Extracted, ParsePair, Parsed, TypedReceptor};
use crate::record::Record;
use crate::sink::FieldSetter;
use crate::value::Scalar;

/// Extracts the `default` facet; fields without one are skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTag;

impl Extract for DefaultTag {
    fn extract(&self, field: &StructField) -> Result<Extracted> {
        Ok(match field.tag().default_value() {
            Some(v) => Extracted::Found(v),
            None => Extracted::Skip,
        })
    }
}

/// Extracts the environment variable derived from the `name` facet.
#[derive(Debug, Clone, Copy)]
pub struct EnvName<'e, E: ?Sized> {
    env: &'e E,
}

impl<'e, E: Env + ?Sized> EnvName<'e, E> {
    pub fn new(env: &'e E) -> Self {
        Self { env }
    }
}

impl<E: Env + ?Sized> Extract for EnvName<'_, E> {
    fn extract(&self, field: &StructField) -> Result<Extracted> {
        let Some(name) = field.tag().name() else {
            return Ok(Extracted::Skip);
        };
        let var = EnvVar::new(&name);
        match var.get(self.env) {
            Some(v) => Ok(Extracted::Found(v)),
            None => {
                trace!(field = field.name(), var = %var, "unset");
                Ok(Extracted::Skip)
            }
        }
    }
}

/// Extracts the declared flag default.
///
/// Named fields without a `default` facet still register a flag, with no
/// declared default. Fields without a name are skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlagDefaultTag;

impl Extract for FlagDefaultTag {
    fn extract(&self, field: &StructField) -> Result<Extracted> {
        if field.tag().name().is_none() {
            return Ok(Extracted::Skip);
        }
        Ok(match field.tag().default_value() {
            Some(v) => Extracted::Found(v),
            None => Extracted::Zero,
        })
    }
}

/// Default of a flag being registered.
#[derive(Debug, Clone, PartialEq)]
pub enum FlagDefault<T> {
    /// The field declared a `default` literal.
    Declared(T),
    /// No literal; reading the flag without a value yields the zero value.
    Undeclared,
}

impl<T> From<Parsed<T>> for FlagDefault<T> {
    fn from(parsed: Parsed<T>) -> Self {
        match parsed {
            Parsed::Value(v) => FlagDefault::Declared(v),
            Parsed::Zero => FlagDefault::Undeclared,
        }
    }
}

/// A command-line flag registry and parser.
pub trait FlagRegistry {
    /// Define a long flag `--name`, optionally aliased by a one-character `short`.
    fn register<T: Scalar>(
        &mut self,
        name: &str,
        default: FlagDefault<T>,
        usage: &str,
        short: Option<&str>,
    ) -> Result<()>;

    /// Parse an argument list, program name excluded.
    fn parse(&mut self, args: &[String]) -> Result<()>;

    /// Whether the flag was given or has a declared default.
    fn has_value(&self, name: &str) -> Result<bool>;

    /// Typed value of a parsed flag; the zero value when [`has_value`](Self::has_value) is false.
    fn get<T: Scalar>(&self, name: &str) -> Result<T>;
}

impl<F: FlagRegistry + ?Sized> FlagRegistry for &mut F {
    fn register<T: Scalar>(
        &mut self,
        name: &str,
        default: FlagDefault<T>,
        usage: &str,
        short: Option<&str>,
    ) -> Result<()> {
        (**self).register(name, default, usage, short)
    }

    fn parse(&mut self, args: &[String]) -> Result<()> {
        (**self).parse(args)
    }

    fn has_value(&self, name: &str) -> Result<bool> {
        (**self).has_value(name)
    }

    fn get<T: Scalar>(&self, name: &str) -> Result<T> {
        (**self).get(name)
    }
}

/// Registers one flag per named field.
///
/// Fields of unsupported kinds become string flags; their value is decoded
/// by a codec when flags are read back.
pub struct FlagSetSink<'f, F: ?Sized> {
    registry: &'f mut F,
}

impl<'f, F: FlagRegistry + ?Sized> FlagSetSink<'f, F> {
    pub fn new(registry: &'f mut F) -> Self {
        Self { registry }
    }

    fn define<T: Scalar>(&mut self, field: &StructField, value: Parsed<T>) -> Result<()> {
        let tag = field.tag();
        let Some(name) = tag.name() else {
            return Ok(());
        };
        let short = tag.short();
        debug!(field = field.name(), flag = %name, short = ?short, "register flag");
        self.registry
            .register::<T>(&name, value.into(), &tag.usage(), short.as_deref())
    }
}

impl<F: FlagRegistry + ?Sized> TypedReceptor for FlagSetSink<'_, F> {
    fn scalar<T: Scalar>(&mut self, field: &StructField, value: Parsed<T>) -> Result<()> {
        self.define(field, value)
    }

    fn any(&mut self, field: &StructField, raw: Parsed<String>) -> Result<()> {
        self.define(field, raw)
    }
}

/// Extracts the flag name as the registry key.
///
/// Unnamed fields are skipped. Flags with neither a value nor a declared
/// default take the zero value.
#[derive(Debug, Clone, Copy)]
pub struct FlagName<'f, F: ?Sized> {
    registry: &'f F,
}

impl<'f, F: FlagRegistry + ?Sized> FlagName<'f, F> {
    pub fn new(registry: &'f F) -> Self {
        Self { registry }
    }
}

impl<F: FlagRegistry + ?Sized> Extract for FlagName<'_, F> {
    fn extract(&self, field: &StructField) -> Result<Extracted> {
        let Some(name) = field.tag().name() else {
            return Ok(Extracted::Skip);
        };
        if self.registry.has_value(&name)? {
            Ok(Extracted::Found(name))
        } else {
            Ok(Extracted::Zero)
        }
    }
}

/// Looks extracted flag names up in a parsed registry.
#[derive(Debug, Clone, Copy)]
pub struct FlagGetConverter<'f, F: ?Sized> {
    registry: &'f F,
}

impl<'f, F: FlagRegistry + ?Sized> FlagGetConverter<'f, F> {
    pub fn new(registry: &'f F) -> Self {
        Self { registry }
    }
}

impl<F: FlagRegistry + ?Sized> Converter for FlagGetConverter<'_, F> {
    fn convert<T: Scalar>(&self, _field: &StructField, name: &str) -> Result<T> {
        self.registry.get::<T>(name)
    }
}

pub type DefaultReceptor<'a, R> = ParsePair<DefaultTag, ScalarConverter, FieldSetter<'a, R>>;

pub type EnvReceptor<'a, 'e, R, E> =
    ParsePair<EnvName<'e, E>, ScalarConverter, FieldSetter<'a, R>>;

pub type FlagSetReceptor<'f, F> = ParsePair<FlagDefaultTag, ScalarConverter, FlagSetSink<'f, F>>;

pub type FlagGetReceptor<'a, 'f, R, F> =
    ParsePair<FlagName<'f, F>, FlagGetConverter<'f, F>, FieldSetter<'a, R>>;

/// Receptor assigning every `default` literal into `target`.
pub fn default_receptor<'a, R: Record>(
    target: &'a mut R,
    codecs: &'a CodecSet,
) -> Result<DefaultReceptor<'a, R>> {
    Ok(ParsePair::new(
        DefaultTag,
        ScalarConverter,
        FieldSetter::new(target, codecs)?,
    ))
}

/// Receptor assigning environment values into `target`.
pub fn env_receptor<'a, 'e, R: Record, E: Env + ?Sized>(
    target: &'a mut R,
    env: &'e E,
    codecs: &'a CodecSet,
) -> Result<EnvReceptor<'a, 'e, R, E>> {
    Ok(ParsePair::new(
        EnvName::new(env),
        ScalarConverter,
        FieldSetter::new(target, codecs)?,
    ))
}

/// Receptor defining one flag per named field in `registry`.
pub fn flag_set_receptor<F: FlagRegistry + ?Sized>(registry: &mut F) -> FlagSetReceptor<'_, F> {
    ParsePair::new(FlagDefaultTag, ScalarConverter, FlagSetSink::new(registry))
}

/// Receptor assigning parsed flag values into `target`.
pub fn flag_get_receptor<'a, 'f, R: Record, F: FlagRegistry + ?Sized>(
    target: &'a mut R,
    registry: &'f F,
    codecs: &'a CodecSet,
) -> Result<FlagGetReceptor<'a, 'f, R, F>> {
    Ok(ParsePair::new(
        FlagName::new(registry),
        FlagGetConverter::new(registry),
        FieldSetter::new(target, codecs)?,
    ))
}
