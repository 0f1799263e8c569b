//! Per-record entry point: fill a record from each source.

mod file;
mod options;

pub use options::Options;

use std::marker::PhantomData;

use tracing::debug;

use structconf_core::source::{default_receptor, env_receptor, flag_get_receptor, flag_set_receptor};
use structconf_core::{Env, FlagRegistry, Merger, ProcessEnv, Record, Result, StructField, Type};

/// Reads and writes records of type `T` according to their tags.
///
/// Each operation introspects `T` afresh and touches only the target it
/// is handed.
#[derive(Debug, Clone)]
pub struct StructConfig<T> {
    options: Options,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Record> StructConfig<T> {
    pub fn new(options: Options) -> Self {
        Self {
            options,
            _marker: PhantomData,
        }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    fn ty(&self) -> Result<Type> {
        Type::of::<T>(self.options.prefix())
    }

    /// Field descriptors of `T` under the configured prefix.
    pub fn fields(&self) -> Result<Vec<StructField>> {
        Ok(self.ty()?.fields())
    }

    /// Assign every `default` literal into `target`.
    pub fn from_default(&self, target: &mut T) -> Result<()> {
        let ty = self.ty()?;
        debug!(record = ty.name(), "from default");
        ty.accept(&mut default_receptor(target, self.options.codecs())?)
    }

    /// Assign values from the process environment into `target`.
    pub fn from_env(&self, target: &mut T) -> Result<()> {
        self.from_env_with(target, &ProcessEnv)
    }

    /// Assign values found in `env` into `target`.
    pub fn from_env_with<E: Env + ?Sized>(&self, target: &mut T, env: &E) -> Result<()> {
        let ty = self.ty()?;
        debug!(record = ty.name(), "from env");
        ty.accept(&mut env_receptor(target, env, self.options.codecs())?)
    }

    /// Define one flag per named field in `flags`.
    pub fn set_flags<F: FlagRegistry + ?Sized>(&self, flags: &mut F) -> Result<()> {
        let ty = self.ty()?;
        debug!(record = ty.name(), "set flags");
        ty.accept(&mut flag_set_receptor(flags))
    }

    /// Assign parsed flag values into `target`.
    pub fn from_flags<F: FlagRegistry + ?Sized>(&self, target: &mut T, flags: &F) -> Result<()> {
        let ty = self.ty()?;
        debug!(record = ty.name(), "from flags");
        ty.accept(&mut flag_get_receptor(target, flags, self.options.codecs())?)
    }

    /// A record holding only the declared defaults.
    pub fn default_value(&self) -> Result<T> {
        let mut value = T::default();
        self.from_default(&mut value)?;
        Ok(value)
    }

    /// A [`Merger`] sharing this configuration's prefix and codecs.
    pub fn merger(&self) -> Merger<T> {
        Merger::new(self.options.prefix(), self.options.codecs().clone())
    }
}

impl<T: Record> Default for StructConfig<T> {
    fn default() -> Self {
        Self::new(Options::default())
    }
}
