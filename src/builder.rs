//! Override chains: fold candidate records through a [`Merger`].

use std::fmt;

use tracing::debug;

use structconf_core::{Env, FlagRegistry, Merger, ProcessEnv, Record, Result};

use crate::config::StructConfig;

type Generator<'a, T> = Box<dyn FnMut(&StructConfig<T>) -> Result<T> + 'a>;

/// An ordered chain of record generators; later stages override earlier ones.
///
/// Each candidate is first merged over the defaults, then the normalized
/// candidates are folded left to right, starting from the defaults.
///
/// A field counts as given when it differs from its declared default, so
/// generators should start from [`StructConfig::default_value`] rather than
/// `T::default()`.
pub struct Builder<'a, T> {
    sc: &'a StructConfig<T>,
    merger: &'a Merger<T>,
    chain: Vec<Generator<'a, T>>,
}

impl<'a, T: Record> Builder<'a, T> {
    pub fn new(sc: &'a StructConfig<T>, merger: &'a Merger<T>) -> Self {
        Self {
            sc,
            merger,
            chain: Vec::new(),
        }
    }

    /// Append a generator to the chain.
    pub fn add(mut self, generator: impl FnMut(&StructConfig<T>) -> Result<T> + 'a) -> Self {
        self.chain.push(Box::new(generator));
        self
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    /// Run every generator in order and merge the results.
    ///
    /// An empty chain yields the defaults. The first failure is returned as is.
    pub fn build(&mut self) -> Result<T> {
        let mut candidates = Vec::with_capacity(self.chain.len());
        for (index, generator) in self.chain.iter_mut().enumerate() {
            debug!(stage = index, "generate");
            let candidate = generator(self.sc)?;
            let defaults = self.sc.default_value()?;
            candidates.push(self.merger.merge(&defaults, &candidate)?);
        }

        let mut result = self.sc.default_value()?;
        for candidate in &candidates {
            result = self.merger.merge(&result, candidate)?;
        }
        Ok(result)
    }
}

impl<T> fmt::Debug for Builder<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Builder")
            .field("record", &std::any::type_name::<T>())
            .field("stages", &self.chain.len())
            .finish()
    }
}

/// Defaults, overridden by the process environment, overridden by flags.
///
/// Flags are defined on `flags` and parsed from
/// [`Options::arguments`](crate::Options::arguments), or from the process
/// arguments without the program name when none were given.
pub fn new_config_with_merge<T, F>(
    sc: &StructConfig<T>,
    merger: &Merger<T>,
    flags: &mut F,
) -> Result<T>
where
    T: Record,
    F: FlagRegistry + ?Sized,
{
    new_config_with_merge_env(sc, merger, flags, &ProcessEnv)
}

/// [`new_config_with_merge`] reading variables from `env`.
pub fn new_config_with_merge_env<T, F, E>(
    sc: &StructConfig<T>,
    merger: &Merger<T>,
    flags: &mut F,
    env: &E,
) -> Result<T>
where
    T: Record,
    F: FlagRegistry + ?Sized,
    E: Env + ?Sized,
{
    let arguments: Vec<String> = match sc.options().arguments() {
        Some(arguments) => arguments.to_vec(),
        None => std::env::args().skip(1).collect(),
    };

    let mut builder = Builder::new(sc, merger)
        .add(|sc| {
            let mut t = sc.default_value()?;
            sc.from_env_with(&mut t, env)?;
            Ok(t)
        })
        .add(|sc| {
            sc.set_flags(&mut *flags)?;
            flags.parse(&arguments)?;
            let mut t = sc.default_value()?;
            sc.from_flags(&mut t, &*flags)?;
            Ok(t)
        });
    builder.build()
}
