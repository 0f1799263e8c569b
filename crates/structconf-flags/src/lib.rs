//! Command-line flag registry for structconf, backed by clap.
//!
//! [`FlagSet`] collects one long flag per named record field, parses an
//! argument list and hands typed values back to the flag-retrieval
//! receptor.
//!
//! Boolean flags behave like switches: `--verbose` sets true and
//! `--verbose=false` sets false. Every other flag takes a value, either as
//! `--port 80` or `--port=80`; a separate value may start with `-`, as in
//! `--offset -5`. When a flag is repeated the last value wins. An empty
//! short alias means no alias.

use clap::builder::ValueParser;
use clap::{Arg, ArgAction, ArgMatches, Command};
use tracing::debug;

use structconf_core::{Error, FlagDefault, FlagRegistry, Kind, Result, Scalar};

/// Id of the hidden positional collecting non-flag arguments.
const ARGS_ID: &str = "structconf-positional-args";

#[derive(Debug, Clone)]
struct FlagInfo {
    name: String,
    short: Option<char>,
    kind: Kind,
}

/// A set of flags defined from record fields.
#[derive(Debug, Clone)]
pub struct FlagSet {
    name: String,
    flags: Vec<FlagInfo>,
    args: Vec<Arg>,
    matches: Option<ArgMatches>,
}

impl FlagSet {
    /// An empty set; `name` is the program name shown in usage text.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            flags: Vec::new(),
            args: Vec::new(),
            matches: None,
        }
    }

    fn command(&self) -> Command {
        Command::new(self.name.clone())
            .no_binary_name(true)
            .disable_help_flag(true)
            .args_override_self(true)
            .args(self.args.iter().cloned())
            .arg(
                Arg::new(ARGS_ID)
                    .num_args(0..)
                    .action(ArgAction::Append)
                    .hide(true),
            )
    }

    fn matches(&self) -> Result<&ArgMatches> {
        self.matches
            .as_ref()
            .ok_or_else(|| Error::Flags("flag set has not been parsed".into()))
    }

    fn info(&self, name: &str) -> Result<&FlagInfo> {
        self.flags
            .iter()
            .find(|f| f.name == name)
            .ok_or_else(|| Error::UnknownFlag {
                name: name.to_string(),
            })
    }

    /// Whether `--name` has been defined.
    pub fn contains(&self, name: &str) -> bool {
        self.flags.iter().any(|f| f.name == name)
    }

    /// Defined flag names, in definition order.
    pub fn names(&self) -> Vec<&str> {
        self.flags.iter().map(|f| f.name.as_str()).collect()
    }

    /// Kind of the value `--name` was defined with.
    pub fn kind(&self, name: &str) -> Option<Kind> {
        self.flags.iter().find(|f| f.name == name).map(|f| f.kind)
    }

    /// Arguments left over after flags were parsed.
    pub fn args(&self) -> Vec<String> {
        self.matches
            .as_ref()
            .and_then(|m| m.get_many::<String>(ARGS_ID))
            .map(|values| values.cloned().collect())
            .unwrap_or_default()
    }

    pub fn is_parsed(&self) -> bool {
        self.matches.is_some()
    }

    /// Rendered help text listing every defined flag.
    pub fn usage(&self) -> String {
        self.command().render_help().to_string()
    }

    fn check_short(&self, name: &str, short: Option<&str>) -> Result<Option<char>> {
        let short = match short {
            None | Some("") => return Ok(None),
            Some(short) => short,
        };
        let mut chars = short.chars();
        let (Some(c), None) = (chars.next(), chars.next()) else {
            return Err(Error::InvalidShort {
                name: name.to_string(),
                short: short.to_string(),
            });
        };
        if self.flags.iter().any(|f| f.short == Some(c)) {
            return Err(Error::DuplicateFlag {
                flag: format!("-{c}"),
            });
        }
        Ok(Some(c))
    }
}

impl Default for FlagSet {
    fn default() -> Self {
        Self::new(env!("CARGO_PKG_NAME"))
    }
}

impl FlagRegistry for FlagSet {
    fn register<T: Scalar>(
        &mut self,
        name: &str,
        default: FlagDefault<T>,
        usage: &str,
        short: Option<&str>,
    ) -> Result<()> {
        if self.contains(name) || name == ARGS_ID {
            return Err(Error::DuplicateFlag {
                flag: format!("--{name}"),
            });
        }
        let short = self.check_short(name, short)?;

        let mut arg = Arg::new(name.to_string())
            .long(name.to_string())
            .help(usage.to_string())
            .action(ArgAction::Set)
            .value_parser(ValueParser::new(|raw: &str| T::parse_scalar(raw)));
        if let Some(c) = short {
            arg = arg.short(c);
        }
        if T::KIND == Kind::Bool {
            arg = arg
                .num_args(0..=1)
                .require_equals(true)
                .default_missing_value("true");
        } else {
            // the next argument is always the value, even `-5` or `--x`
            arg = arg.allow_hyphen_values(true);
        }
        if let FlagDefault::Declared(v) = &default {
            let literal = v.to_string();
            if !literal.is_empty() {
                arg = arg.default_value(literal);
            }
        }

        let kind = T::KIND;
        debug!(flag = name, kind = %kind, "defined");
        self.args.push(arg);
        self.flags.push(FlagInfo {
            name: name.to_string(),
            short,
            kind,
        });
        Ok(())
    }

    fn parse(&mut self, args: &[String]) -> Result<()> {
        let matches = self
            .command()
            .try_get_matches_from(args)
            .map_err(|e| Error::Flags(Box::new(e)))?;
        debug!(flags = self.flags.len(), "parsed");
        self.matches = Some(matches);
        Ok(())
    }

    fn has_value(&self, name: &str) -> Result<bool> {
        self.info(name)?;
        Ok(self.matches()?.contains_id(name))
    }

    fn get<T: Scalar>(&self, name: &str) -> Result<T> {
        self.info(name)?;
        match self.matches()?.try_get_one::<T>(name) {
            Ok(Some(v)) => Ok(v.clone()),
            Ok(None) => Ok(T::default()),
            Err(e) => Err(Error::Flags(Box::new(e))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use structconf_core::ErrorKind;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|a| a.to_string()).collect()
    }

    fn sample() -> FlagSet {
        let mut fs = FlagSet::new("sample");
        fs.register("port", FlagDefault::Declared(8080u16), "port to bind", Some("p"))
            .unwrap();
        fs.register::<bool>("verbose", FlagDefault::Undeclared, "", Some("v"))
            .unwrap();
        fs.register::<String>("mode", FlagDefault::Undeclared, "run mode", None)
            .unwrap();
        fs.register("ratio", FlagDefault::Declared(0.5f64), "", None)
            .unwrap();
        fs
    }

    #[test]
    fn test_defaults_without_args() {
        let mut fs = sample();
        fs.parse(&[]).unwrap();
        assert_eq!(fs.get::<u16>("port").unwrap(), 8080);
        assert!(!fs.get::<bool>("verbose").unwrap());
        assert_eq!(fs.get::<String>("mode").unwrap(), "");
        assert_eq!(fs.get::<f64>("ratio").unwrap(), 0.5);
        assert!(fs.has_value("port").unwrap());
        assert!(!fs.has_value("mode").unwrap());
    }

    #[test]
    fn test_long_short_and_positional() {
        let mut fs = sample();
        fs.parse(&argv(&["-p", "9000", "--mode=fast", "-v", "rest", "more"]))
            .unwrap();
        assert_eq!(fs.get::<u16>("port").unwrap(), 9000);
        assert_eq!(fs.get::<String>("mode").unwrap(), "fast");
        assert!(fs.get::<bool>("verbose").unwrap());
        assert_eq!(fs.args(), vec!["rest", "more"]);
    }

    #[test]
    fn test_bool_switch_forms() {
        let mut fs = sample();
        fs.parse(&argv(&["--verbose=false"])).unwrap();
        assert!(!fs.get::<bool>("verbose").unwrap());
        assert!(fs.has_value("verbose").unwrap());

        let mut fs = sample();
        fs.parse(&argv(&["--verbose"])).unwrap();
        assert!(fs.get::<bool>("verbose").unwrap());
    }

    #[test]
    fn test_last_value_wins() {
        let mut fs = sample();
        fs.parse(&argv(&["--port", "1", "--port", "2"])).unwrap();
        assert_eq!(fs.get::<u16>("port").unwrap(), 2);
    }

    #[test]
    fn test_invalid_value_is_flags_error() {
        let mut fs = sample();
        let err = fs.parse(&argv(&["--port", "70000"])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Flags);
    }

    #[test]
    fn test_unknown_argument_is_flags_error() {
        let mut fs = sample();
        let err = fs.parse(&argv(&["--nope"])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Flags);
    }

    #[test]
    fn test_duplicate_definitions() {
        let mut fs = sample();
        let err = fs
            .register::<u16>("port", FlagDefault::Undeclared, "", None)
            .unwrap_err();
        assert_eq!(err.to_string(), "flag --port is already defined");

        let err = fs
            .register::<u16>("peer", FlagDefault::Undeclared, "", Some("p"))
            .unwrap_err();
        assert_eq!(err.to_string(), "flag -p is already defined");
    }

    #[test]
    fn test_short_must_be_one_char() {
        let mut fs = FlagSet::new("sample");
        let err = fs
            .register::<u16>("port", FlagDefault::Undeclared, "", Some("pp"))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidShort { .. }));
        assert!(!fs.contains("port"));
    }

    #[test]
    fn test_empty_short_is_no_alias() {
        let mut fs = FlagSet::new("sample");
        fs.register("port", FlagDefault::Declared(1u16), "", Some(""))
            .unwrap();
        fs.register::<u16>("peer", FlagDefault::Undeclared, "", Some(""))
            .unwrap();
        fs.parse(&argv(&["--peer", "7"])).unwrap();
        assert_eq!(fs.get::<u16>("port").unwrap(), 1);
        assert_eq!(fs.get::<u16>("peer").unwrap(), 7);
    }

    #[test]
    fn test_hyphen_leading_values() {
        let mut fs = sample();
        fs.register::<i32>("offset", FlagDefault::Declared(1), "", None)
            .unwrap();
        fs.parse(&argv(&[
            "--offset", "-5", "--ratio", "-0.25", "--mode", "-fast", "-v",
        ]))
        .unwrap();
        assert_eq!(fs.get::<i32>("offset").unwrap(), -5);
        assert_eq!(fs.get::<f64>("ratio").unwrap(), -0.25);
        assert_eq!(fs.get::<String>("mode").unwrap(), "-fast");
        assert!(fs.get::<bool>("verbose").unwrap());
    }

    #[test]
    fn test_lookup_errors() {
        let fs = sample();
        assert_eq!(fs.get::<u16>("port").unwrap_err().kind(), ErrorKind::Flags);

        let mut fs = sample();
        fs.parse(&[]).unwrap();
        assert!(matches!(
            fs.get::<u16>("missing").unwrap_err(),
            Error::UnknownFlag { .. }
        ));
        // defined as u16, read as i64
        assert_eq!(fs.get::<i64>("port").unwrap_err().kind(), ErrorKind::Flags);
    }

    #[test]
    fn test_names_and_usage() {
        let fs = sample();
        assert_eq!(fs.names(), vec!["port", "verbose", "mode", "ratio"]);
        assert_eq!(fs.kind("ratio"), Some(Kind::Float64));
        let usage = fs.usage();
        assert!(usage.contains("--port"));
        assert!(usage.contains("port to bind"));
        assert!(usage.contains("8080"));
    }
}
