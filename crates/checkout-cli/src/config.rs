//! # CLI Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Command line arguments (highest priority)                          │
//! │     checkout --prices prices.toml --script scans.txt -v                │
//! │                                                                         │
//! │  2. Environment Variables                                              │
//! │     CHECKOUT_PRICE_BOOK=prices.toml                                    │
//! │     CHECKOUT_SCRIPT=scans.txt                                          │
//! │     CHECKOUT_VERBOSE=1                                                 │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     ./prices.toml, script from stdin, quiet                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use tracing::debug;

use crate::error::{CliError, CliResult};

const DEFAULT_PRICE_BOOK: &str = "./prices.toml";

pub const USAGE: &str = "\
Checkout - replay a scan script against a price book

Usage: checkout [OPTIONS]

Options:
  -p, --prices <PATH>   Price book file (default: ./prices.toml)
  -s, --script <PATH>   Scan script file (default: read stdin)
  -v, --verbose         Log every order update
  -h, --help            Show this help message

Script commands (one per line, # starts a comment):
  scan NAME                  scan one unit
  weigh NAME WEIGHT          scan a weight
  remove NAME QTY            remove units
  remove-weight NAME WEIGHT  remove a weight
  void NAME                  remove the item entirely
  total                      print the running total";

/// What the user asked for.
#[derive(Debug, Clone, PartialEq)]
pub enum Invocation {
    Run(CliConfig),
    Help,
}

/// Resolved CLI configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct CliConfig {
    /// Price book to build the catalog from.
    pub price_book: PathBuf,
    /// Scan script; `None` reads stdin.
    pub script: Option<PathBuf>,
    pub verbose: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        CliConfig {
            price_book: PathBuf::from(DEFAULT_PRICE_BOOK),
            script: None,
            verbose: false,
        }
    }
}

impl CliConfig {
    /// Resolves configuration from defaults, the process environment and
    /// `args` (without the program name).
    pub fn load<I>(args: I) -> CliResult<Invocation>
    where
        I: IntoIterator<Item = String>,
    {
        Self::load_with_env(args, |key| std::env::var(key).ok())
    }

    /// Same as [`load`](Self::load) with an injectable environment lookup.
    pub fn load_with_env<I, E>(args: I, env: E) -> CliResult<Invocation>
    where
        I: IntoIterator<Item = String>,
        E: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        config.apply_env_overrides(env);

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--prices" | "-p" => {
                    config.price_book = PathBuf::from(expect_value(&arg, args.next())?);
                }
                "--script" | "-s" => {
                    config.script = Some(PathBuf::from(expect_value(&arg, args.next())?));
                }
                "--verbose" | "-v" => config.verbose = true,
                "--help" | "-h" => return Ok(Invocation::Help),
                other => {
                    return Err(CliError::InvalidConfig(format!(
                        "unexpected argument '{}'",
                        other
                    )))
                }
            }
        }

        config.validate()?;
        Ok(Invocation::Run(config))
    }

    /// Validates the configuration.
    pub fn validate(&self) -> CliResult<()> {
        if self.price_book.as_os_str().is_empty() {
            return Err(CliError::InvalidConfig(
                "price book path cannot be empty".into(),
            ));
        }

        if let Some(script) = &self.script {
            if script.as_os_str().is_empty() {
                return Err(CliError::InvalidConfig(
                    "script path cannot be empty".into(),
                ));
            }
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides<E>(&mut self, env: E)
    where
        E: Fn(&str) -> Option<String>,
    {
        if let Some(path) = env("CHECKOUT_PRICE_BOOK") {
            debug!(path = %path, "Overriding price book from environment");
            self.price_book = PathBuf::from(path);
        }

        if let Some(path) = env("CHECKOUT_SCRIPT") {
            debug!(path = %path, "Overriding script from environment");
            self.script = Some(PathBuf::from(path));
        }

        if let Some(flag) = env("CHECKOUT_VERBOSE") {
            self.verbose = matches!(flag.to_lowercase().as_str(), "1" | "true" | "yes");
        }
    }
}

fn expect_value(flag: &str, value: Option<String>) -> CliResult<String> {
    value.ok_or_else(|| CliError::InvalidConfig(format!("{} requires a value", flag)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_defaults() {
        let invocation = CliConfig::load_with_env(args(&[]), no_env).unwrap();
        assert_eq!(invocation, Invocation::Run(CliConfig::default()));
    }

    #[test]
    fn test_args() {
        let invocation = CliConfig::load_with_env(
            args(&["-p", "book.toml", "--script", "scans.txt", "-v"]),
            no_env,
        )
        .unwrap();

        assert_eq!(
            invocation,
            Invocation::Run(CliConfig {
                price_book: PathBuf::from("book.toml"),
                script: Some(PathBuf::from("scans.txt")),
                verbose: true,
            })
        );
    }

    #[test]
    fn test_env_overrides_and_args_win() {
        let env = |key: &str| match key {
            "CHECKOUT_PRICE_BOOK" => Some("env.toml".to_string()),
            "CHECKOUT_SCRIPT" => Some("env.txt".to_string()),
            "CHECKOUT_VERBOSE" => Some("true".to_string()),
            _ => None,
        };

        let Invocation::Run(config) =
            CliConfig::load_with_env(args(&["--prices", "arg.toml"]), env).unwrap()
        else {
            panic!("expected a run configuration");
        };

        assert_eq!(config.price_book, PathBuf::from("arg.toml"));
        assert_eq!(config.script, Some(PathBuf::from("env.txt")));
        assert!(config.verbose);
    }

    #[test]
    fn test_help() {
        let invocation = CliConfig::load_with_env(args(&["-v", "--help"]), no_env).unwrap();
        assert_eq!(invocation, Invocation::Help);
    }

    #[test]
    fn test_invalid_args() {
        assert!(CliConfig::load_with_env(args(&["--prices"]), no_env).is_err());
        assert!(CliConfig::load_with_env(args(&["--bogus"]), no_env).is_err());
        assert!(CliConfig::load_with_env(args(&["--prices", ""]), no_env).is_err());
    }
}
