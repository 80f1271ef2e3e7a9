//! CLI configuration loaded from environment

use std::str::FromStr;

/// Runtime options, read from `FATESHEET_*` variables after `.env` loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// Pretty-print JSON output
    pub pretty: bool,
    /// Exit with an error when a document cannot be migrated instead of
    /// echoing the original back
    pub strict: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            pretty: true,
            strict: false,
        }
    }
}

impl CliConfig {
    /// Load from environment variables, using defaults for missing values
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            pretty: value_or(&lookup, "FATESHEET_PRETTY", defaults.pretty),
            strict: value_or(&lookup, "FATESHEET_STRICT", defaults.strict),
        }
    }
}

fn value_or<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T {
    match lookup(key) {
        Some(raw) => match raw.trim().parse() {
            Ok(value) => value,
            Err(_) => {
                tracing::warn!(key, value = %raw, "Ignoring unparseable setting, using default");
                default
            }
        },
        None => default,
    }
}
