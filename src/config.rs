// Chunk: docs/chunks/cli_host - Environment configuration

use std::env;

use anyhow::{Context, Result};
use smart_read_syntax::{Grammar, SyntaxErrorPolicy, DEFAULT_CHAR_LIMIT};

/// Literal byte length above which literals are truncated. Negative disables.
pub const CHAR_LIMIT_VAR: &str = "SMART_READ_CHAR_LIMIT";
/// Grammar used when the file extension does not name one.
pub const GRAMMAR_VAR: &str = "SMART_READ_GRAMMAR";
/// Files larger than this many bytes are not read.
pub const MAX_FILE_BYTES_VAR: &str = "SMART_READ_MAX_FILE_BYTES";

/// Render configuration loaded from environment variables.
///
/// The .env file is loaded at startup via dotenvy, so its values show up here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub char_limit: i64,
    /// Grammar for files whose extension is missing or unknown
    pub default_grammar: Grammar,
    /// Grammar forced for every file, regardless of extension
    pub grammar: Option<Grammar>,
    pub max_file_bytes: Option<u64>,
    /// Reject sources with syntax errors instead of scanning what parsed
    pub strict: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            char_limit: DEFAULT_CHAR_LIMIT,
            default_grammar: Grammar::default(),
            grammar: None,
            max_file_bytes: None,
            strict: false,
        }
    }
}

impl Config {
    /// Load configuration from the process environment.
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to its
    /// value. Unset and empty variables take their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(raw) = get(CHAR_LIMIT_VAR) {
            config.char_limit = raw
                .trim()
                .parse()
                .with_context(|| format!("{} must be an integer, got '{}'", CHAR_LIMIT_VAR, raw))?;
        }

        if let Some(raw) = get(GRAMMAR_VAR) {
            config.default_grammar = raw
                .trim()
                .parse()
                .with_context(|| format!("invalid {}", GRAMMAR_VAR))?;
        }

        if let Some(raw) = get(MAX_FILE_BYTES_VAR) {
            let bytes: u64 = raw.trim().parse().with_context(|| {
                format!("{} must be a byte count, got '{}'", MAX_FILE_BYTES_VAR, raw)
            })?;
            config.max_file_bytes = Some(bytes);
        }

        Ok(config)
    }

    pub fn syntax_error_policy(&self) -> SyntaxErrorPolicy {
        if self.strict {
            SyntaxErrorPolicy::Reject
        } else {
            SyntaxErrorPolicy::Tolerate
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.char_limit, 200);
        assert_eq!(config.default_grammar, Grammar::JavaScript);
        assert_eq!(config.syntax_error_policy(), SyntaxErrorPolicy::Tolerate);
    }

    #[test]
    fn test_reads_all_variables() {
        let config = Config::from_lookup(lookup(&[
            (CHAR_LIMIT_VAR, "-1"),
            (GRAMMAR_VAR, "python"),
            (MAX_FILE_BYTES_VAR, " 4096 "),
        ]))
        .unwrap();
        assert_eq!(config.char_limit, -1);
        assert_eq!(config.default_grammar, Grammar::Python);
        assert_eq!(config.max_file_bytes, Some(4096));
        assert_eq!(config.grammar, None);
    }

    #[test]
    fn test_empty_values_use_defaults() {
        let config = Config::from_lookup(lookup(&[(CHAR_LIMIT_VAR, ""), (GRAMMAR_VAR, "  ")])).unwrap();
        assert_eq!(config.char_limit, DEFAULT_CHAR_LIMIT);
        assert_eq!(config.default_grammar, Grammar::JavaScript);
    }

    #[test]
    fn test_bad_char_limit_is_an_error() {
        let err = Config::from_lookup(lookup(&[(CHAR_LIMIT_VAR, "lots")])).unwrap_err();
        assert!(err.to_string().contains(CHAR_LIMIT_VAR));
    }

    #[test]
    fn test_unknown_grammar_is_an_error() {
        let err = Config::from_lookup(lookup(&[(GRAMMAR_VAR, "cobol")])).unwrap_err();
        assert!(format!("{:#}", err).contains("cobol"));
    }

    #[test]
    fn test_negative_max_file_bytes_is_an_error() {
        assert!(Config::from_lookup(lookup(&[(MAX_FILE_BYTES_VAR, "-5")])).is_err());
    }

    #[test]
    fn test_strict_policy() {
        let config = Config {
            strict: true,
            ..Config::default()
        };
        assert_eq!(config.syntax_error_policy(), SyntaxErrorPolicy::Reject);
    }
}
