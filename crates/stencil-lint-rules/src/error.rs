//! Errors raised while building rules from configuration.

use stencil_lint_core::ConfigError;
use thiserror::Error;

/// Invalid rule options or presets.
#[derive(Debug, Error)]
pub enum OptionError {
    /// An option could not be read.
    #[error("[rules.{rule}] {source}")]
    Config {
        /// Rule whose section is invalid.
        rule: &'static str,
        /// Underlying error.
        #[source]
        source: ConfigError,
    },

    /// An option has a value outside its allowed set.
    #[error("[rules.{rule}] invalid value `{value}` for `{key}`, expected {expected}")]
    InvalidValue {
        /// Rule whose section is invalid.
        rule: &'static str,
        /// Option key.
        key: &'static str,
        /// Value found.
        value: String,
        /// Description of the accepted values.
        expected: String,
    },

    /// A `[rules.<name>]` section names no built-in rule.
    #[error("unknown rule `{0}`")]
    UnknownRule(String),

    /// The preset name is not known.
    #[error("unknown preset `{0}`, expected recommended, strict or minimal")]
    UnknownPreset(String),
}

impl OptionError {
    pub(crate) fn config(rule: &'static str, source: ConfigError) -> Self {
        Self::Config { rule, source }
    }

    pub(crate) fn invalid(rule: &'static str, key: &'static str, value: &str, expected: &str) -> Self {
        Self::InvalidValue {
            rule,
            key,
            value: value.to_string(),
            expected: expected.to_string(),
        }
    }
}
