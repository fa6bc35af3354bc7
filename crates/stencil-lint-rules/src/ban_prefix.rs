//! Rule to forbid component tag prefixes.
//!
//! # Configuration
//!
//! ```toml
//! [rules.ban-prefix]
//! prefixes = ["stencil", "stnl"]
//! ```
//!
//! Without `prefixes` the rule reports nothing.

use stencil_lint_core::{FileContext, Rule, RuleConfig, Severity, SourceModel, Suggestion, Violation};

use crate::component_tag::{component_tag, normalize_prefixes, prefixes_option};
use crate::OptionError;

/// Rule code for ban-prefix.
pub const CODE: &str = "SL007";

/// Rule name for ban-prefix.
pub const NAME: &str = "ban-prefix";

/// Forbids component tags starting with any of the given prefixes.
#[derive(Debug, Clone)]
pub struct BanPrefix {
    /// Banned prefixes, without the trailing `-`.
    pub prefixes: Vec<String>,
    /// Custom severity.
    pub severity: Severity,
}

impl Default for BanPrefix {
    fn default() -> Self {
        Self::new()
    }
}

impl BanPrefix {
    /// Creates an inactive rule with no banned prefixes.
    #[must_use]
    pub fn new() -> Self {
        Self {
            prefixes: Vec::new(),
            severity: Severity::Error,
        }
    }

    /// Creates the rule from its configuration section.
    ///
    /// # Errors
    ///
    /// Returns an error if `prefixes` is not a list of strings.
    pub fn from_config(config: &RuleConfig) -> Result<Self, OptionError> {
        Ok(Self {
            prefixes: prefixes_option(NAME, config)?,
            ..Self::new()
        })
    }

    /// Sets the banned prefixes. A trailing `-` is ignored.
    #[must_use]
    pub fn prefixes<S: Into<String>>(mut self, prefixes: impl IntoIterator<Item = S>) -> Self {
        self.prefixes = normalize_prefixes(prefixes);
        self
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

impl Rule for BanPrefix {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Ensures that a component's tag does not use any of the given prefixes"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &FileContext, source: &SourceModel) -> Vec<Violation> {
        source
            .components()
            .filter_map(component_tag)
            .filter(|tag| self.prefixes.iter().any(|p| tag.has_prefix(p)))
            .map(|tag| {
                Violation::new(
                    CODE,
                    NAME,
                    self.severity,
                    ctx.location(tag.span),
                    format!("Invalid tag prefix \"{}\"", tag.prefix()),
                )
                .with_suggestion(Suggestion::new(format!(
                    "Rename `{}` to avoid the banned prefix",
                    tag.name
                )))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{reported, run};
    use stencil_lint_core::Config;

    const STENCIL_TAG: &str = "@Component({ tag: 'stencil-button' })\nexport class Button {}\n";

    #[test]
    fn banned_prefix_fails_at_tag_value() {
        let violations = run(&BanPrefix::new().prefixes(["stencil"]), STENCIL_TAG);
        assert_eq!(violations.len(), 1);
        insta::assert_snapshot!(violations[0].message, @r#"Invalid tag prefix "stencil""#);
        assert_eq!(reported(STENCIL_TAG, &violations[0]), "'stencil-button'");
    }

    #[test]
    fn prefix_must_be_followed_by_dash() {
        assert!(run(&BanPrefix::new().prefixes(["sten"]), STENCIL_TAG).is_empty());
        assert_eq!(run(&BanPrefix::new().prefixes(["stencil-"]), STENCIL_TAG).len(), 1);
    }

    #[test]
    fn inactive_without_prefixes() {
        assert!(run(&BanPrefix::new(), STENCIL_TAG).is_empty());
    }

    #[test]
    fn plain_classes_are_ignored() {
        let src = "export class StencilHelper {}\n";
        assert!(run(&BanPrefix::new().prefixes(["stencil"]), src).is_empty());
    }

    #[test]
    fn prefixes_from_config() {
        let config = Config::parse("[rules.ban-prefix]\nprefixes = [\"stencil-\", \"st\"]\n").unwrap();
        let rule = BanPrefix::from_config(config.rule(NAME).unwrap()).unwrap();
        assert_eq!(rule.prefixes, vec!["stencil", "st"]);

        let config = Config::parse("[rules.ban-prefix]\nprefixes = \"stencil\"\n").unwrap();
        assert!(BanPrefix::from_config(config.rule(NAME).unwrap()).is_err());
    }
}
