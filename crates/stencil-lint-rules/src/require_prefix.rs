//! Rule to require a component tag prefix.
//!
//! # Configuration
//!
//! ```toml
//! [rules.require-prefix]
//! prefixes = ["ion"]
//! ```
//!
//! Without `prefixes` the rule reports nothing.

use stencil_lint_core::{FileContext, Rule, RuleConfig, Severity, SourceModel, Suggestion, Violation};

use crate::component_tag::{component_tag, normalize_prefixes, prefixes_option};
use crate::OptionError;

/// Rule code for require-prefix.
pub const CODE: &str = "SL008";

/// Rule name for require-prefix.
pub const NAME: &str = "require-prefix";

/// Requires component tags to start with one of the given prefixes.
#[derive(Debug, Clone)]
pub struct RequirePrefix {
    /// Accepted prefixes, without the trailing `-`.
    pub prefixes: Vec<String>,
    /// Custom severity.
    pub severity: Severity,
}

impl Default for RequirePrefix {
    fn default() -> Self {
        Self::new()
    }
}

impl RequirePrefix {
    /// Creates an inactive rule with no required prefix.
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

    /// Sets the accepted prefixes. A trailing `-` is ignored.
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

impl Rule for RequirePrefix {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Ensures that a component's tag begins with one of the given prefixes"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &FileContext, source: &SourceModel) -> Vec<Violation> {
        if self.prefixes.is_empty() {
            return Vec::new();
        }
        let expected = self.prefixes.join("|");
        source
            .components()
            .filter_map(component_tag)
            .filter(|tag| !self.prefixes.iter().any(|p| tag.has_prefix(p)))
            .map(|tag| {
                Violation::new(
                    CODE,
                    NAME,
                    self.severity,
                    ctx.location(tag.span),
                    format!(
                        "Invalid tag prefix \"{}\". Tag must begin with \"{expected}\"",
                        tag.prefix()
                    ),
                )
                .with_suggestion(Suggestion::new(format!(
                    "Rename `{}` to start with `{}-`",
                    tag.name, self.prefixes[0]
                )))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{reported, run};

    fn component(tag: &str) -> String {
        format!("@Component({{ tag: '{tag}' }})\nexport class Cmp {{}}\n")
    }

    #[test]
    fn matching_prefix_passes() {
        let rule = RequirePrefix::new().prefixes(["ion", "ionic"]);
        assert!(run(&rule, &component("ion-button")).is_empty());
        assert!(run(&rule, &component("ionic-card")).is_empty());
    }

    #[test]
    fn other_prefix_fails() {
        let src = component("my-button");
        let violations = run(&RequirePrefix::new().prefixes(["ion", "ionic"]), &src);
        assert_eq!(violations.len(), 1);
        insta::assert_snapshot!(violations[0].message, @r#"Invalid tag prefix "my". Tag must begin with "ion|ionic""#);
        assert_eq!(reported(&src, &violations[0]), "'my-button'");
    }

    #[test]
    fn bare_prefix_is_not_enough() {
        let rule = RequirePrefix::new().prefixes(["ion"]);
        assert_eq!(run(&rule, &component("ionbutton")).len(), 1);
    }

    #[test]
    fn inactive_without_prefixes() {
        assert!(run(&RequirePrefix::new(), &component("my-button")).is_empty());
    }
}
