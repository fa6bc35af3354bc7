//! Rule to keep lifecycle methods in a consistent order.
//!
//! # Configuration
//!
//! ```toml
//! [rules.lifecycle-order]
//! mode = "call-order"  # or "alphabetical"
//! ```
//!
//! In `call-order` mode lifecycle methods follow the order the runtime
//! calls them. Each lifecycle method whose neighbours do not bracket it in
//! the expected order is reported at its name.

use std::fmt;
use std::str::FromStr;

use stencil_lint_core::{FileContext, Rule, RuleConfig, Severity, SourceModel, Suggestion, Violation};

use crate::constants::LIFECYCLE_METHODS;
use crate::OptionError;

/// Rule code for lifecycle-order.
pub const CODE: &str = "SL003";

/// Rule name for lifecycle-order.
pub const NAME: &str = "lifecycle-order";

/// Expected order of lifecycle methods.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LifecycleMode {
    /// The order the runtime calls them.
    #[default]
    CallOrder,
    /// Sorted by name.
    Alphabetical,
}

impl LifecycleMode {
    fn as_str(self) -> &'static str {
        match self {
            Self::CallOrder => "call-order",
            Self::Alphabetical => "alphabetical",
        }
    }

    fn message(self) -> &'static str {
        match self {
            Self::CallOrder => {
                "Component lifecycle methods should be ordered according to their call order"
            }
            Self::Alphabetical => "Component lifecycle methods should be ordered alphabetically",
        }
    }

    /// Lifecycle method names in the expected order.
    #[must_use]
    pub fn sequence(self) -> Vec<&'static str> {
        let mut names = LIFECYCLE_METHODS.to_vec();
        if self == Self::Alphabetical {
            names.sort_unstable();
        }
        names
    }
}

impl fmt::Display for LifecycleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LifecycleMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "call-order" => Ok(Self::CallOrder),
            "alphabetical" => Ok(Self::Alphabetical),
            other => Err(other.to_string()),
        }
    }
}

/// Requires lifecycle methods to be ordered.
#[derive(Debug, Clone)]
pub struct LifecycleOrder {
    /// Expected order.
    pub mode: LifecycleMode,
    /// Custom severity.
    pub severity: Severity,
}

impl Default for LifecycleOrder {
    fn default() -> Self {
        Self::new()
    }
}

impl LifecycleOrder {
    /// Creates a new rule in call-order mode.
    #[must_use]
    pub fn new() -> Self {
        Self {
            mode: LifecycleMode::CallOrder,
            severity: Severity::Error,
        }
    }

    /// Creates the rule from its configuration section.
    ///
    /// # Errors
    ///
    /// Returns an error if `mode` is not a known mode.
    pub fn from_config(config: &RuleConfig) -> Result<Self, OptionError> {
        let mode = match config
            .parse_option::<String>("mode")
            .map_err(|source| OptionError::config(NAME, source))?
        {
            Some(mode) => mode.parse().map_err(|value: String| {
                OptionError::invalid(NAME, "mode", &value, "\"call-order\" or \"alphabetical\"")
            })?,
            None => LifecycleMode::default(),
        };
        Ok(Self::new().mode(mode))
    }

    /// Sets the expected order.
    #[must_use]
    pub fn mode(mut self, mode: LifecycleMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

/// Indices in `ranks` that are not strictly between their neighbours.
fn misplaced(ranks: &[usize]) -> Vec<usize> {
    (0..ranks.len())
        .filter(|&i| {
            let after_prev = i.checked_sub(1).map_or(true, |p| ranks[p] < ranks[i]);
            let before_next = ranks.get(i + 1).map_or(true, |next| ranks[i] < *next);
            !(after_prev && before_next)
        })
        .collect()
}

impl Rule for LifecycleOrder {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Ensures that component lifecycle methods are ordered consistently"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &FileContext, source: &SourceModel) -> Vec<Violation> {
        let sequence = self.mode.sequence();
        let mut violations = Vec::new();

        for class in source.components() {
            let lifecycle: Vec<_> = class
                .members
                .iter()
                .filter_map(|m| {
                    let name = m.name.as_deref()?;
                    let rank = sequence.iter().position(|n| *n == name)?;
                    Some((m, rank))
                })
                .collect();
            if lifecycle.len() < 2 {
                continue;
            }

            let ranks: Vec<usize> = lifecycle.iter().map(|(_, rank)| *rank).collect();
            for i in misplaced(&ranks) {
                let member = lifecycle[i].0;
                let span = member.name_span.unwrap_or(member.span);
                violations.push(
                    Violation::new(CODE, NAME, self.severity, ctx.location(span), self.mode.message())
                        .with_suggestion(Suggestion::new(format!(
                            "Expected order: {}",
                            sequence.join(", ")
                        ))),
                );
            }
        }

        violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{reported, run};
    use stencil_lint_core::Config;

    fn component(body: &str) -> String {
        format!("@Component({{ tag: 'x-a' }})\nclass A {{\n{body}\n}}\n")
    }

    #[test]
    fn call_order_passes() {
        let src = component(
            "  componentWillLoad() {}\n  helper() {}\n  componentDidLoad() {}\n  componentDidUnload() {}",
        );
        assert!(run(&LifecycleOrder::new(), &src).is_empty());
    }

    #[test]
    fn swapped_pair_reports_both() {
        let src = component("  componentDidLoad() {}\n  componentWillLoad() {}");
        let violations = run(&LifecycleOrder::new(), &src);
        assert_eq!(violations.len(), 2);
        insta::assert_snapshot!(violations[0].message, @"Component lifecycle methods should be ordered according to their call order");
        assert_eq!(reported(&src, &violations[0]), "componentDidLoad");
        assert_eq!(reported(&src, &violations[1]), "componentWillLoad");
    }

    #[test]
    fn single_method_out_of_place() {
        let src = component(
            "  componentWillLoad() {}\n  componentDidUnload() {}\n  componentDidLoad() {}\n  componentDidUpdate() {}",
        );
        let names: Vec<_> = run(&LifecycleOrder::new(), &src)
            .iter()
            .map(|v| reported(&src, v).to_string())
            .collect();
        assert_eq!(names, vec!["componentDidUnload", "componentDidLoad"]);
    }

    #[test]
    fn lone_method_never_fails() {
        let src = component("  componentDidUnload() {}\n  helper() {}");
        assert!(run(&LifecycleOrder::new(), &src).is_empty());
    }

    #[test]
    fn alphabetical_mode() {
        let rule = LifecycleOrder::new().mode(LifecycleMode::Alphabetical);
        let src = component("  componentDidLoad() {}\n  componentWillLoad() {}");
        assert!(run(&rule, &src).is_empty());

        let src = component("  componentWillLoad() {}\n  componentDidLoad() {}");
        let violations = run(&rule, &src);
        assert_eq!(violations.len(), 2);
        assert_eq!(
            violations[0].message,
            "Component lifecycle methods should be ordered alphabetically"
        );
    }

    #[test]
    fn mode_from_config() {
        let config = Config::parse("[rules.lifecycle-order]\nmode = \"alphabetical\"\n").unwrap();
        let rule = LifecycleOrder::from_config(config.rule(NAME).unwrap()).unwrap();
        assert_eq!(rule.mode, LifecycleMode::Alphabetical);

        let config = Config::parse("[rules.lifecycle-order]\nmode = \"random\"\n").unwrap();
        let err = LifecycleOrder::from_config(config.rule(NAME).unwrap()).unwrap_err();
        assert!(err.to_string().contains("`random`"));
    }
}
