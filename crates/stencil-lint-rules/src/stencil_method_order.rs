//! Rule to keep `hostData` and `render` together and in a fixed order.
//!
//! # Configuration
//!
//! ```toml
//! [rules.stencil-method-order]
//! order = ["hostData", "render"]
//! ```
//!
//! Without `order` the rule reports nothing.

use stencil_lint_core::{
    ClassDeclaration, ClassMember, FileContext, MemberKind, Rule, RuleConfig, Severity, SourceModel,
    Suggestion, Violation,
};

use crate::constants::{is_stencil_method, STENCIL_METHODS};
use crate::OptionError;

/// Rule code for stencil-method-order.
pub const CODE: &str = "SL004";

/// Rule name for stencil-method-order.
pub const NAME: &str = "stencil-method-order";

const GROUP_MESSAGE: &str = "Stencil methods should all be grouped together";

/// Requires framework methods to be grouped and ordered.
#[derive(Debug, Clone)]
pub struct StencilMethodOrder {
    /// Expected order of `hostData` / `render`; empty disables the rule.
    pub order: Vec<String>,
    /// Custom severity.
    pub severity: Severity,
}

impl Default for StencilMethodOrder {
    fn default() -> Self {
        Self::new()
    }
}

impl StencilMethodOrder {
    /// Creates an inactive rule with no configured order.
    #[must_use]
    pub fn new() -> Self {
        Self {
            order: Vec::new(),
            severity: Severity::Error,
        }
    }

    /// Creates the rule from its configuration section.
    ///
    /// # Errors
    ///
    /// Returns an error if `order` is not a list of framework method names.
    pub fn from_config(config: &RuleConfig) -> Result<Self, OptionError> {
        let order = config
            .parse_option::<Vec<String>>("order")
            .map_err(|source| OptionError::config(NAME, source))?
            .unwrap_or_default();
        if let Some(unknown) = order.iter().find(|name| !is_stencil_method(name)) {
            return Err(OptionError::invalid(
                NAME,
                "order",
                unknown,
                &STENCIL_METHODS.join(", "),
            ));
        }
        Ok(Self::new().order(order))
    }

    /// Sets the expected order.
    #[must_use]
    pub fn order<S: Into<String>>(mut self, order: impl IntoIterator<Item = S>) -> Self {
        self.order = order.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    fn order_message(&self) -> String {
        format!(
            "Stencil methods should be in the following order: \"{}\"",
            self.order.join(", ")
        )
    }

    /// Returns true if `names` matches the configured order restricted to
    /// the names present.
    fn follows_order(&self, names: &[&str]) -> bool {
        let expected: Vec<&str> = self
            .order
            .iter()
            .map(String::as_str)
            .filter(|name| names.contains(name))
            .collect();
        names
            .iter()
            .enumerate()
            .all(|(i, name)| expected.get(i) == Some(name))
    }

    fn check_class(&self, ctx: &FileContext, class: &ClassDeclaration, out: &mut Vec<Violation>) {
        let methods = class
            .members
            .iter()
            .filter(|m| m.kind == MemberKind::Method)
            .filter_map(|m| Some((m.name.as_deref()?, m)));

        let mut stencil: Vec<(&str, &ClassMember)> = Vec::new();
        for (name, member) in methods {
            if is_stencil_method(name) {
                stencil.push((name, member));
            } else if !stencil.is_empty() {
                out.push(
                    Violation::new(CODE, NAME, self.severity, ctx.location(member.span), GROUP_MESSAGE)
                        .with_suggestion(Suggestion::new(format!(
                            "Move `{name}` above the framework methods"
                        ))),
                );
            }
        }

        if stencil.len() < 2 {
            return;
        }
        let names: Vec<&str> = stencil.iter().map(|(name, _)| *name).collect();
        if self.follows_order(&names) {
            return;
        }
        for (_, member) in stencil {
            out.push(Violation::new(
                CODE,
                NAME,
                self.severity,
                ctx.location(member.span),
                self.order_message(),
            ));
        }
    }
}

impl Rule for StencilMethodOrder {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Ensures that Stencil methods (hostData, render) are grouped and ordered consistently"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &FileContext, source: &SourceModel) -> Vec<Violation> {
        let mut violations = Vec::new();
        if self.order.is_empty() {
            return violations;
        }
        for class in source.components() {
            self.check_class(ctx, class, &mut violations);
        }
        violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{reported, run};
    use stencil_lint_core::Config;

    fn rule() -> StencilMethodOrder {
        StencilMethodOrder::new().order(["hostData", "render"])
    }

    fn component(body: &str) -> String {
        format!("@Component({{ tag: 'x-a' }})\nclass A {{\n{body}\n}}\n")
    }

    #[test]
    fn ordered_and_grouped_passes() {
        let src = component("  helper() {}\n  hostData() { return {}; }\n  render() {}");
        assert!(run(&rule(), &src).is_empty());
    }

    #[test]
    fn method_after_render_breaks_group() {
        let src = component("  render() {}\n  helper() {}");
        let violations = run(&rule(), &src);
        assert_eq!(violations.len(), 1);
        insta::assert_snapshot!(violations[0].message, @"Stencil methods should all be grouped together");
        assert_eq!(reported(&src, &violations[0]), "helper() {}");
    }

    #[test]
    fn wrong_order_reports_each_method() {
        let src = component("  render() {}\n  hostData() { return {}; }");
        let violations = run(&rule(), &src);
        assert_eq!(violations.len(), 2);
        insta::assert_snapshot!(violations[0].message, @r#"Stencil methods should be in the following order: "hostData, render""#);
    }

    #[test]
    fn properties_do_not_break_group() {
        let src = component("  render() {}\n  label = 'x';");
        assert!(run(&rule(), &src).is_empty());
    }

    #[test]
    fn inactive_without_order() {
        let src = component("  render() {}\n  hostData() { return {}; }\n  helper() {}");
        assert!(run(&StencilMethodOrder::new(), &src).is_empty());
    }

    #[test]
    fn order_from_config() {
        let config =
            Config::parse("[rules.stencil-method-order]\norder = [\"render\", \"hostData\"]\n").unwrap();
        let rule = StencilMethodOrder::from_config(config.rule(NAME).unwrap()).unwrap();
        assert_eq!(rule.order, vec!["render", "hostData"]);

        let config = Config::parse("[rules.stencil-method-order]\norder = [\"paint\"]\n").unwrap();
        assert!(StencilMethodOrder::from_config(config.rule(NAME).unwrap()).is_err());
    }
}
