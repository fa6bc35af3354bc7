//! Rule to keep `@Watch` methods next to the member they observe.
//!
//! # Rationale
//!
//! A watcher declared directly below its `@Prop` or `@State` reads as part
//! of that member's declaration.
//!
//! # Detected Patterns
//!
//! - A `@Watch` method that is the first member of the class
//! - A `@Watch` method directly below a `@Prop`/`@State` with another name
//!   (members without an identifier name are skipped)
//!
//! A watcher below any other kind of member is not reported here; the
//! adjacency option of `component-member-order` is stricter.

use stencil_lint_core::{ClassMember, FileContext, Rule, Severity, SourceModel, Suggestion, Violation};

/// Rule code for watch-follows-prop.
pub const CODE: &str = "SL002";

/// Rule name for watch-follows-prop.
pub const NAME: &str = "watch-follows-prop";

const MESSAGE: &str =
    "Watch methods should immediately follow the declaration of the Prop/State they watch";

/// Requires watchers to follow the prop or state they watch.
#[derive(Debug, Clone)]
pub struct WatchFollowsProp {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for WatchFollowsProp {
    fn default() -> Self {
        Self::new()
    }
}

impl WatchFollowsProp {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            severity: Severity::Error,
        }
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

fn is_misplaced(prev: Option<&ClassMember>, watched: &str) -> bool {
    let Some(prev) = prev else {
        return true;
    };
    let observable = prev.has_decorator("Prop") || prev.has_decorator("State");
    observable && prev.name.as_deref().is_some_and(|name| name != watched)
}

impl Rule for WatchFollowsProp {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Ensures that @Watch methods immediately follow the Prop or State they watch"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &FileContext, source: &SourceModel) -> Vec<Violation> {
        let mut violations = Vec::new();

        for class in source.components() {
            for (i, member) in class.members.iter().enumerate() {
                let Some(watch) = member.decorator("Watch") else {
                    continue;
                };
                let watched = watch.first_string().unwrap_or_default();
                let prev = i.checked_sub(1).and_then(|p| class.members.get(p));
                if !is_misplaced(prev, watched) {
                    continue;
                }

                violations.push(
                    Violation::new(CODE, NAME, self.severity, ctx.location(member.span), MESSAGE)
                        .with_suggestion(Suggestion::new(format!(
                            "Move this watcher directly below `{watched}`"
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

    #[test]
    fn watcher_below_its_target_passes() {
        let src = "@Component({ tag: 'x-a' })\nclass A {\n  @Prop() value: string;\n  @Watch('value') valueChanged() {}\n}\n";
        assert!(run(&WatchFollowsProp::new(), src).is_empty());
    }

    #[test]
    fn watcher_below_another_prop_fails() {
        let src = "@Component({ tag: 'x-a' })\nclass A {\n  @Prop() value: string;\n  @State() open = false;\n  @Watch('value') valueChanged() {}\n}\n";
        let violations = run(&WatchFollowsProp::new(), src);
        assert_eq!(violations.len(), 1);
        insta::assert_snapshot!(violations[0].message, @"Watch methods should immediately follow the declaration of the Prop/State they watch");
        assert_eq!(reported(src, &violations[0]), "@Watch('value') valueChanged() {}");
    }

    #[test]
    fn first_member_watcher_fails() {
        let src = "@Component({ tag: 'x-a' })\nclass A {\n  @Watch('value') valueChanged() {}\n  @Prop() value: string;\n}\n";
        assert_eq!(run(&WatchFollowsProp::new(), src).len(), 1);
    }

    #[test]
    fn watcher_below_plain_member_is_ignored() {
        let src = "@Component({ tag: 'x-a' })\nclass A {\n  @Prop() value: string;\n  helper() {}\n  @Watch('value') valueChanged() {}\n}\n";
        assert!(run(&WatchFollowsProp::new(), src).is_empty());
    }

    #[test]
    fn watcher_below_unnamed_prop_is_ignored() {
        let src = "@Component({ tag: 'x-a' })\nclass A {\n  @Prop() ['value']: string;\n  @Watch('value') valueChanged() {}\n}\n";
        assert!(run(&WatchFollowsProp::new(), src).is_empty());
    }

    #[test]
    fn plain_classes_are_ignored() {
        let src = "class A {\n  @Watch('value') valueChanged() {}\n}\n";
        assert!(run(&WatchFollowsProp::new(), src).is_empty());
    }
}
