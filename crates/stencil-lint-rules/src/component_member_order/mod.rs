//! Rule to keep component members grouped, ordered and sorted.
//!
//! # Rationale
//!
//! Components that declare their props, state, watchers and methods in a
//! consistent order are easier to scan and review.
//!
//! # Checks
//!
//! Every member of a `@Component` class is classified into a
//! [`MemberCategory`]. Then, per class:
//!
//! 1. Grouping: members of one category must be contiguous.
//! 2. Order: categories must follow the configured `order`.
//! 3. Watch adjacency: each `@Watch` method directly follows its target.
//! 4. Alphabetical: members of a category are sorted by name. This check
//!    carries an automatic fix.
//!
//! Grouping and order run only when `order` is set. A grouping failure skips
//! the order and alphabetical checks for that class.
//!
//! # Configuration
//!
//! ```toml
//! [rules.component-member-order]
//! order = ["own-prop", "element", "state", "prop", "event", "lifecycle", "method", "own-method", "stencil-method"]
//! watch-follows-prop = true
//! alphabetical = true
//! ```

mod category;
mod classify;
mod fix;
mod validate;

pub use category::{MemberCategory, UnknownCategory};
pub use classify::{classify, collect, misplaced_watchers, ClassifiedMember};
pub use fix::alphabetical_fix;
pub use validate::{check_grouping, check_order, unsorted_categories, GroupingFailure, OrderFailure};

use serde::Deserialize;
use stencil_lint_core::{
    ClassDeclaration, FileContext, Replacement, Rule, RuleConfig, Severity, SourceModel, Span,
    Suggestion, Violation,
};

use crate::OptionError;

/// Rule code for component-member-order.
pub const CODE: &str = "SL001";

/// Rule name for component-member-order.
pub const NAME: &str = "component-member-order";

/// Message for watchers not declared right after their target.
pub const WATCH_MESSAGE: &str =
    "Watch methods should immediately follow the declaration of the Prop/State they watch";

/// Message for unsorted members.
pub const ALPHABETICAL_MESSAGE: &str = "Component members of the same type should be alphabetized";

/// Category order used by the recommended preset.
pub const RECOMMENDED_ORDER: [MemberCategory; 13] = [
    MemberCategory::OwnProp,
    MemberCategory::Element,
    MemberCategory::State,
    MemberCategory::WatchedState,
    MemberCategory::InternalProp,
    MemberCategory::Prop,
    MemberCategory::WatchedProp,
    MemberCategory::Event,
    MemberCategory::Lifecycle,
    MemberCategory::Listen,
    MemberCategory::Method,
    MemberCategory::OwnMethod,
    MemberCategory::StencilMethod,
];

/// Options for [`ComponentMemberOrder`]. Everything is off by default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberOrderOptions {
    /// Expected category sequence; `None` disables grouping and order checks.
    pub order: Option<Vec<MemberCategory>>,
    /// Require each watcher to directly follow the member it watches.
    pub watch_follows_prop: bool,
    /// Require members of a category to be sorted by name.
    pub alphabetical: bool,
}

/// `order` as written in configuration: a list, or `false`.
#[derive(Deserialize)]
#[serde(untagged)]
enum OrderValue {
    Flag(bool),
    List(Vec<String>),
}

impl MemberOrderOptions {
    /// Reads options from a `[rules.component-member-order]` section.
    ///
    /// # Errors
    ///
    /// Returns an error for malformed values or unknown category names.
    pub fn from_config(config: &RuleConfig) -> Result<Self, OptionError> {
        let order = match config
            .parse_option::<OrderValue>("order")
            .map_err(|source| OptionError::config(NAME, source))?
        {
            None | Some(OrderValue::Flag(false)) => None,
            Some(OrderValue::Flag(true)) => {
                return Err(OptionError::invalid(NAME, "order", "true", "a list of categories or false"));
            }
            Some(OrderValue::List(names)) => Some(
                names
                    .iter()
                    .map(|name| {
                        name.parse::<MemberCategory>().map_err(|_| {
                            OptionError::invalid(NAME, "order", name, &category_names())
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()?,
            ),
        };

        let flag = |key: &str| {
            config
                .parse_option::<bool>(key)
                .map(Option::unwrap_or_default)
                .map_err(|source| OptionError::config(NAME, source))
        };

        Ok(Self {
            order,
            watch_follows_prop: flag("watch-follows-prop")?,
            alphabetical: flag("alphabetical")?,
        })
    }
}

fn category_names() -> String {
    MemberCategory::ALL
        .iter()
        .map(|c| c.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// One finding for a component class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    /// Source range reported.
    pub span: Span,
    /// Failure message.
    pub message: String,
    /// How to resolve it.
    pub help: String,
    /// Automatic edits, ordered and non-overlapping.
    pub replacements: Vec<Replacement>,
}

impl Finding {
    fn covering(members: &[ClassifiedMember<'_>], indices: &[usize], message: String, help: String) -> Option<Self> {
        let first = members.get(*indices.first()?)?;
        let last = members.get(*indices.last()?)?;
        Some(Self {
            span: first.member.span.cover(&last.member.span),
            message,
            help,
            replacements: Vec::new(),
        })
    }
}

/// Runs every check on each component class in `model`.
///
/// `source` is the text `model` was extracted from; fixes are computed
/// against it.
#[must_use]
pub fn analyze(model: &SourceModel, source: &str, options: &MemberOrderOptions) -> Vec<Finding> {
    model
        .components()
        .flat_map(|class| analyze_class(class, source, options))
        .collect()
}

/// Runs every check on a single class.
#[must_use]
pub fn analyze_class(class: &ClassDeclaration, source: &str, options: &MemberOrderOptions) -> Vec<Finding> {
    let members = collect(class);
    let mut findings = Vec::new();
    if members.is_empty() {
        return findings;
    }

    let mut grouped = true;
    if let Some(order) = &options.order {
        if let Some(failure) = check_grouping(&members, options.watch_follows_prop) {
            grouped = false;
            let help = format!(
                "Declare all {} members next to each other",
                failure.category.label()
            );
            findings.extend(Finding::covering(&members, &failure.members, failure.message(), help));
        } else if let Some(failure) = check_order(&members, order) {
            let indices = indices_in(&members, &[failure.category]);
            let help = format!(
                "Expected order: {}",
                order.iter().map(|c| c.as_str()).collect::<Vec<_>>().join(", ")
            );
            findings.extend(Finding::covering(&members, &indices, failure.message(), help));
        }
    }

    if options.watch_follows_prop {
        for i in misplaced_watchers(&members) {
            let target = members[i].watches.unwrap_or_default();
            findings.push(Finding {
                span: members[i].member.span,
                message: WATCH_MESSAGE.to_string(),
                help: format!("Move `{}` directly below `{target}`", members[i].name),
                replacements: Vec::new(),
            });
        }
    }

    if options.alphabetical && grouped {
        let unsorted = unsorted_categories(&members, options.order.as_deref());
        if !unsorted.is_empty() {
            let replacements = unsorted
                .iter()
                .flat_map(|category| {
                    let group: Vec<&ClassifiedMember<'_>> =
                        members.iter().filter(|m| m.category == *category).collect();
                    alphabetical_fix(source, &group)
                })
                .collect();
            let indices = indices_in(&members, &unsorted);
            if let Some(mut finding) = Finding::covering(
                &members,
                &indices,
                ALPHABETICAL_MESSAGE.to_string(),
                "Sort these members by name".to_string(),
            ) {
                finding.replacements = replacements;
                findings.push(finding);
            }
        }
    }

    findings
}

fn indices_in(members: &[ClassifiedMember<'_>], categories: &[MemberCategory]) -> Vec<usize> {
    members
        .iter()
        .enumerate()
        .filter(|(_, m)| categories.contains(&m.category))
        .map(|(i, _)| i)
        .collect()
}

/// Keeps component members grouped, ordered and sorted.
#[derive(Debug, Clone)]
pub struct ComponentMemberOrder {
    options: MemberOrderOptions,
    severity: Severity,
}

impl Default for ComponentMemberOrder {
    fn default() -> Self {
        Self::new()
    }
}

impl ComponentMemberOrder {
    /// Creates a new rule with every check disabled.
    #[must_use]
    pub fn new() -> Self {
        Self {
            options: MemberOrderOptions::default(),
            severity: Severity::Error,
        }
    }

    /// Creates the rule with the recommended order and watch adjacency.
    #[must_use]
    pub fn recommended() -> Self {
        Self::new()
            .order(RECOMMENDED_ORDER.to_vec())
            .watch_follows_prop(true)
    }

    /// Creates the rule from its configuration section.
    ///
    /// # Errors
    ///
    /// Returns an error if the section has malformed options.
    pub fn from_config(config: &RuleConfig) -> Result<Self, OptionError> {
        Ok(Self {
            options: MemberOrderOptions::from_config(config)?,
            ..Self::new()
        })
    }

    /// Sets the expected category order.
    #[must_use]
    pub fn order(mut self, order: Vec<MemberCategory>) -> Self {
        self.options.order = Some(order);
        self
    }

    /// Enables or disables the watch adjacency check.
    #[must_use]
    pub fn watch_follows_prop(mut self, enabled: bool) -> Self {
        self.options.watch_follows_prop = enabled;
        self
    }

    /// Enables or disables the alphabetical check.
    #[must_use]
    pub fn alphabetical(mut self, enabled: bool) -> Self {
        self.options.alphabetical = enabled;
        self
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Returns the active options.
    #[must_use]
    pub fn options(&self) -> &MemberOrderOptions {
        &self.options
    }
}

impl Rule for ComponentMemberOrder {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Ensures that component members are grouped, ordered and sorted consistently"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &FileContext, source: &SourceModel) -> Vec<Violation> {
        analyze(source, ctx.content, &self.options)
            .into_iter()
            .map(|finding| {
                let suggestion = if finding.replacements.is_empty() {
                    Suggestion::new(finding.help)
                } else {
                    Suggestion::with_fix(finding.help, finding.replacements)
                };
                Violation::new(
                    CODE,
                    NAME,
                    self.severity,
                    ctx.location(finding.span),
                    finding.message,
                )
                .with_suggestion(suggestion)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use stencil_lint_core::{apply_replacements, Config, LanguageExtractor};
    use stencil_lint_ts::TypeScriptExtractor;
    use super::MemberCategory::{OwnMethod, Prop, State};

    fn component(body: &str) -> String {
        format!("@Component({{ tag: 'x-cmp' }})\nexport class Cmp {{\n{body}\n}}\n")
    }

    fn run(src: &str, options: &MemberOrderOptions) -> Vec<Finding> {
        let model = TypeScriptExtractor::new().extract(src, ".tsx").expect("extracts");
        analyze(&model, src, options)
    }

    fn check(rule: &ComponentMemberOrder, src: &str) -> Vec<Violation> {
        let model = TypeScriptExtractor::new().extract(src, ".tsx").expect("extracts");
        let ctx = FileContext::new(Path::new("cmp.tsx"), src, Path::new("."));
        rule.check(&ctx, &model)
    }

    fn alphabetical_only() -> MemberOrderOptions {
        MemberOrderOptions {
            alphabetical: true,
            ..MemberOrderOptions::default()
        }
    }

    #[test]
    fn unsorted_own_props_are_fixed() {
        let src = component("  b = 2;\n  a = 1;");
        let findings = run(&src, &alphabetical_only());
        assert_eq!(findings.len(), 1);
        insta::assert_snapshot!(findings[0].message, @"Component members of the same type should be alphabetized");
        assert_eq!(&src[findings[0].span.start..findings[0].span.end], "b = 2;\n  a = 1;");

        let fixed = apply_replacements(&src, &findings[0].replacements);
        assert_eq!(fixed, component("  a = 1;\n  b = 2;"));
        assert!(run(&fixed, &alphabetical_only()).is_empty());
    }

    #[test]
    fn grouping_failure_suppresses_order_and_alphabetical() {
        let src = component("  @State() x = 1;\n  @Prop() y: string;\n  @State() a = 2;");
        let options = MemberOrderOptions {
            order: Some(vec![State, Prop]),
            alphabetical: true,
            ..MemberOrderOptions::default()
        };
        let findings = run(&src, &options);
        assert_eq!(findings.len(), 1);
        insta::assert_snapshot!(findings[0].message, @"State and Prop should not be mixed");
        assert_eq!(
            &src[findings[0].span.start..findings[0].span.end],
            "@State() x = 1;\n  @Prop() y: string;\n  @State() a = 2;"
        );
    }

    #[test]
    fn watcher_two_members_after_target() {
        let src = component(
            "  @State() count = 0;\n  @Prop() label: string;\n  @Watch('count') countChanged() {}",
        );
        let options = MemberOrderOptions {
            watch_follows_prop: true,
            ..MemberOrderOptions::default()
        };
        let findings = run(&src, &options);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].message, WATCH_MESSAGE);
        assert_eq!(
            &src[findings[0].span.start..findings[0].span.end],
            "@Watch('count') countChanged() {}"
        );
    }

    #[test]
    fn watcher_directly_after_target_is_clean() {
        let src = component(
            "  @Prop() label: string;\n  @State() count = 0;\n  @Watch('count') countChanged() {}",
        );
        let options = MemberOrderOptions {
            watch_follows_prop: true,
            ..MemberOrderOptions::default()
        };
        assert!(run(&src, &options).is_empty());
    }

    #[test]
    fn out_of_order_category_reported_once() {
        let src = component("  @State() s = 1;\n  @State() t = 2;\n  @Prop() p: string;");
        let options = MemberOrderOptions {
            order: Some(vec![Prop, State]),
            ..MemberOrderOptions::default()
        };
        let findings = run(&src, &options);
        assert_eq!(findings.len(), 1);
        insta::assert_snapshot!(findings[0].message, @r#"Component member "state" should be placed after "prop""#);
        assert_eq!(
            &src[findings[0].span.start..findings[0].span.end],
            "@State() s = 1;\n  @State() t = 2;"
        );
    }

    #[test]
    fn adjacency_runs_alongside_grouping() {
        let src = component(
            "  @State() a = 0;\n  helper() {}\n  @State() b = 1;\n  @Prop() value: string;\n  @Prop() other: string;\n  @Watch('value') valueChanged() {}",
        );
        let options = MemberOrderOptions {
            order: Some(vec![State, OwnMethod]),
            watch_follows_prop: true,
            alphabetical: false,
        };
        let messages: Vec<_> = run(&src, &options).into_iter().map(|f| f.message).collect();
        assert_eq!(messages, vec!["State and Own Method should not be mixed", WATCH_MESSAGE]);
    }

    #[test]
    fn non_component_classes_are_ignored() {
        let src = "class Plain {\n  b = 2;\n  a = 1;\n}\n";
        assert!(run(src, &alphabetical_only()).is_empty());
    }

    #[test]
    fn nested_component_classes_are_checked() {
        let src = "export function make() {\n  @Component({ tag: 'inner-cmp' })\n  class Inner {\n    b = 2;\n    a = 1;\n  }\n  return Inner;\n}\n";
        assert_eq!(run(src, &alphabetical_only()).len(), 1);
    }

    #[test]
    fn several_unsorted_categories_share_one_failure() {
        let src = component("  b = 2;\n  a = 1;\n  @Prop() d: string;\n  @Prop() c: string;");
        let findings = run(&src, &alphabetical_only());
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].replacements.len(), 2);
        let fixed = apply_replacements(&src, &findings[0].replacements);
        assert_eq!(
            fixed,
            component("  a = 1;\n  b = 2;\n  @Prop() c: string;\n  @Prop() d: string;")
        );
    }

    #[test]
    fn rule_reports_violations_with_fix() {
        let rule = ComponentMemberOrder::new().alphabetical(true);
        let src = component("  b = 2;\n  a = 1;");
        let violations = check(&rule, &src);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].code, CODE);
        assert_eq!((violations[0].location.line, violations[0].location.column), (3, 3));
        assert!(violations[0].suggestion.as_ref().is_some_and(Suggestion::is_fixable));
    }

    #[test]
    fn default_rule_reports_nothing() {
        let src = component("  @State() x = 1;\n  @Prop() y: string;\n  @State() a = 2;");
        assert!(check(&ComponentMemberOrder::new(), &src).is_empty());
    }

    #[test]
    fn options_from_config() {
        let config = Config::parse(
            r#"
[rules.component-member-order]
order = ["prop", "state"]
watch-follows-prop = true
"#,
        )
        .unwrap();
        let options = MemberOrderOptions::from_config(config.rule(NAME).unwrap()).unwrap();
        assert_eq!(options.order, Some(vec![Prop, State]));
        assert!(options.watch_follows_prop);
        assert!(!options.alphabetical);

        let config = Config::parse("[rules.component-member-order]\norder = false\n").unwrap();
        let options = MemberOrderOptions::from_config(config.rule(NAME).unwrap()).unwrap();
        assert_eq!(options.order, None);
    }

    #[test]
    fn unknown_category_is_rejected() {
        let config =
            Config::parse("[rules.component-member-order]\norder = [\"prop\", \"props\"]\n").unwrap();
        let err = MemberOrderOptions::from_config(config.rule(NAME).unwrap()).unwrap_err();
        assert!(err.to_string().contains("`props`"));
    }
}
