//! Rule to keep decorators and the members they decorate on a consistent
//! number of lines.
//!
//! # Configuration
//!
//! ```toml
//! [rules.decorated-member-style]
//! properties = "singleline"
//! methods = "multiline"
//! ```
//!
//! Each key accepts `singleline`, `multiline` or `ignore` (the default).
//! A member is multiline when its declaration starts on a line after its
//! last decorator. For methods with several decorators, `multiline` also
//! requires each decorator on its own line.
//!
//! Every finding carries an automatic fix.

use std::fmt;
use std::str::FromStr;

use stencil_lint_core::utils::{line_ending, line_indent};
use stencil_lint_core::{
    ClassMember, Decorator, FileContext, MemberKind, Replacement, Rule, RuleConfig, Severity,
    SourceModel, Suggestion, Violation,
};

use crate::OptionError;

/// Rule code for decorated-member-style.
pub const CODE: &str = "SL009";

/// Rule name for decorated-member-style.
pub const NAME: &str = "decorated-member-style";

/// Layout required for a kind of decorated member.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DecoratorStyle {
    /// Decorators on the declaration's line.
    Singleline,
    /// Declaration on the line after the decorators.
    Multiline,
    /// Not checked.
    #[default]
    Ignore,
}

impl DecoratorStyle {
    fn as_str(self) -> &'static str {
        match self {
            Self::Singleline => "singleline",
            Self::Multiline => "multiline",
            Self::Ignore => "ignore",
        }
    }
}

impl fmt::Display for DecoratorStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DecoratorStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "singleline" => Ok(Self::Singleline),
            "multiline" => Ok(Self::Multiline),
            "ignore" => Ok(Self::Ignore),
            other => Err(other.to_string()),
        }
    }
}

/// Layout problem found on one member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layout {
    /// Should be on one line.
    Inline,
    /// Declaration should move below the decorators.
    Multiline,
    /// Each decorator should get its own line.
    Composition,
}

impl Layout {
    fn message(self, kind: &str) -> String {
        match self {
            Self::Inline => format!("Component {kind} decorators should be inlined"),
            Self::Multiline => format!("Component {kind} decorators should be multiline"),
            Self::Composition => {
                format!("Component {kind} decorators should each be on their own lines")
            }
        }
    }

    fn suggestion(self) -> &'static str {
        match self {
            Self::Inline => "Join the decorators and the declaration on one line",
            Self::Multiline => "Move the declaration below its decorators",
            Self::Composition => "Put each decorator on its own line",
        }
    }
}

/// Requires decorated properties and methods to follow a layout.
#[derive(Debug, Clone)]
pub struct DecoratedMemberStyle {
    /// Layout for decorated properties.
    pub properties: DecoratorStyle,
    /// Layout for decorated methods.
    pub methods: DecoratorStyle,
    /// Custom severity.
    pub severity: Severity,
}

impl Default for DecoratedMemberStyle {
    fn default() -> Self {
        Self::new()
    }
}

impl DecoratedMemberStyle {
    /// Creates a rule that ignores both properties and methods.
    #[must_use]
    pub fn new() -> Self {
        Self {
            properties: DecoratorStyle::Ignore,
            methods: DecoratorStyle::Ignore,
            severity: Severity::Error,
        }
    }

    /// Creates the rule from its configuration section.
    ///
    /// # Errors
    ///
    /// Returns an error if `properties` or `methods` is not a known style.
    pub fn from_config(config: &RuleConfig) -> Result<Self, OptionError> {
        Ok(Self::new()
            .properties(style_option(config, "properties")?)
            .methods(style_option(config, "methods")?))
    }

    /// Sets the layout for properties.
    #[must_use]
    pub fn properties(mut self, style: DecoratorStyle) -> Self {
        self.properties = style;
        self
    }

    /// Sets the layout for methods.
    #[must_use]
    pub fn methods(mut self, style: DecoratorStyle) -> Self {
        self.methods = style;
        self
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    fn check_member(&self, ctx: &FileContext, member: &ClassMember) -> Option<Violation> {
        let (style, kind) = match member.kind {
            MemberKind::Property => (self.properties, "property"),
            MemberKind::Method => (self.methods, "method"),
            _ => return None,
        };
        let layout = layout_problem(ctx, member, style, member.kind == MemberKind::Method)?;
        let fix = layout_fix(ctx.content, member, layout)?;

        Some(
            Violation::new(CODE, NAME, self.severity, ctx.location(member.span), layout.message(kind))
                .with_suggestion(Suggestion::with_fix(layout.suggestion(), vec![fix])),
        )
    }
}

fn style_option(config: &RuleConfig, key: &'static str) -> Result<DecoratorStyle, OptionError> {
    let Some(value) = config
        .parse_option::<String>(key)
        .map_err(|source| OptionError::config(NAME, source))?
    else {
        return Ok(DecoratorStyle::Ignore);
    };
    value.parse().map_err(|value: String| {
        OptionError::invalid(NAME, key, &value, "\"singleline\", \"multiline\" or \"ignore\"")
    })
}

fn line(ctx: &FileContext, offset: usize) -> usize {
    ctx.position(offset).0
}

fn layout_problem(
    ctx: &FileContext,
    member: &ClassMember,
    style: DecoratorStyle,
    composable: bool,
) -> Option<Layout> {
    let last = member.decorators.last()?;
    let decorator_line = line(ctx, last.span.end);
    let name_line = line(ctx, member.name_span.map_or(member.declaration_start, |s| s.end));

    match style {
        DecoratorStyle::Ignore => None,
        DecoratorStyle::Singleline => (decorator_line != name_line).then_some(Layout::Inline),
        DecoratorStyle::Multiline => {
            if composable && member.decorators.len() > 1 {
                let each_on_own_line = member
                    .decorators
                    .windows(2)
                    .all(|pair| line(ctx, pair[1].span.end) > line(ctx, pair[0].span.end));
                if !each_on_own_line {
                    return Some(Layout::Composition);
                }
            }
            (decorator_line == name_line).then_some(Layout::Multiline)
        }
    }
}

fn decorator_text<'s>(source: &'s str, decorator: &Decorator) -> &'s str {
    source
        .get(decorator.span.start..decorator.span.end)
        .unwrap_or("")
        .trim()
}

/// Edit between the decorators and the declaration that produces `layout`.
fn layout_fix(source: &str, member: &ClassMember, layout: Layout) -> Option<Replacement> {
    let first = member.decorators.first()?;
    let last = member.decorators.last()?;
    let newline = format!(
        "{}{}",
        line_ending(source, member.span.start),
        line_indent(source, member.span.start).unwrap_or("")
    );

    let replacement = match layout {
        Layout::Inline => Replacement::new(last.span.end, member.declaration_start, " "),
        Layout::Multiline => Replacement::new(last.span.end, member.declaration_start, newline),
        Layout::Composition => {
            let mut text = String::new();
            for decorator in &member.decorators[1..] {
                text.push_str(&newline);
                text.push_str(decorator_text(source, decorator));
            }
            text.push_str(&newline);
            Replacement::new(first.span.end, member.declaration_start, text)
        }
    };
    (replacement.start <= replacement.end).then_some(replacement)
}

impl Rule for DecoratedMemberStyle {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires decorated members to follow a consistent single-line or multiline style"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &FileContext, source: &SourceModel) -> Vec<Violation> {
        if self.properties == DecoratorStyle::Ignore && self.methods == DecoratorStyle::Ignore {
            return Vec::new();
        }
        source
            .components()
            .flat_map(|class| &class.members)
            .filter_map(|member| self.check_member(ctx, member))
            .collect()
    }
}
