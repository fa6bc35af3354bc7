//! Rule to require `render` to be the last member of a class.
//!
//! Applies to every class, not only components.

use stencil_lint_core::{FileContext, Rule, Severity, SourceModel, Suggestion, Violation};

/// Rule code for render-as-final-method.
pub const CODE: &str = "SL005";

/// Rule name for render-as-final-method.
pub const NAME: &str = "render-as-final-method";

/// Requires `render` to be declared last.
#[derive(Debug, Clone)]
pub struct RenderAsFinalMethod {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for RenderAsFinalMethod {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderAsFinalMethod {
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

impl Rule for RenderAsFinalMethod {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Ensures that the render method is the last member of a class"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &FileContext, source: &SourceModel) -> Vec<Violation> {
        source
            .classes
            .iter()
            .flat_map(|class| {
                let last = class.members.len().saturating_sub(1);
                class
                    .members
                    .iter()
                    .enumerate()
                    .filter(move |(i, m)| *i != last && m.is_named("render"))
                    .map(|(_, m)| m)
            })
            .map(|member| {
                let span = member.name_span.unwrap_or(member.span);
                Violation::new(
                    CODE,
                    NAME,
                    self.severity,
                    ctx.location(span),
                    "Render should be the last method",
                )
                .with_suggestion(Suggestion::new("Move `render` to the end of the class"))
            })
            .collect()
    }
}
