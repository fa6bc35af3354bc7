//! Rule trait for defining lint rules.

use crate::context::FileContext;
use crate::source::SourceModel;
use crate::types::{Severity, Violation};

/// A per-file lint rule over the extracted [`SourceModel`].
///
/// Rules are pure: they read the model and the file context and return
/// findings. Fixes travel inside the returned violations as data.
///
/// # Example
///
/// ```ignore
/// use stencil_lint_core::{FileContext, Rule, Severity, SourceModel, Violation};
///
/// pub struct NoAnonymousComponents;
///
/// impl Rule for NoAnonymousComponents {
///     fn name(&self) -> &'static str { "no-anonymous-components" }
///     fn code(&self) -> &'static str { "SL099" }
///
///     fn check(&self, ctx: &FileContext, source: &SourceModel) -> Vec<Violation> {
///         source
///             .components()
///             .filter(|c| c.name.is_none())
///             .map(|c| Violation::new(
///                 self.code(),
///                 self.name(),
///                 Severity::Error,
///                 ctx.location(c.span),
///                 "Components must be named",
///             ))
///             .collect()
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the kebab-case name of this rule (e.g., "component-member-order").
    fn name(&self) -> &'static str;

    /// Returns the rule code (e.g., "SL001").
    fn code(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Returns the default severity for violations from this rule.
    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    /// Whether this rule requires a reason when using allow directives.
    ///
    /// By default, rules with `Severity::Error` require a reason.
    fn requires_allow_reason(&self) -> bool {
        self.default_severity() == Severity::Error
    }

    /// Checks a single file and returns any violations found.
    ///
    /// # Arguments
    ///
    /// * `ctx` - Context about the file being checked
    /// * `source` - The extracted class/member model of the file
    fn check(&self, ctx: &FileContext, source: &SourceModel) -> Vec<Violation>;
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;
