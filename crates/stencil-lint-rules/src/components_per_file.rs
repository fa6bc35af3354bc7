//! Rule to limit the number of components declared in one file.
//!
//! # Configuration
//!
//! ```toml
//! [rules.components-per-file]
//! max = 1
//! ```

use stencil_lint_core::{FileContext, Rule, RuleConfig, Severity, SourceModel, Suggestion, Violation};

use crate::OptionError;

/// Rule code for components-per-file.
pub const CODE: &str = "SL006";

/// Rule name for components-per-file.
pub const NAME: &str = "components-per-file";

/// Limits components per file.
#[derive(Debug, Clone)]
pub struct ComponentsPerFile {
    /// Maximum number of components allowed in a file.
    pub max: usize,
    /// Custom severity.
    pub severity: Severity,
}

impl Default for ComponentsPerFile {
    fn default() -> Self {
        Self::new()
    }
}

impl ComponentsPerFile {
    /// Creates a new rule allowing one component per file.
    #[must_use]
    pub fn new() -> Self {
        Self {
            max: 1,
            severity: Severity::Error,
        }
    }

    /// Creates the rule from its configuration section.
    ///
    /// # Errors
    ///
    /// Returns an error if `max` is not a non-negative integer.
    pub fn from_config(config: &RuleConfig) -> Result<Self, OptionError> {
        let max = config
            .parse_option::<usize>("max")
            .map_err(|source| OptionError::config(NAME, source))?;
        Ok(max.map_or_else(Self::new, |max| Self::new().max(max)))
    }

    /// Sets the maximum number of components.
    #[must_use]
    pub fn max(mut self, max: usize) -> Self {
        self.max = max;
        self
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    fn message(&self) -> String {
        let plural = if self.max > 1 { "s" } else { "" };
        format!("Files may only contain {} component{plural}", self.max)
    }
}

impl Rule for ComponentsPerFile {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Limits the number of components declared in a single file"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &FileContext, source: &SourceModel) -> Vec<Violation> {
        source
            .components()
            .skip(self.max)
            .map(|class| {
                Violation::new(CODE, NAME, self.severity, ctx.location(class.span), self.message())
                    .with_suggestion(Suggestion::new("Move this component into its own file"))
            })
            .collect()
    }
}
