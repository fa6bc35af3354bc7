//! Access to the `tag` a component declares in `@Component({ tag })`.

use stencil_lint_core::{ClassDeclaration, RuleConfig, Span, COMPONENT_DECORATOR};

use crate::OptionError;

/// The literal `tag` of a component and where its value is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComponentTag<'a> {
    /// Tag name, e.g. `my-button`.
    pub name: &'a str,
    /// Span of the tag value, quotes included.
    pub span: Span,
}

impl ComponentTag<'_> {
    /// Text before the first `-`.
    #[must_use]
    pub fn prefix(&self) -> &str {
        self.name.split('-').next().unwrap_or(self.name)
    }

    /// Returns true if the tag starts with `prefix` followed by `-`.
    #[must_use]
    pub fn has_prefix(&self, prefix: &str) -> bool {
        self.name
            .strip_prefix(prefix)
            .is_some_and(|rest| rest.starts_with('-'))
    }
}

/// Reads the tag of a component class. `None` when the class has no
/// `@Component(...)` call or its tag is not a non-empty string literal.
#[must_use]
pub fn component_tag(class: &ClassDeclaration) -> Option<ComponentTag<'_>> {
    let decorator = class
        .decorators
        .iter()
        .find(|d| d.is_call && d.name == COMPONENT_DECORATOR)?;
    let options = decorator.arguments.first()?;
    let name = options.value.as_ref()?.get("tag")?.as_str()?;
    if name.is_empty() {
        return None;
    }
    let span = options.value_span("tag").unwrap_or(decorator.span);
    Some(ComponentTag { name, span })
}

/// Reads a `prefixes` list, trimming whitespace and a trailing `-` and
/// dropping empty entries.
pub(crate) fn prefixes_option(
    rule: &'static str,
    config: &RuleConfig,
) -> Result<Vec<String>, OptionError> {
    let prefixes = config
        .parse_option::<Vec<String>>("prefixes")
        .map_err(|source| OptionError::config(rule, source))?
        .unwrap_or_default();
    Ok(normalize_prefixes(prefixes))
}

pub(crate) fn normalize_prefixes<S: Into<String>>(
    prefixes: impl IntoIterator<Item = S>,
) -> Vec<String> {
    prefixes
        .into_iter()
        .map(|p| {
            let p: String = p.into();
            let p = p.trim();
            p.strip_suffix('-').unwrap_or(p).to_string()
        })
        .filter(|p| !p.is_empty())
        .collect()
}
