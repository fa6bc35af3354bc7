//! Rule presets and configuration wiring.

use std::str::FromStr;

use stencil_lint_core::{Config, RuleBox, RuleConfig};
use tracing::debug;

use crate::component_member_order::{self, ComponentMemberOrder, RECOMMENDED_ORDER};
use crate::{
    ban_prefix, components_per_file, decorated_member_style, lifecycle_order,
    render_as_final_method, require_prefix, stencil_method_order, watch_follows_prop, BanPrefix,
    ComponentsPerFile, DecoratedMemberStyle, LifecycleOrder, OptionError, RenderAsFinalMethod,
    RequirePrefix, StencilMethodOrder, WatchFollowsProp,
};

/// Preset configurations for stencil-lint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Preset {
    /// Recommended rules with sensible defaults.
    #[default]
    Recommended,
    /// Recommended rules plus alphabetical member sorting.
    Strict,
    /// Member grouping and order only, for gradual adoption.
    Minimal,
}

impl Preset {
    /// Returns the rules for this preset.
    #[must_use]
    pub fn rules(self) -> Vec<RuleBox> {
        match self {
            Self::Recommended => recommended_rules(),
            Self::Strict => strict_rules(),
            Self::Minimal => minimal_rules(),
        }
    }
}

impl FromStr for Preset {
    type Err = OptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "recommended" => Ok(Self::Recommended),
            "strict" => Ok(Self::Strict),
            "minimal" => Ok(Self::Minimal),
            other => Err(OptionError::UnknownPreset(other.to_string())),
        }
    }
}

/// Returns the recommended set of rules.
///
/// Includes:
/// - `component-member-order` (SL001) with the recommended order and watch adjacency
/// - `lifecycle-order` (SL003) in call order
/// - `stencil-method-order` (SL004) with `hostData` before `render`
/// - `render-as-final-method` (SL005)
/// - `components-per-file` (SL006) allowing one component
#[must_use]
pub fn recommended_rules() -> Vec<RuleBox> {
    vec![
        Box::new(ComponentMemberOrder::recommended()),
        Box::new(LifecycleOrder::new()),
        Box::new(StencilMethodOrder::new().order(["hostData", "render"])),
        Box::new(RenderAsFinalMethod::new()),
        Box::new(ComponentsPerFile::new()),
    ]
}

/// Returns the strict set of rules: the recommended rules with members
/// also sorted alphabetically within each category.
#[must_use]
pub fn strict_rules() -> Vec<RuleBox> {
    vec![
        Box::new(ComponentMemberOrder::recommended().alphabetical(true)),
        Box::new(LifecycleOrder::new()),
        Box::new(StencilMethodOrder::new().order(["hostData", "render"])),
        Box::new(RenderAsFinalMethod::new()),
        Box::new(ComponentsPerFile::new()),
    ]
}

/// Returns the minimal set of rules.
#[must_use]
pub fn minimal_rules() -> Vec<RuleBox> {
    vec![Box::new(
        ComponentMemberOrder::new().order(RECOMMENDED_ORDER.to_vec()),
    )]
}

/// Returns every built-in rule, each in its recommended form.
///
/// The prefix and decorator-style rules have no recommended settings and
/// stay inactive until configured.
#[must_use]
pub fn all_rules() -> Vec<RuleBox> {
    vec![
        Box::new(ComponentMemberOrder::recommended()),
        Box::new(WatchFollowsProp::new()),
        Box::new(LifecycleOrder::new()),
        Box::new(StencilMethodOrder::new().order(["hostData", "render"])),
        Box::new(RenderAsFinalMethod::new()),
        Box::new(ComponentsPerFile::new()),
        Box::new(BanPrefix::new()),
        Box::new(RequirePrefix::new()),
        Box::new(DecoratedMemberStyle::new()),
    ]
}

/// Builds a rule from its `[rules.<name>]` section.
///
/// # Errors
///
/// Returns an error for unknown rule names or malformed options.
pub fn rule_from_config(name: &str, config: &RuleConfig) -> Result<RuleBox, OptionError> {
    let rule: RuleBox = match name {
        component_member_order::NAME => Box::new(ComponentMemberOrder::from_config(config)?),
        watch_follows_prop::NAME => Box::new(WatchFollowsProp::new()),
        lifecycle_order::NAME => Box::new(LifecycleOrder::from_config(config)?),
        stencil_method_order::NAME => Box::new(StencilMethodOrder::from_config(config)?),
        render_as_final_method::NAME => Box::new(RenderAsFinalMethod::new()),
        components_per_file::NAME => Box::new(ComponentsPerFile::from_config(config)?),
        ban_prefix::NAME => Box::new(BanPrefix::from_config(config)?),
        require_prefix::NAME => Box::new(RequirePrefix::from_config(config)?),
        decorated_member_style::NAME => Box::new(DecoratedMemberStyle::from_config(config)?),
        other => return Err(OptionError::UnknownRule(other.to_string())),
    };
    Ok(rule)
}

/// Resolves the rule set for a configuration.
///
/// Starts from the configured preset (recommended when unset). A
/// `[rules.<name>]` section carrying options rebuilds that rule from them,
/// and a section for a rule outside the preset adds it unless it sets
/// `enabled = false`. Enablement and severity overrides are applied later
/// by the analyzer.
///
/// # Errors
///
/// Returns an error for an unknown preset, an unknown rule section, or
/// malformed rule options.
pub fn configured_rules(config: &Config) -> Result<Vec<RuleBox>, OptionError> {
    let preset = config
        .preset
        .as_deref()
        .map(Preset::from_str)
        .transpose()?
        .unwrap_or_default();
    let mut rules = preset.rules();

    let mut sections: Vec<(&String, &RuleConfig)> = config.rules.iter().collect();
    sections.sort_by_key(|(name, _)| name.as_str());

    for (name, section) in sections {
        let position = rules.iter().position(|r| r.name() == name.as_str());
        match position {
            Some(i) if !section.options.is_empty() => {
                debug!(rule = %name, "Rebuilding preset rule from configuration");
                rules[i] = rule_from_config(name, section)?;
            }
            Some(_) => {}
            None if section.enabled == Some(false) => {
                // Still reject misspelled names.
                rule_from_config(name, section)?;
            }
            None => {
                debug!(rule = %name, "Adding rule from configuration");
                rules.push(rule_from_config(name, section)?);
            }
        }
    }

    Ok(rules)
}
