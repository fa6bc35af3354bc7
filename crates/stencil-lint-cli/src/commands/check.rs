//! Check command implementation.

use anyhow::{Context, Result};
use stencil_lint_core::{Analyzer, Config, RuleBox};
use stencil_lint_rules::{all_rules, configured_rules, rule_from_config};
use stencil_lint_ts::TypeScriptExtractor;
use std::path::Path;

use crate::config_resolver::ConfigSource;
use crate::OutputFormat;

/// Flags accepted by `stencil-lint check`.
pub struct CheckOptions {
    /// Output format.
    pub format: OutputFormat,
    /// Comma-separated rule names or codes to run instead of the preset.
    pub rules: Option<String>,
    /// Extra exclude patterns.
    pub exclude: Vec<String>,
    /// Apply fixes before reporting.
    pub fix: bool,
}

/// Runs the check command.
pub fn run(path: &Path, options: &CheckOptions, source: &ConfigSource) -> Result<()> {
    let config = load_config(source)?;

    let rules = match &options.rules {
        Some(filter) => {
            let names: Vec<&str> = filter.split(',').map(str::trim).collect();
            filter_rules(&config, &names)?
        }
        None => configured_rules(&config).context("Invalid rule configuration")?,
    };

    let mut builder = Analyzer::builder()
        .root(path)
        .extractor(TypeScriptExtractor::new())
        .config(config)
        .excludes(options.exclude.iter().cloned());
    for rule in rules {
        builder = builder.rule_box(rule);
    }

    let analyzer = builder.build().context("Failed to build analyzer")?;

    tracing::info!("Analyzing {:?} with {} rules", path, analyzer.rule_count());

    if options.fix {
        let report = analyzer.fix().context("Applying fixes failed")?;
        tracing::info!(
            "Applied {} fix(es) in {} file(s), skipped {} overlapping edit(s)",
            report.edits_applied,
            report.files_fixed,
            report.edits_skipped
        );
    }

    let result = analyzer.analyze().context("Analysis failed")?;

    super::output::print(&result, options.format, analyzer.root())?;

    if result.has_errors() {
        std::process::exit(1);
    }

    Ok(())
}

fn load_config(source: &ConfigSource) -> Result<Config> {
    let Some(path) = source.path() else {
        return Ok(Config::default());
    };
    if source.is_global() {
        tracing::info!("Using global config: {}", path.display());
    }
    Config::from_file(path).with_context(|| format!("Failed to load config: {}", path.display()))
}

/// Selects rules by name or code, applying any options configured for them.
fn filter_rules(config: &Config, names: &[&str]) -> Result<Vec<RuleBox>> {
    let mut rules = Vec::new();

    for name in names {
        let Some(rule) = all_rules()
            .into_iter()
            .find(|r| r.name() == *name || r.code() == *name)
        else {
            tracing::warn!("Unknown rule: {}", name);
            continue;
        };

        match config.rule(rule.name()) {
            Some(section) if !section.options.is_empty() => {
                rules.push(rule_from_config(rule.name(), section).context("Invalid rule configuration")?);
            }
            _ => rules.push(rule),
        }
    }

    Ok(rules)
}
