//! Init command implementation.

use anyhow::{bail, Result};
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# stencil-lint configuration

# Rule preset: "recommended" (default), "strict" or "minimal"
preset = "recommended"

[analyzer]
# Root directory to analyze (default: current directory)
# root = "./src"

# Glob patterns to exclude from analysis
exclude = [
    "**/node_modules/**",
    "**/dist/**",
    "**/www/**",
]

# Respect .gitignore files
respect_gitignore = true

# Rule configurations
# Each rule can be enabled/disabled and have its severity overridden.
# A section with options replaces the preset's settings for that rule.

[rules.component-member-order]
# severity = "warning"
order = [
    "own-prop",
    "element",
    "state",
    "watched-state",
    "internal-prop",
    "prop",
    "watched-prop",
    "event",
    "lifecycle",
    "listen",
    "method",
    "own-method",
    "stencil-method",
]
watch-follows-prop = true
alphabetical = false

# [rules.lifecycle-order]
# mode = "call-order"

# [rules.stencil-method-order]
# order = ["hostData", "render"]

# [rules.components-per-file]
# max = 1

# Tag prefixes, off until configured.
# [rules.ban-prefix]
# prefixes = ["stencil"]

# [rules.require-prefix]
# prefixes = ["my"]

# Decorator layout: "singleline", "multiline" or "ignore".
# [rules.decorated-member-style]
# properties = "singleline"
# methods = "multiline"
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    write_config(Path::new("stencil-lint.toml"), force)?;

    println!("Created stencil-lint.toml");
    println!("\nNext steps:");
    println!("  1. Edit stencil-lint.toml to configure rules");
    println!("  2. Run: stencil-lint check");

    Ok(())
}

fn write_config(config_path: &Path, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(config_path, DEFAULT_CONFIG)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use stencil_lint_core::Config;
    use stencil_lint_rules::configured_rules;
    use tempfile::TempDir;

    #[test]
    fn template_is_a_valid_config() {
        let config = Config::parse(DEFAULT_CONFIG).unwrap();
        let rules = configured_rules(&config).unwrap();
        assert_eq!(rules.len(), 5);
    }

    #[test]
    fn refuses_to_overwrite_without_force() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("stencil-lint.toml");
        std::fs::write(&path, "preset = \"strict\"\n").unwrap();

        assert!(write_config(&path, false).is_err());
        write_config(&path, true).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), DEFAULT_CONFIG);
    }
}
