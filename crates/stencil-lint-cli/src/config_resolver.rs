//! Locates the configuration file for a check run.
//!
//! Lookup order, first match wins:
//!
//! 1. `--config <path>`, used as given
//! 2. `stencil-lint.toml`, then `.stencil-lint.toml`, in the analyzed directory
//! 3. `config.toml` in the global directory (`$STENCIL_LINT_CONFIG_DIR`, else `~/.stencil-lint`)
//!
//! With none of them present the built-in defaults apply.

use std::path::{Path, PathBuf};

/// Project-level config file names, checked in order.
const PROJECT_CONFIG_NAMES: [&str; 2] = ["stencil-lint.toml", ".stencil-lint.toml"];

/// Environment variable overriding the global config directory.
const CONFIG_DIR_ENV: &str = "STENCIL_LINT_CONFIG_DIR";

/// Where the configuration was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Given with `--config`.
    Explicit(PathBuf),
    /// Found in the analyzed directory.
    Project(PathBuf),
    /// Found in the global config directory.
    Global(PathBuf),
    /// Nothing found.
    Default,
}

impl ConfigSource {
    /// Returns the resolved path, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) | Self::Global(p) => Some(p),
            Self::Default => None,
        }
    }

    /// Returns `true` for the global fallback.
    #[must_use]
    pub fn is_global(&self) -> bool {
        matches!(self, Self::Global(_))
    }
}

/// Resolves the configuration for `project_dir`.
#[must_use]
pub fn resolve(project_dir: &Path, explicit: Option<&Path>) -> ConfigSource {
    let source = resolve_in(project_dir, explicit, global_config_dir().as_deref());
    tracing::debug!(?source, "Resolved configuration");
    source
}

fn resolve_in(project_dir: &Path, explicit: Option<&Path>, global_dir: Option<&Path>) -> ConfigSource {
    if let Some(path) = explicit {
        return ConfigSource::Explicit(path.to_path_buf());
    }

    if let Some(path) = PROJECT_CONFIG_NAMES
        .iter()
        .map(|name| project_dir.join(name))
        .find(|candidate| candidate.is_file())
    {
        return ConfigSource::Project(path);
    }

    global_dir
        .map(|dir| dir.join("config.toml"))
        .filter(|candidate| candidate.is_file())
        .map_or(ConfigSource::Default, ConfigSource::Global)
}

/// Global config directory: `$STENCIL_LINT_CONFIG_DIR`, else `~/.stencil-lint`.
fn global_config_dir() -> Option<PathBuf> {
    std::env::var_os(CONFIG_DIR_ENV)
        .map(PathBuf::from)
        .or_else(|| home::home_dir().map(|home| home.join(".stencil-lint")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        fs::write(path, "").unwrap();
    }

    #[test]
    fn explicit_wins_without_existence_check() {
        let project = TempDir::new().unwrap();
        touch(&project.path().join("stencil-lint.toml"));

        let explicit = Path::new("/nonexistent/custom.toml");
        assert_eq!(
            resolve_in(project.path(), Some(explicit), None),
            ConfigSource::Explicit(explicit.to_path_buf())
        );
    }

    #[test]
    fn plain_name_preferred_over_dotfile() {
        let project = TempDir::new().unwrap();
        touch(&project.path().join(".stencil-lint.toml"));
        assert_eq!(
            resolve_in(project.path(), None, None),
            ConfigSource::Project(project.path().join(".stencil-lint.toml"))
        );

        touch(&project.path().join("stencil-lint.toml"));
        assert_eq!(
            resolve_in(project.path(), None, None),
            ConfigSource::Project(project.path().join("stencil-lint.toml"))
        );
    }

    #[test]
    fn global_is_a_fallback_only() {
        let project = TempDir::new().unwrap();
        let global = TempDir::new().unwrap();

        assert_eq!(
            resolve_in(project.path(), None, Some(global.path())),
            ConfigSource::Default
        );

        touch(&global.path().join("config.toml"));
        let source = resolve_in(project.path(), None, Some(global.path()));
        assert!(source.is_global());
        assert_eq!(source.path(), Some(global.path().join("config.toml").as_path()));

        touch(&project.path().join("stencil-lint.toml"));
        assert!(matches!(
            resolve_in(project.path(), None, Some(global.path())),
            ConfigSource::Project(_)
        ));
    }

    #[test]
    fn default_has_no_path() {
        let project = TempDir::new().unwrap();
        let source = resolve_in(project.path(), None, None);
        assert_eq!(source, ConfigSource::Default);
        assert!(source.path().is_none());
    }
}
