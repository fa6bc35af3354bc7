//! Core analyzer for orchestrating lint execution.

use crate::config::{Config, RuleConfig};
use crate::context::FileContext;
use crate::extractor::{ExtractError, ExtractorBox, LanguageExtractor};
use crate::rule::{Rule, RuleBox};
use crate::types::{apply_replacements, LintResult, Replacement, Severity, Suggestion, Violation};
use crate::utils::allowance::check_allow_with_reason;

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Declaration files never contain component implementations.
const DECLARATION_SUFFIX: &str = ".d.ts";

/// Errors that can occur during analysis.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// IO error reading or writing files.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing a source file.
    #[error("Parse error in {path}: {message}")]
    Parse {
        /// Path to the file that failed to parse.
        path: PathBuf,
        /// Parse error message.
        message: String,
    },

    /// Error walking the directory tree.
    #[error("Walk error: {0}")]
    Walk(#[from] ignore::Error),

    /// Glob pattern error.
    #[error("Invalid glob pattern: {0}")]
    Glob(#[from] glob::PatternError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

impl AnalyzerError {
    fn parse(path: &Path, err: &ExtractError) -> Self {
        Self::Parse {
            path: path.to_path_buf(),
            message: err.to_string(),
        }
    }
}

/// Outcome of applying automatic fixes.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FixReport {
    /// Files rewritten on disk.
    pub files_fixed: usize,
    /// Edits applied across all files.
    pub edits_applied: usize,
    /// Edits skipped because they overlapped an earlier edit.
    pub edits_skipped: usize,
}

/// Builder for configuring an [`Analyzer`].
#[derive(Default)]
pub struct AnalyzerBuilder {
    root: Option<PathBuf>,
    rules: Vec<RuleBox>,
    extractors: Vec<ExtractorBox>,
    exclude_patterns: Vec<String>,
    include_patterns: Vec<String>,
    config: Option<Config>,
    fail_on_parse_error: bool,
}

impl AnalyzerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the root directory to analyze.
    #[must_use]
    pub fn root(mut self, path: impl Into<PathBuf>) -> Self {
        self.root = Some(path.into());
        self
    }

    /// Adds a rule to the analyzer.
    #[must_use]
    pub fn rule<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Adds a boxed rule to the analyzer.
    #[must_use]
    pub fn rule_box(mut self, rule: RuleBox) -> Self {
        self.rules.push(rule);
        self
    }

    /// Registers a language extractor.
    #[must_use]
    pub fn extractor<E: LanguageExtractor + 'static>(mut self, extractor: E) -> Self {
        self.extractors.push(Box::new(extractor));
        self
    }

    /// Adds an exclude glob pattern.
    #[must_use]
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_patterns.push(pattern.into());
        self
    }

    /// Adds multiple exclude glob patterns.
    #[must_use]
    pub fn excludes<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_patterns
            .extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Adds an include glob pattern.
    #[must_use]
    pub fn include(mut self, pattern: impl Into<String>) -> Self {
        self.include_patterns.push(pattern.into());
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets whether to fail on parse errors (default: false).
    #[must_use]
    pub fn fail_on_parse_error(mut self, fail: bool) -> Self {
        self.fail_on_parse_error = fail;
        self
    }

    /// Builds the analyzer.
    ///
    /// # Errors
    ///
    /// Returns an error if the current directory cannot be resolved or an
    /// include/exclude pattern is not a valid glob.
    pub fn build(self) -> Result<Analyzer, AnalyzerError> {
        let root = self
            .root
            .or_else(|| self.config.as_ref().map(|c| c.analyzer.root.clone()))
            .unwrap_or_else(|| PathBuf::from("."));

        let root = if root.is_absolute() {
            root
        } else {
            std::env::current_dir()?.join(&root)
        };

        let config = self.config.unwrap_or_default();

        let mut exclude_patterns = self.exclude_patterns;
        exclude_patterns.extend(config.analyzer.exclude.iter().cloned());
        let mut include_patterns = self.include_patterns;
        include_patterns.extend(config.analyzer.include.iter().cloned());

        let exclude = compile_patterns(&exclude_patterns)?;
        let include = compile_patterns(&include_patterns)?;

        Ok(Analyzer {
            root,
            rules: self.rules,
            extractors: self.extractors,
            exclude_patterns,
            exclude,
            include,
            config,
            fail_on_parse_error: self.fail_on_parse_error,
        })
    }
}

fn compile_patterns(patterns: &[String]) -> Result<Vec<glob::Pattern>, AnalyzerError> {
    patterns
        .iter()
        .map(|p| glob::Pattern::new(p).map_err(AnalyzerError::from))
        .collect()
}

/// The main analyzer that orchestrates lint execution.
///
/// Use [`Analyzer::builder()`] to construct an instance.
pub struct Analyzer {
    root: PathBuf,
    rules: Vec<RuleBox>,
    extractors: Vec<ExtractorBox>,
    exclude_patterns: Vec<String>,
    exclude: Vec<glob::Pattern>,
    include: Vec<glob::Pattern>,
    config: Config,
    fail_on_parse_error: bool,
}

impl Analyzer {
    /// Creates a new builder for configuring an analyzer.
    #[must_use]
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Returns the root directory being analyzed.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the number of registered rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Analyzes all files and returns the results.
    ///
    /// # Errors
    ///
    /// Returns an error if file discovery or reading fails, or if a file
    /// cannot be parsed and `fail_on_parse_error` is set.
    pub fn analyze(&self) -> Result<LintResult, AnalyzerError> {
        info!("Starting analysis at {:?}", self.root);

        let mut result = LintResult::new();
        let files = self.discover_files()?;

        info!("Found {} files to analyze", files.len());

        for file_path in &files {
            let content = std::fs::read_to_string(file_path)?;
            match self.analyze_source(file_path, &content) {
                Ok(violations) => {
                    result.violations.extend(violations);
                    result.files_checked += 1;
                }
                Err(AnalyzerError::Parse { path, message }) => {
                    warn!("Failed to parse {}: {}", path.display(), message);
                    if self.fail_on_parse_error {
                        return Err(AnalyzerError::Parse { path, message });
                    }
                }
                Err(e) => return Err(e),
            }
        }

        result.sort();

        info!(
            "Analysis complete: {} violations in {} files",
            result.violations.len(),
            result.files_checked
        );

        Ok(result)
    }

    /// Analyzes in-memory source text as if it were the file at `path`.
    ///
    /// Files with no matching extractor yield no violations.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyzerError::Parse`] if the extractor cannot produce a model.
    pub fn analyze_source(&self, path: &Path, content: &str) -> Result<Vec<Violation>, AnalyzerError> {
        debug!("Analyzing: {}", path.display());

        let Some((extractor, extension)) = self.extractor_for(path) else {
            debug!("No extractor for {}", path.display());
            return Ok(Vec::new());
        };

        let model = extractor
            .extract(content, &extension)
            .map_err(|e| AnalyzerError::parse(path, &e))?;

        let ctx = FileContext::new(path, content, &self.root);
        let mut violations = Vec::new();

        for rule in &self.rules {
            if !self.config.is_rule_enabled(rule.name()) {
                debug!("Skipping disabled rule: {}", rule.name());
                continue;
            }

            let rule_violations = rule.check(&ctx, &model);
            let rule_violations = self.apply_allow_directives(rule.as_ref(), &ctx, rule_violations);
            let rule_violations = self.apply_severity_override(rule.name(), rule_violations);
            violations.extend(rule_violations);
        }

        Ok(violations)
    }

    /// Applies every automatic fix to the files on disk.
    ///
    /// Fixes are collected per file from a fresh analysis and applied in one
    /// left-to-right pass; an edit overlapping an earlier one is skipped and
    /// left for the next run.
    ///
    /// # Errors
    ///
    /// Returns an error if analysis fails or a file cannot be rewritten.
    pub fn fix(&self) -> Result<FixReport, AnalyzerError> {
        let mut report = FixReport::default();

        for file_path in &self.discover_files()? {
            let content = std::fs::read_to_string(file_path)?;
            let violations = match self.analyze_source(file_path, &content) {
                Ok(v) => v,
                Err(AnalyzerError::Parse { path, message }) => {
                    warn!("Skipping fixes for {}: {}", path.display(), message);
                    continue;
                }
                Err(e) => return Err(e),
            };

            let (edits, skipped) = collect_edits(&violations);
            report.edits_skipped += skipped;
            if edits.is_empty() {
                continue;
            }

            let fixed = apply_replacements(&content, &edits);
            if fixed != content {
                std::fs::write(file_path, fixed)?;
                info!("Applied {} fix(es) to {}", edits.len(), file_path.display());
                report.files_fixed += 1;
                report.edits_applied += edits.len();
            }
        }

        Ok(report)
    }

    fn extractor_for(&self, path: &Path) -> Option<(&dyn LanguageExtractor, String)> {
        let file_name = path.file_name()?.to_str()?;
        if file_name.ends_with(DECLARATION_SUFFIX) {
            return None;
        }
        let extension = format!(".{}", path.extension()?.to_str()?);
        self.extractors
            .iter()
            .find(|e| e.handles(&extension))
            .map(|e| (e.as_ref(), extension))
    }

    /// Drops findings suppressed by an allow directive.
    ///
    /// A directive without a reason on a rule that requires one is replaced
    /// by a warning about the missing reason.
    fn apply_allow_directives(
        &self,
        rule: &dyn Rule,
        ctx: &FileContext,
        violations: Vec<Violation>,
    ) -> Vec<Violation> {
        violations
            .into_iter()
            .filter_map(|v| {
                let allow = check_allow_with_reason(ctx.content, v.location.line, rule.name());
                if !allow.is_allowed() {
                    return Some(v);
                }
                if rule.requires_allow_reason() && allow.reason().is_none() {
                    let name = rule.name();
                    return Some(
                        Violation::new(
                            rule.code(),
                            name,
                            Severity::Warning,
                            v.location,
                            format!("Allow directive for '{name}' is missing required reason"),
                        )
                        .with_suggestion(Suggestion::new(
                            "Add reason=\"...\" to explain why this exception is necessary",
                        )),
                    );
                }
                debug!("Suppressed {} at line {}", rule.name(), v.location.line);
                None
            })
            .collect()
    }

    /// Applies severity overrides from configuration.
    fn apply_severity_override(
        &self,
        rule_name: &str,
        mut violations: Vec<Violation>,
    ) -> Vec<Violation> {
        if let Some(severity) = self.config.rule_severity(rule_name) {
            for v in &mut violations {
                if v.rule == rule_name && !v.message.starts_with("Allow directive") {
                    v.severity = severity;
                }
            }
        }
        violations
    }

    /// Discovers all source files handled by a registered extractor.
    fn discover_files(&self) -> Result<Vec<PathBuf>, AnalyzerError> {
        let mut builder = ignore::WalkBuilder::new(&self.root);
        builder
            .hidden(false)
            .git_ignore(self.config.analyzer.respect_gitignore)
            .git_exclude(self.config.analyzer.respect_gitignore)
            .require_git(false);

        let mut files = Vec::new();
        for entry in builder.build() {
            let entry = entry?;
            let path = entry.path();

            if !path.is_file() || self.extractor_for(path).is_none() {
                continue;
            }

            if self.should_exclude(path) {
                debug!("Excluding: {}", path.display());
                continue;
            }

            if !self.include.is_empty() && !self.is_included(path) {
                continue;
            }

            files.push(path.to_path_buf());
        }

        files.sort();
        Ok(files)
    }

    fn is_included(&self, path: &Path) -> bool {
        let rel = path.strip_prefix(&self.root).unwrap_or(path);
        self.include
            .iter()
            .any(|p| p.matches_path(rel) || p.matches_path(path))
    }

    /// Checks if a path should be excluded.
    fn should_exclude(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();

        if self.exclude.iter().any(|p| p.matches(&path_str)) {
            return true;
        }

        // Also check as substring for patterns like "**/node_modules/**"
        self.exclude_patterns.iter().any(|pattern| {
            let normalized_pattern = pattern.replace("**", "");
            normalized_pattern.len() > 1 && path_str.contains(&normalized_pattern)
        })
    }

    /// Gets the rule configuration for a specific rule.
    #[must_use]
    pub fn rule_config(&self, rule_name: &str) -> Option<&RuleConfig> {
        self.config.rules.get(rule_name)
    }
}

/// Gathers non-overlapping edits from violations in source order.
///
/// Returns the accepted edits and the number skipped for overlap.
fn collect_edits(violations: &[Violation]) -> (Vec<Replacement>, usize) {
    let mut candidates: Vec<&Replacement> =
        violations.iter().flat_map(Violation::replacements).collect();
    candidates.sort_by_key(|r| (r.start, r.end));

    let mut accepted: Vec<Replacement> = Vec::new();
    let mut skipped = 0;
    for r in candidates {
        if accepted.last().is_some_and(|last| last.overlaps(r) || r.start < last.end) {
            skipped += 1;
            continue;
        }
        accepted.push(r.clone());
    }
    (accepted, skipped)
}
