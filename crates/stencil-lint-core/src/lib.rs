//! # stencil-lint-core
//!
//! Core framework for linting Stencil component classes.
//!
//! This crate provides the foundational traits and types for building
//! component linters. It includes:
//!
//! - [`SourceModel`] describing the classes, decorators, and members of a file
//! - [`LanguageExtractor`] for turning source text into that model
//! - [`Rule`] trait for per-file rules over the model
//! - [`Analyzer`] for orchestrating lint execution and applying fixes
//! - [`Violation`] for representing lint findings with optional edits
//!
//! ## Example
//!
//! ```ignore
//! use stencil_lint_core::Analyzer;
//! use stencil_lint_ts::TypeScriptExtractor;
//!
//! let analyzer = Analyzer::builder()
//!     .root("./src")
//!     .extractor(TypeScriptExtractor::new())
//!     .rule(MyRule::new())
//!     .build()?;
//!
//! let result = analyzer.analyze()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
mod config;
mod context;
mod extractor;
mod rule;
mod source;
mod types;

/// Utility modules for rule implementations.
pub mod utils;

pub use analyzer::{Analyzer, AnalyzerBuilder, AnalyzerError, FixReport};
pub use config::{AnalyzerConfig, Config, ConfigError, RuleConfig};
pub use context::FileContext;
pub use extractor::{ExtractError, ExtractorBox, LanguageExtractor};
pub use rule::{Rule, RuleBox};
pub use source::{
    ClassDeclaration, ClassMember, Decorator, DecoratorArgument, Literal, MemberKind,
    SourceModel, Span, COMPONENT_DECORATOR,
};
pub use types::{
    apply_replacements, LintResult, Location, Replacement, Severity, Suggestion,
    Violation, ViolationDiagnostic,
};
pub use utils::allowance::AllowCheck;
