//! # stencil-lint-ts
//!
//! Tree-sitter based TypeScript extraction for stencil-lint.
//!
//! This crate implements the core [`LanguageExtractor`] trait for `.ts` and
//! `.tsx` sources and adds:
//!
//! - [`TypeScriptExtractor`] for class, decorator and member extraction
//! - [`evaluate_literal`] for decorator arguments written as literals
//!
//! [`LanguageExtractor`]: stencil_lint_core::LanguageExtractor

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod literal;
pub mod typescript;

pub use literal::evaluate_literal;
pub use typescript::TypeScriptExtractor;
