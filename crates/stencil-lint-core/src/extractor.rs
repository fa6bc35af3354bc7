//! Extension point for source languages.
//!
//! A `LanguageExtractor` turns raw source text into the language-agnostic
//! [`SourceModel`]. The analyzer picks the extractor by file extension.

use crate::source::SourceModel;

/// Errors raised while extracting a source model.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// The parser could not be configured for the grammar.
    #[error("language error: {0}")]
    Language(String),
    /// The parser produced no tree.
    #[error("parse failed")]
    ParseFailed,
}

/// Trait for language-specific extraction.
///
/// Implement this to add support for a new dialect. The extractor receives
/// raw source text and the file extension it was selected for.
pub trait LanguageExtractor: Send + Sync {
    /// Language identifier (e.g., `"typescript"`).
    fn language_id(&self) -> &'static str;

    /// File extensions this extractor handles (e.g., `&[".ts", ".tsx"]`).
    fn extensions(&self) -> &'static [&'static str];

    /// Extract the class/member model from source code.
    ///
    /// # Errors
    ///
    /// Returns an error only when no syntax tree can be produced at all.
    /// Recoverable syntax errors still yield a model.
    fn extract(&self, source: &str, extension: &str) -> Result<SourceModel, ExtractError>;

    /// Returns true if this extractor handles `extension` (with leading dot).
    fn handles(&self, extension: &str) -> bool {
        self.extensions().contains(&extension)
    }
}

/// Type alias for boxed extractor trait objects.
pub type ExtractorBox = Box<dyn LanguageExtractor>;
