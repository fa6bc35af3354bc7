//! Context types for rule execution.

use std::path::{Path, PathBuf};

use crate::source::Span;
use crate::types::Location;

/// Context provided to per-file rules.
///
/// Carries the file text and maps byte offsets from the source model to
/// line/column locations for reporting.
#[derive(Debug, Clone)]
pub struct FileContext<'a> {
    /// Path to the file as discovered.
    pub path: &'a Path,
    /// File contents as a string.
    pub content: &'a str,
    /// Path relative to the project root.
    pub relative_path: PathBuf,
    /// Byte offset of the start of every line.
    line_starts: Vec<usize>,
}

impl<'a> FileContext<'a> {
    /// Creates a new file context.
    #[must_use]
    pub fn new(path: &'a Path, content: &'a str, root: &Path) -> Self {
        let relative_path = path
            .strip_prefix(root)
            .map_or_else(|_| path.to_path_buf(), Path::to_path_buf);
        let line_starts = std::iter::once(0)
            .chain(content.match_indices('\n').map(|(i, _)| i + 1))
            .collect();

        Self {
            path,
            content,
            relative_path,
            line_starts,
        }
    }

    /// Converts a byte offset into a 1-indexed `(line, column)` pair.
    ///
    /// Offsets past the end clamp to the last position.
    #[must_use]
    pub fn position(&self, offset: usize) -> (usize, usize) {
        let offset = offset.min(self.content.len());
        let line_idx = match self.line_starts.binary_search(&offset) {
            Ok(i) => i,
            Err(i) => i.saturating_sub(1),
        };
        let line_start = self.line_starts.get(line_idx).copied().unwrap_or(0);
        (line_idx + 1, offset - line_start + 1)
    }

    /// Builds a [`Location`] for a span in this file.
    #[must_use]
    pub fn location(&self, span: Span) -> Location {
        let (line, column) = self.position(span.start);
        Location::new(self.relative_path.clone(), line, column).with_span(span.start, span.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(content: &str) -> FileContext<'_> {
        FileContext::new(Path::new("src/cmp.tsx"), content, Path::new("src"))
    }

    #[test]
    fn test_relative_path() {
        assert_eq!(ctx("").relative_path, PathBuf::from("cmp.tsx"));
    }

    #[test]
    fn test_position() {
        let c = ctx("line1\nline2\nline3");
        assert_eq!(c.position(0), (1, 1));
        assert_eq!(c.position(6), (2, 1));
        assert_eq!(c.position(8), (2, 3));
        assert_eq!(c.position(100), (3, 6));
    }

    #[test]
    fn test_location_carries_span() {
        let c = ctx("ab\ncdef");
        let loc = c.location(Span::new(4, 6));
        assert_eq!((loc.line, loc.column), (2, 2));
        assert_eq!((loc.offset, loc.length), (4, 2));
    }
}
