//! Line layout helpers for building text edits.

/// Whitespace between the start of the line and `offset`, if nothing else
/// precedes `offset` on that line.
#[must_use]
pub fn line_indent(source: &str, offset: usize) -> Option<&str> {
    let offset = offset.min(source.len());
    let line_start = source[..offset].rfind('\n').map_or(0, |i| i + 1);
    let indent = &source[line_start..offset];
    indent
        .chars()
        .all(|c| c == ' ' || c == '\t')
        .then_some(indent)
}

/// Line ending of the line before `offset`: `"\r\n"` or `"\n"`.
#[must_use]
pub fn line_ending(source: &str, offset: usize) -> &'static str {
    let offset = offset.min(source.len());
    if source[..offset].trim_end_matches([' ', '\t']).ends_with("\r\n") {
        "\r\n"
    } else {
        "\n"
    }
}
