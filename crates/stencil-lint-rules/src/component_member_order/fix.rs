//! Text edits that sort a category's members alphabetically.

use stencil_lint_core::utils::{line_ending, line_indent};
use stencil_lint_core::Replacement;

use super::classify::ClassifiedMember;
use super::validate::sort_key;

/// Member text including attached leading comments, trimmed.
fn member_text<'s>(source: &'s str, member: &ClassifiedMember<'_>) -> &'s str {
    let span = member.member.full_span();
    source.get(span.start..span.end).unwrap_or("").trim()
}

/// Returns true when every member starts its own line and only whitespace
/// separates consecutive members.
fn is_line_block(source: &str, members: &[&ClassifiedMember<'_>]) -> bool {
    let Some(first) = members.first() else {
        return false;
    };
    if line_indent(source, first.member.leading_start).is_none() {
        return false;
    }
    members.windows(2).all(|pair| {
        let gap = source
            .get(pair[0].member.span.end..pair[1].member.leading_start)
            .unwrap_or("x");
        gap.contains('\n') && gap.trim().is_empty()
    })
}

/// Builds the edits that sort `members`, one category in declaration order.
///
/// A block of members on consecutive lines is replaced as one range, with
/// every entry after the first re-indented to the first member's indentation.
/// Members separated by other code are swapped slot by slot, leaving
/// everything between them untouched.
#[must_use]
pub fn alphabetical_fix(source: &str, members: &[&ClassifiedMember<'_>]) -> Vec<Replacement> {
    let (Some(first), Some(last)) = (members.first(), members.last()) else {
        return Vec::new();
    };

    let mut sorted: Vec<&ClassifiedMember<'_>> = members.to_vec();
    sorted.sort_by_cached_key(|m| sort_key(m.name));

    if is_line_block(source, members) {
        let indent = line_indent(source, first.member.leading_start).unwrap_or("");
        let newline = line_ending(source, first.member.leading_start);
        let separator = format!("{newline}{indent}");
        let text = sorted
            .iter()
            .map(|m| member_text(source, m))
            .collect::<Vec<_>>()
            .join(&separator);
        return vec![Replacement::new(
            first.member.leading_start,
            last.member.span.end,
            text,
        )];
    }

    members
        .iter()
        .zip(&sorted)
        .filter(|(slot, entry)| !std::ptr::eq(slot.member, entry.member))
        .map(|(slot, entry)| {
            let span = slot.member.full_span();
            Replacement::new(span.start, span.end, member_text(source, entry))
        })
        .collect()
}
