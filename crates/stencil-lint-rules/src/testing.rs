//! Helpers shared by the rule tests.

use std::path::Path;

use stencil_lint_core::{FileContext, LanguageExtractor, Rule, Violation};
use stencil_lint_ts::TypeScriptExtractor;

/// Runs `rule` over a `.tsx` snippet.
pub fn run(rule: &dyn Rule, src: &str) -> Vec<Violation> {
    let model = TypeScriptExtractor::new()
        .extract(src, ".tsx")
        .expect("snippet extracts");
    let ctx = FileContext::new(Path::new("cmp.tsx"), src, Path::new("."));
    rule.check(&ctx, &model)
}

/// Text under the primary location of `violation`.
pub fn reported<'s>(src: &'s str, violation: &Violation) -> &'s str {
    let start = violation.location.offset;
    &src[start..start + violation.location.length]
}
