//! End-to-end runs of the built-in rules through the analyzer.

use std::fs;
use std::path::Path;

use stencil_lint_core::{Analyzer, Config, Severity};
use stencil_lint_rules::{configured_rules, ComponentMemberOrder, RenderAsFinalMethod};
use stencil_lint_ts::TypeScriptExtractor;
use tempfile::TempDir;

const UNSORTED: &str = r"import { Component, Prop, State, h } from '@stencil/core';

@Component({ tag: 'my-toggle' })
export class MyToggle {
  @State() open = false;

  // Visible label.
  @Prop() label: string;
  @Prop() disabled = false;

  render() {
    return <button disabled={this.disabled}>{this.label}</button>;
  }
}
";

const SORTED: &str = r"import { Component, Prop, State, h } from '@stencil/core';

@Component({ tag: 'my-toggle' })
export class MyToggle {
  @State() open = false;

  @Prop() disabled = false;
  // Visible label.
  @Prop() label: string;

  render() {
    return <button disabled={this.disabled}>{this.label}</button>;
  }
}
";

fn project(files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().unwrap();
    for (name, content) in files {
        let path = dir.path().join(name);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }
    dir
}

fn analyzer(root: &Path) -> Analyzer {
    Analyzer::builder()
        .root(root)
        .extractor(TypeScriptExtractor::new())
        .rule(ComponentMemberOrder::recommended().alphabetical(true))
        .rule(RenderAsFinalMethod::new())
        .build()
        .unwrap()
}

#[test]
fn reports_unsorted_members() {
    let dir = project(&[("src/components/my-toggle.tsx", UNSORTED)]);
    let result = analyzer(dir.path()).analyze().unwrap();

    assert_eq!(result.files_checked, 1);
    assert_eq!(result.violations.len(), 1);
    let violation = &result.violations[0];
    assert_eq!(violation.rule, "component-member-order");
    assert_eq!(violation.severity, Severity::Error);
    assert_eq!(violation.location.line, 8);
    assert!(violation.suggestion.as_ref().is_some_and(|s| s.is_fixable()));
}

#[test]
fn fix_sorts_members_and_is_idempotent() {
    let dir = project(&[("src/my-toggle.tsx", UNSORTED)]);
    let analyzer = analyzer(dir.path());

    let report = analyzer.fix().unwrap();
    assert_eq!(report.files_fixed, 1);
    let fixed = fs::read_to_string(dir.path().join("src/my-toggle.tsx")).unwrap();
    assert_eq!(fixed, SORTED);

    assert!(analyzer.analyze().unwrap().violations.is_empty());
    let again = analyzer.fix().unwrap();
    assert_eq!(again.files_fixed, 0);
    assert_eq!(
        fs::read_to_string(dir.path().join("src/my-toggle.tsx")).unwrap(),
        SORTED
    );
}

#[test]
fn declaration_files_and_node_modules_are_skipped() {
    let dir = project(&[
        ("src/components.d.ts", UNSORTED),
        ("node_modules/pkg/index.tsx", UNSORTED),
        ("src/ok.tsx", SORTED),
    ]);
    let result = analyzer(dir.path()).analyze().unwrap();
    assert_eq!(result.files_checked, 1);
    assert!(result.violations.is_empty());
}

#[test]
fn allow_directive_with_reason_suppresses() {
    let source = UNSORTED.replace(
        "  // Visible label.\n",
        "  // stencil-lint: allow(component-member-order) reason=\"generated\"\n",
    );
    let dir = project(&[("src/my-toggle.tsx", &source)]);
    let result = analyzer(dir.path()).analyze().unwrap();
    assert!(result.violations.is_empty());
}

#[test]
fn configuration_selects_and_overrides_rules() {
    let config = Config::parse(
        r#"
preset = "strict"

[rules.render-as-final-method]
severity = "warning"

[rules.component-member-order]
enabled = false
"#,
    )
    .unwrap();
    let source = UNSORTED.replace("  }\n}\n", "  }\n\n  count = 0;\n}\n");
    let dir = project(&[("src/my-toggle.tsx", &source)]);

    let mut builder = Analyzer::builder()
        .root(dir.path())
        .extractor(TypeScriptExtractor::new())
        .config(config.clone());
    for rule in configured_rules(&config).unwrap() {
        builder = builder.rule_box(rule);
    }
    let result = builder.build().unwrap().analyze().unwrap();

    let rules: Vec<_> = result.violations.iter().map(|v| v.rule.as_str()).collect();
    assert_eq!(rules, vec!["render-as-final-method"]);
    assert_eq!(result.violations[0].severity, Severity::Warning);
}
