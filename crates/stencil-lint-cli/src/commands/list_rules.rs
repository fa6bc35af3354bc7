//! List rules command implementation.

use stencil_lint_rules::all_rules;

/// Runs the list-rules command.
pub fn run() {
    println!("Available rules:\n");
    println!("{:<8} {:<25} Description", "Code", "Name");
    println!("{}", "-".repeat(80));

    for rule in all_rules() {
        println!(
            "{:<8} {:<25} {}",
            rule.code(),
            rule.name(),
            rule.description()
        );
    }

    println!("\nPresets:");
    println!("  recommended  - SL001 (order + watch adjacency), SL003, SL004, SL005, SL006 (default)");
    println!("  strict       - recommended, with alphabetical member sorting");
    println!("  minimal      - SL001 grouping and order only");
    println!("\nSL007-SL009 stay inactive until configured in stencil-lint.toml.");

    println!("\nUse --rules to run specific rules, e.g.:");
    println!("  stencil-lint check --rules component-member-order,render-as-final-method");
    println!("  stencil-lint check --rules SL001,SL005");
}
