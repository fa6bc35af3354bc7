//! Evaluation of literal expressions in decorator arguments.
//!
//! Only syntax whose value is fixed at parse time is evaluated. Identifiers,
//! calls, template substitutions and the like yield `None`.

use stencil_lint_core::Literal;
use tree_sitter::Node;

/// Evaluates a tree-sitter expression node to a [`Literal`].
///
/// Returns `None` when the expression is not a literal.
#[must_use]
pub fn evaluate_literal(node: Node<'_>, src: &[u8]) -> Option<Literal> {
    match node.kind() {
        "string" => unescape(strip_quotes(text(node, src)?)?).map(Literal::String),
        "template_string" => template(node, src),
        "number" => parse_number(text(node, src)?).map(Literal::Number),
        "true" => Some(Literal::Bool(true)),
        "false" => Some(Literal::Bool(false)),
        "null" => Some(Literal::Null),
        "undefined" => Some(Literal::Undefined),
        "identifier" if text(node, src)? == "undefined" => Some(Literal::Undefined),
        "parenthesized_expression" => evaluate_literal(first_named(node)?, src),
        "unary_expression" => unary(node, src),
        "array" => array(node, src),
        "object" => object(node, src),
        _ => None,
    }
}

fn text<'a>(node: Node<'_>, src: &'a [u8]) -> Option<&'a str> {
    node.utf8_text(src).ok()
}

fn named_children(node: Node<'_>) -> Vec<Node<'_>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|c| c.kind() != "comment")
        .collect()
}

fn first_named(node: Node<'_>) -> Option<Node<'_>> {
    named_children(node).into_iter().next()
}

fn strip_quotes(raw: &str) -> Option<&str> {
    let quote = raw.chars().next()?;
    if !matches!(quote, '"' | '\'' | '`') || raw.len() < 2 || !raw.ends_with(quote) {
        return None;
    }
    Some(&raw[1..raw.len() - 1])
}

fn template(node: Node<'_>, src: &[u8]) -> Option<Literal> {
    if named_children(node)
        .iter()
        .any(|c| c.kind() == "template_substitution")
    {
        return None;
    }
    unescape(strip_quotes(text(node, src)?)?).map(Literal::String)
}

/// Decodes JavaScript string escapes.
fn unescape(body: &str) -> Option<String> {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next()? {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'b' => out.push('\u{8}'),
            'f' => out.push('\u{c}'),
            'v' => out.push('\u{b}'),
            '0' if !chars.peek().is_some_and(char::is_ascii_digit) => out.push('\0'),
            'x' => {
                let hex: String = chars.by_ref().take(2).collect();
                out.push(char::from_u32(u32::from_str_radix(&hex, 16).ok()?)?);
            }
            'u' => {
                let code = if chars.peek() == Some(&'{') {
                    chars.next();
                    let hex: String = chars.by_ref().take_while(|c| *c != '}').collect();
                    u32::from_str_radix(&hex, 16).ok()?
                } else {
                    let hex: String = chars.by_ref().take(4).collect();
                    u32::from_str_radix(&hex, 16).ok()?
                };
                // Lone surrogates have no `char` representation.
                out.push(char::from_u32(code).unwrap_or('\u{fffd}'));
            }
            // Line continuation.
            '\n' => {}
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
            }
            other => out.push(other),
        }
    }

    Some(out)
}

fn parse_number(raw: &str) -> Option<f64> {
    let cleaned: String = raw.chars().filter(|c| *c != '_').collect();
    let cleaned = cleaned.strip_suffix('n').unwrap_or(&cleaned);

    let radix = |digits: &str, base: u32| -> Option<f64> {
        digits.chars().try_fold(0.0_f64, |acc, c| {
            c.to_digit(base).map(|d| acc * f64::from(base) + f64::from(d))
        })
    };

    let lower = cleaned.to_ascii_lowercase();
    if let Some(hex) = lower.strip_prefix("0x") {
        radix(hex, 16)
    } else if let Some(bin) = lower.strip_prefix("0b") {
        radix(bin, 2)
    } else if let Some(oct) = lower.strip_prefix("0o") {
        radix(oct, 8)
    } else {
        lower.parse::<f64>().ok()
    }
}

fn unary(node: Node<'_>, src: &[u8]) -> Option<Literal> {
    let operator = node.child_by_field_name("operator")?;
    let value = evaluate_literal(node.child_by_field_name("argument")?, src)?;
    match (text(operator, src)?, value) {
        ("-", Literal::Number(n)) => Some(Literal::Number(-n)),
        ("+", Literal::Number(n)) => Some(Literal::Number(n)),
        ("!", v) => Some(Literal::Bool(!v.is_truthy())),
        _ => None,
    }
}

fn array(node: Node<'_>, src: &[u8]) -> Option<Literal> {
    named_children(node)
        .into_iter()
        .map(|element| evaluate_literal(element, src))
        .collect::<Option<Vec<_>>>()
        .map(Literal::Array)
}

fn object(node: Node<'_>, src: &[u8]) -> Option<Literal> {
    let mut entries = Vec::new();
    for entry in named_children(node) {
        match entry.kind() {
            "pair" => {
                let key = property_key(entry.child_by_field_name("key")?, src)?;
                let value = evaluate_literal(entry.child_by_field_name("value")?, src)?;
                entries.push((key, value));
            }
            "shorthand_property_identifier" => {
                entries.push((text(entry, src)?.to_string(), Literal::Undefined));
            }
            _ => return None,
        }
    }
    Some(Literal::Object(entries))
}

pub(crate) fn property_key(node: Node<'_>, src: &[u8]) -> Option<String> {
    match node.kind() {
        "property_identifier" => text(node, src).map(String::from),
        "string" => unescape(strip_quotes(text(node, src)?)?),
        "number" => parse_number(text(node, src)?).map(number_key),
        _ => None,
    }
}

/// Formats a numeric key the way JavaScript stringifies it.
fn number_key(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{n:.0}")
    } else {
        n.to_string()
    }
}
