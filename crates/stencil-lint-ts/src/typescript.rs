//! TypeScript/TSX extractor using Tree-sitter.

use stencil_lint_core::{
    ClassDeclaration, ClassMember, Decorator, DecoratorArgument, ExtractError,
    LanguageExtractor, MemberKind, SourceModel, Span,
};
use tracing::debug;
use tree_sitter::{Language, Node, Parser};

use crate::literal::{evaluate_literal, property_key};

/// Node kinds that introduce a class. The `class` keyword token shares the
/// `class` kind, so only named nodes count.
const CLASS_KINDS: &[&str] = &["class_declaration", "abstract_class_declaration", "class"];

/// Extracts class declarations, decorators and members from TypeScript source.
pub struct TypeScriptExtractor {
    typescript: Language,
    tsx: Language,
}

impl TypeScriptExtractor {
    /// Creates a new TypeScript extractor.
    #[must_use]
    pub fn new() -> Self {
        Self {
            typescript: tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            tsx: tree_sitter_typescript::LANGUAGE_TSX.into(),
        }
    }

    fn language_for(&self, extension: &str) -> &Language {
        if extension == ".tsx" {
            &self.tsx
        } else {
            &self.typescript
        }
    }
}

impl Default for TypeScriptExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageExtractor for TypeScriptExtractor {
    fn language_id(&self) -> &'static str {
        "typescript"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &[".ts", ".tsx"]
    }

    fn extract(&self, source: &str, extension: &str) -> Result<SourceModel, ExtractError> {
        let mut parser = Parser::new();
        parser
            .set_language(self.language_for(extension))
            .map_err(|e| ExtractError::Language(e.to_string()))?;

        let tree = parser.parse(source, None).ok_or(ExtractError::ParseFailed)?;
        let root = tree.root_node();
        if root.has_error() {
            debug!("Source has syntax errors; extracting what parsed");
        }

        let mut walker = Walker {
            src: source.as_bytes(),
            classes: Vec::new(),
        };
        walker.visit(root);

        Ok(SourceModel {
            classes: walker.classes,
        })
    }
}

/// Depth-first pre-order collector of classes.
struct Walker<'s> {
    src: &'s [u8],
    classes: Vec<ClassDeclaration>,
}

impl Walker<'_> {
    fn text(&self, node: Node<'_>) -> &str {
        node.utf8_text(self.src).unwrap_or("")
    }

    fn visit(&mut self, node: Node<'_>) {
        if node.is_named() && CLASS_KINDS.contains(&node.kind()) {
            let class = self.class(node);
            self.classes.push(class);
        }

        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            self.visit(child);
        }
    }

    fn class(&self, node: Node<'_>) -> ClassDeclaration {
        let mut decorators = Vec::new();

        // `@Component(...) export class X {}` attaches to the export statement.
        if let Some(parent) = node.parent().filter(|p| p.kind() == "export_statement") {
            decorators.extend(self.decorators_in(parent));
        }
        decorators.extend(self.decorators_in(node));

        let members = node
            .child_by_field_name("body")
            .map(|body| self.members(body))
            .unwrap_or_default();

        let start = decorators
            .first()
            .map_or(node.start_byte(), |d| d.span.start.min(node.start_byte()));

        ClassDeclaration {
            name: node
                .child_by_field_name("name")
                .map(|n| self.text(n).to_string()),
            decorators,
            span: Span::new(start, node.end_byte()),
            members,
        }
    }

    fn decorators_in(&self, node: Node<'_>) -> Vec<Decorator> {
        let mut cursor = node.walk();
        node.children(&mut cursor)
            .filter(|c| c.kind() == "decorator")
            .filter_map(|c| self.decorator(c))
            .collect()
    }

    fn decorator(&self, node: Node<'_>) -> Option<Decorator> {
        let mut cursor = node.walk();
        let expr = node
            .named_children(&mut cursor)
            .find(|c| c.kind() != "comment")?;

        let (callee, arguments, is_call) = if expr.kind() == "call_expression" {
            let arguments = expr
                .child_by_field_name("arguments")
                .map(|args| self.arguments(args))
                .unwrap_or_default();
            (expr.child_by_field_name("function")?, arguments, true)
        } else {
            (expr, Vec::new(), false)
        };

        let name = match callee.kind() {
            "identifier" => self.text(callee),
            "member_expression" => self.text(callee.child_by_field_name("property")?),
            _ => return None,
        };

        Some(Decorator {
            name: name.to_string(),
            arguments,
            is_call,
            span: span(node),
        })
    }

    fn arguments(&self, node: Node<'_>) -> Vec<DecoratorArgument> {
        let mut cursor = node.walk();
        node.named_children(&mut cursor)
            .filter(|c| c.kind() != "comment")
            .map(|arg| DecoratorArgument {
                text: self.text(arg).trim().to_string(),
                value: evaluate_literal(arg, self.src),
                span: span(arg),
                value_spans: self.value_spans(arg),
            })
            .collect()
    }

    /// Value spans of the `key: value` pairs of an object argument.
    fn value_spans(&self, node: Node<'_>) -> Vec<(String, Span)> {
        if node.kind() != "object" {
            return Vec::new();
        }
        let mut cursor = node.walk();
        node.named_children(&mut cursor)
            .filter(|c| c.kind() == "pair")
            .filter_map(|pair| {
                let key = property_key(pair.child_by_field_name("key")?, self.src)?;
                Some((key, span(pair.child_by_field_name("value")?)))
            })
            .collect()
    }

    /// Collects the members of a `class_body`.
    ///
    /// Method decorators are siblings preceding the `method_definition`;
    /// field decorators are children of the `public_field_definition`.
    fn members(&self, body: Node<'_>) -> Vec<ClassMember> {
        let mut members = Vec::new();
        let mut pending: Vec<Node<'_>> = Vec::new();

        let mut cursor = body.walk();
        for child in body.children(&mut cursor) {
            let kind = match child.kind() {
                "decorator" => {
                    pending.push(child);
                    continue;
                }
                "public_field_definition" => MemberKind::Property,
                "method_definition" => self.method_kind(child),
                "method_signature"
                | "abstract_method_signature"
                | "index_signature"
                | "class_static_block" => MemberKind::Other,
                _ => continue,
            };

            let first = pending.first().copied().unwrap_or(child);
            let mut decorators: Vec<Decorator> =
                pending.drain(..).filter_map(|d| self.decorator(d)).collect();
            decorators.extend(self.decorators_in(child));

            let end = child
                .next_sibling()
                .filter(|s| s.kind() == ";")
                .map_or(child.end_byte(), |s| s.end_byte());

            let name_node = child
                .child_by_field_name("name")
                .filter(|n| n.kind() == "property_identifier");

            members.push(ClassMember {
                name: name_node.map(|n| self.text(n).to_string()),
                kind,
                decorators,
                span: Span::new(first.start_byte(), end),
                declaration_start: declaration_start(child),
                name_span: name_node.map(span),
                leading_start: self.leading_start(first),
            });
        }

        members
    }

    fn method_kind(&self, node: Node<'_>) -> MemberKind {
        let mut cursor = node.walk();
        let is_accessor = node
            .children(&mut cursor)
            .any(|c| !c.is_named() && matches!(c.kind(), "get" | "set"));
        if is_accessor {
            return MemberKind::Accessor;
        }
        match node.child_by_field_name("name") {
            Some(name) if self.text(name) == "constructor" => MemberKind::Constructor,
            _ => MemberKind::Method,
        }
    }

    /// Start of the comment lines attached directly above `first`.
    ///
    /// A comment is attached when it starts its own line and no blank line
    /// separates it from what follows.
    fn leading_start(&self, first: Node<'_>) -> usize {
        let mut start = first.start_byte();
        let mut prev = first.prev_sibling();

        while let Some(comment) = prev.filter(|p| p.kind() == "comment") {
            let gap = &self.src[comment.end_byte()..start];
            let newlines = gap.iter().filter(|b| **b == b'\n').count();
            if newlines > 1 || !gap.iter().all(u8::is_ascii_whitespace) {
                break;
            }
            if !self.starts_line(comment.start_byte()) {
                break;
            }
            start = comment.start_byte();
            prev = comment.prev_sibling();
        }

        start
    }

    fn starts_line(&self, offset: usize) -> bool {
        self.src[..offset]
            .iter()
            .rev()
            .take_while(|b| **b != b'\n')
            .all(|b| *b == b' ' || *b == b'\t')
    }
}

fn span(node: Node<'_>) -> Span {
    Span::new(node.start_byte(), node.end_byte())
}

/// Start of the first child that is not a decorator or comment.
fn declaration_start(node: Node<'_>) -> usize {
    let mut cursor = node.walk();
    let first = node
        .children(&mut cursor)
        .find(|c| !matches!(c.kind(), "decorator" | "comment"));
    first.map_or(node.start_byte(), |c| c.start_byte())
}

#[cfg(test)]
mod tests {
    use super::*;
    use stencil_lint_core::Literal;

    fn extract(src: &str) -> SourceModel {
        TypeScriptExtractor::new()
            .extract(src, ".tsx")
            .expect("extracts")
    }

    const COMPONENT: &str = r"import { Component, Prop, State, Watch, h } from '@stencil/core';

@Component({ tag: 'my-cmp', shadow: true })
export class MyCmp {
  @Prop() first: string;
  @Prop({ context: 'config' }) config: any;

  // Current count.
  @State() count = 0;

  @Watch('count')
  countChanged(next: number) {}

  private helper = 1;

  get label() { return ''; }

  constructor() {}

  render() {
    return <div>{this.first}</div>;
  }
}
";

    #[test]
    fn extracts_component_class() {
        let model = extract(COMPONENT);
        assert_eq!(model.classes.len(), 1);
        let class = &model.classes[0];
        assert_eq!(class.name.as_deref(), Some("MyCmp"));
        assert!(class.is_component());
        let component = &class.decorators[0];
        assert_eq!(
            component.first_value().and_then(|v| v.get("tag")),
            Some(&Literal::String("my-cmp".into()))
        );
    }

    #[test]
    fn extracts_members_in_order() {
        let model = extract(COMPONENT);
        let members = &model.classes[0].members;
        let names: Vec<_> = members.iter().map(|m| m.name.as_deref().unwrap_or("?")).collect();
        assert_eq!(
            names,
            ["first", "config", "count", "countChanged", "helper", "label", "constructor", "render"]
        );
        let kinds: Vec<_> = members.iter().map(|m| m.kind).collect();
        assert_eq!(
            kinds,
            [
                MemberKind::Property,
                MemberKind::Property,
                MemberKind::Property,
                MemberKind::Method,
                MemberKind::Property,
                MemberKind::Accessor,
                MemberKind::Constructor,
                MemberKind::Method,
            ]
        );
    }

    #[test]
    fn member_spans_cover_decorators_and_semicolons() {
        let model = extract(COMPONENT);
        let member = &model.classes[0].members[0];
        assert_eq!(&COMPONENT[member.span.start..member.span.end], "@Prop() first: string;");

        let watcher = &model.classes[0].members[3];
        assert!(COMPONENT[watcher.span.start..watcher.span.end].starts_with("@Watch('count')"));
        assert_eq!(watcher.decorator("Watch").and_then(Decorator::first_string), Some("count"));
    }

    #[test]
    fn decorator_arguments_are_evaluated() {
        let model = extract(COMPONENT);
        let prop = &model.classes[0].members[1];
        let decorator = prop.decorator("Prop").unwrap();
        assert!(decorator.is_call);
        assert_eq!(decorator.arguments[0].text, "{ context: 'config' }");
        assert!(decorator.first_value().unwrap().get("context").is_some());
    }

    #[test]
    fn object_argument_value_spans() {
        let model = extract(COMPONENT);
        let component = &model.classes[0].decorators[0];
        let tag = component.arguments[0].value_span("tag").unwrap();
        assert_eq!(&COMPONENT[tag.start..tag.end], "'my-cmp'");
        assert_eq!(component.arguments[0].value_span("styleUrl"), None);
    }

    #[test]
    fn declaration_start_skips_decorators() {
        let src = "class A {\n  @Prop() private a: string;\n  @Watch('a')\n  aChanged() {}\n}\n";
        let model = extract(src);
        let members = &model.classes[0].members;
        assert!(src[members[0].declaration_start..].starts_with("private a"));
        assert!(src[members[1].declaration_start..].starts_with("aChanged"));
    }

    #[test]
    fn leading_comments_attach() {
        let model = extract(COMPONENT);
        let state = &model.classes[0].members[2];
        assert_eq!(
            &COMPONENT[state.leading_start..state.span.end],
            "// Current count.\n  @State() count = 0;"
        );
        let first = &model.classes[0].members[0];
        assert_eq!(first.leading_start, first.span.start);
    }

    #[test]
    fn comment_separated_by_blank_line_does_not_attach() {
        let src = "class A {\n  // detached\n\n  b = 1;\n}\n";
        let model = extract(src);
        let member = &model.classes[0].members[0];
        assert_eq!(member.leading_start, member.span.start);
    }

    #[test]
    fn bare_and_namespaced_decorators() {
        let src = "@Component({ tag: 'x' })\nclass A {\n  @Element el: HTMLElement;\n  @core.State() s = 1;\n}\n";
        let model = extract(src);
        let members = &model.classes[0].members;
        assert!(!members[0].decorators[0].is_call);
        assert_eq!(members[0].decorators[0].name, "Element");
        assert_eq!(members[1].decorators[0].name, "State");
    }

    #[test]
    fn non_identifier_names_are_unnamed() {
        let src = "class A {\n  'quoted' = 1;\n  [key] = 2;\n  #secret = 3;\n  42() {}\n}\n";
        let model = extract(src);
        assert!(model.classes[0].members.iter().all(|m| m.name.is_none()));
    }

    #[test]
    fn nested_classes_are_visited_pre_order() {
        let src = "class Outer {\n  make() {\n    return class Inner { x = 1; };\n  }\n}\nclass Next {}\n";
        let model = extract(src);
        let names: Vec<_> = model.classes.iter().map(|c| c.name.as_deref()).collect();
        assert_eq!(names, [Some("Outer"), Some("Inner"), Some("Next")]);
    }

    #[test]
    fn class_keyword_is_not_a_class() {
        let src = "@Component({ tag: 'x-a' })\nexport class Cmp {\n  @Prop() a: string;\n}\n";
        let model = extract(src);
        assert_eq!(model.classes.len(), 1);
        assert_eq!(model.classes[0].members.len(), 1);

        let expr = extract("const A = class {\n  x = 1;\n};\n");
        assert_eq!(expr.classes.len(), 1);
        assert_eq!(expr.classes[0].name, None);
        assert_eq!(expr.classes[0].members.len(), 1);
    }

    #[test]
    fn typescript_grammar_for_ts_files() {
        let src = "@Component({ tag: 'a' })\nexport class A {\n  value = <string>input;\n}\n";
        let model = TypeScriptExtractor::new().extract(src, ".ts").unwrap();
        assert_eq!(model.components().count(), 1);
    }

    #[test]
    fn tolerates_syntax_errors() {
        let result = TypeScriptExtractor::new().extract("class A {\n  b = ;\n  c = 1;\n}\n", ".ts");
        assert!(result.is_ok());
    }

    #[test]
    fn handles_extensions() {
        let extractor = TypeScriptExtractor::new();
        assert!(extractor.handles(".ts"));
        assert!(extractor.handles(".tsx"));
        assert!(!extractor.handles(".js"));
    }
}
