//! Language-agnostic source model consumed by rules.
//!
//! Extractors turn raw source text into a [`SourceModel`]: every class
//! declaration in the file with its decorators and members, plus the byte
//! spans rules need to report findings and build fixes. The model is
//! read-only once built.

/// Decorator name marking a component class.
pub const COMPONENT_DECORATOR: &str = "Component";

/// Byte range in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    /// Start byte offset (inclusive).
    pub start: usize,
    /// End byte offset (exclusive).
    pub end: usize,
}

impl Span {
    /// Creates a new span.
    #[must_use]
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns true for an empty span.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Smallest span covering both `self` and `other`.
    #[must_use]
    pub fn cover(&self, other: &Self) -> Self {
        Self {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

/// A literal value evaluated from decorator argument text.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// `undefined`
    Undefined,
    /// `null`
    Null,
    /// `true` / `false`
    Bool(bool),
    /// Any numeric literal.
    Number(f64),
    /// String or substitution-free template literal.
    String(String),
    /// Array literal.
    Array(Vec<Literal>),
    /// Object literal, keys in source order.
    Object(Vec<(String, Literal)>),
}

impl Literal {
    /// JavaScript truthiness of the value.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Undefined | Self::Null => false,
            Self::Bool(b) => *b,
            Self::Number(n) => *n != 0.0 && !n.is_nan(),
            Self::String(s) => !s.is_empty(),
            Self::Array(_) | Self::Object(_) => true,
        }
    }

    /// Looks up `key` in an object literal. The last duplicate key wins.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Literal> {
        match self {
            Self::Object(entries) => entries.iter().rev().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    /// Returns the string payload, if this is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }
}

/// One argument passed to a decorator call.
#[derive(Debug, Clone, PartialEq)]
pub struct DecoratorArgument {
    /// Raw argument text, trimmed.
    pub text: String,
    /// Evaluated value, or `None` when the argument is not a literal.
    pub value: Option<Literal>,
    /// Span of the argument expression.
    pub span: Span,
    /// For an object argument, the span of each `key: value` value, keys in
    /// source order.
    pub value_spans: Vec<(String, Span)>,
}

impl DecoratorArgument {
    /// Span of the value written for `key`. The last duplicate key wins.
    #[must_use]
    pub fn value_span(&self, key: &str) -> Option<Span> {
        self.value_spans
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, span)| *span)
    }
}

/// A decorator attached to a class or member.
#[derive(Debug, Clone, PartialEq)]
pub struct Decorator {
    /// Final identifier of the decorator expression (`@ns.Prop()` is `Prop`).
    pub name: String,
    /// Call arguments; empty for bare `@Name`.
    pub arguments: Vec<DecoratorArgument>,
    /// Whether the decorator was written as a call (`@Name(...)`). Only call
    /// forms decide a member's category.
    pub is_call: bool,
    /// Span from `@` to the end of the decorator.
    pub span: Span,
}

impl Decorator {
    /// Evaluated value of the first argument, if it is a literal.
    #[must_use]
    pub fn first_value(&self) -> Option<&Literal> {
        self.arguments.first().and_then(|a| a.value.as_ref())
    }

    /// First argument when it evaluates to a string.
    #[must_use]
    pub fn first_string(&self) -> Option<&str> {
        self.first_value().and_then(Literal::as_str)
    }
}

/// Structural kind of a class member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
    /// Field / property declaration.
    Property,
    /// Method declaration.
    Method,
    /// `get` / `set` accessor.
    Accessor,
    /// `constructor(...)`.
    Constructor,
    /// Index signatures, static blocks, abstract signatures.
    Other,
}

/// A member declared directly in a class body.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassMember {
    /// Identifier name; `None` for computed, string, numeric, or private names.
    pub name: Option<String>,
    /// Structural kind.
    pub kind: MemberKind,
    /// Decorators in source order.
    pub decorators: Vec<Decorator>,
    /// From the first decorator (or first token) to the end, including a trailing `;`.
    pub span: Span,
    /// Start of the first token after the decorators (a modifier or the name).
    pub declaration_start: usize,
    /// Span of the member name, when present.
    pub name_span: Option<Span>,
    /// Start of the comment block attached directly above the member, or `span.start`.
    pub leading_start: usize,
}

impl ClassMember {
    /// Returns true if the member carries a decorator with this name.
    #[must_use]
    pub fn has_decorator(&self, name: &str) -> bool {
        self.decorators.iter().any(|d| d.name == name)
    }

    /// First decorator with this name.
    #[must_use]
    pub fn decorator(&self, name: &str) -> Option<&Decorator> {
        self.decorators.iter().find(|d| d.name == name)
    }

    /// Returns true if the member is named `name`.
    #[must_use]
    pub fn is_named(&self, name: &str) -> bool {
        self.name.as_deref() == Some(name)
    }

    /// Span including the attached leading comments.
    #[must_use]
    pub fn full_span(&self) -> Span {
        Span::new(self.leading_start, self.span.end)
    }
}

/// A class declaration or class expression.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassDeclaration {
    /// Class name, absent for anonymous class expressions.
    pub name: Option<String>,
    /// Decorators attached to the class (including ones written before `export`).
    pub decorators: Vec<Decorator>,
    /// From the first class decorator (or `class`) to the closing brace.
    pub span: Span,
    /// Members in declaration order.
    pub members: Vec<ClassMember>,
}

impl ClassDeclaration {
    /// Returns true if the class is decorated with `@Component`.
    #[must_use]
    pub fn is_component(&self) -> bool {
        self.decorators.iter().any(|d| d.name == COMPONENT_DECORATOR)
    }
}

/// All classes found in one source file, in depth-first pre-order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceModel {
    /// Class declarations, outer classes before the classes nested inside them.
    pub classes: Vec<ClassDeclaration>,
}

impl SourceModel {
    /// Iterates over component classes only.
    pub fn components(&self) -> impl Iterator<Item = &ClassDeclaration> {
        self.classes.iter().filter(|c| c.is_component())
    }
}
