//! Stencil framework names shared by the rules.

/// Lifecycle methods, in the order the runtime calls them.
pub const LIFECYCLE_METHODS: &[&str] = &[
    "componentWillLoad",
    "componentDidLoad",
    "componentWillUpdate",
    "componentDidUpdate",
    "componentDidUnload",
];

/// Framework methods that produce host data and markup.
pub const STENCIL_METHODS: &[&str] = &["hostData", "render"];

/// Member decorators exported by `@stencil/core`.
pub const MEMBER_DECORATORS: &[&str] = &["Element", "Event", "Listen", "Method", "Prop", "State", "Watch"];

/// Returns true if `name` is a lifecycle method.
#[must_use]
pub fn is_lifecycle_method(name: &str) -> bool {
    LIFECYCLE_METHODS.contains(&name)
}

/// Returns true if `name` is a framework method.
#[must_use]
pub fn is_stencil_method(name: &str) -> bool {
    STENCIL_METHODS.contains(&name)
}
