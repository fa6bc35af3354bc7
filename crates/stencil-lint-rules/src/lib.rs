//! # stencil-lint-rules
//!
//! Built-in lint rules for stencil-lint.
//!
//! ## Available Rules
//!
//! | Code | Name | Description |
//! |------|------|-------------|
//! | SL001 | `component-member-order` | Groups, orders and sorts component members by category |
//! | SL002 | `watch-follows-prop` | Requires `@Watch` methods to follow the Prop/State they watch |
//! | SL003 | `lifecycle-order` | Orders lifecycle methods by call order or name |
//! | SL004 | `stencil-method-order` | Groups and orders `hostData` / `render` |
//! | SL005 | `render-as-final-method` | Requires `render` to be the last member |
//! | SL006 | `components-per-file` | Limits components per file |
//! | SL007 | `ban-prefix` | Forbids component tag prefixes |
//! | SL008 | `require-prefix` | Requires a component tag prefix |
//! | SL009 | `decorated-member-style` | Keeps decorators inline or on their own lines |
//!
//! ## Usage
//!
//! ```ignore
//! use stencil_lint_core::Analyzer;
//! use stencil_lint_rules::{ComponentMemberOrder, RenderAsFinalMethod};
//! use stencil_lint_ts::TypeScriptExtractor;
//!
//! let analyzer = Analyzer::builder()
//!     .root("./src")
//!     .extractor(TypeScriptExtractor::new())
//!     .rule(ComponentMemberOrder::recommended().alphabetical(true))
//!     .rule(RenderAsFinalMethod::new())
//!     .build()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod ban_prefix;
pub mod component_member_order;
mod component_tag;
mod components_per_file;
mod constants;
mod decorated_member_style;
mod error;
mod lifecycle_order;
mod presets;
mod render_as_final_method;
mod require_prefix;
mod stencil_method_order;
mod watch_follows_prop;

#[cfg(test)]
mod testing;

pub use ban_prefix::BanPrefix;
pub use component_member_order::{ComponentMemberOrder, MemberCategory, MemberOrderOptions};
pub use component_tag::{component_tag, ComponentTag};
pub use components_per_file::ComponentsPerFile;
pub use constants::{LIFECYCLE_METHODS, STENCIL_METHODS};
pub use decorated_member_style::{DecoratedMemberStyle, DecoratorStyle};
pub use error::OptionError;
pub use lifecycle_order::{LifecycleMode, LifecycleOrder};
pub use presets::{
    all_rules, configured_rules, minimal_rules, recommended_rules, rule_from_config, strict_rules,
    Preset,
};
pub use render_as_final_method::RenderAsFinalMethod;
pub use require_prefix::RequirePrefix;
pub use stencil_method_order::StencilMethodOrder;
pub use watch_follows_prop::WatchFollowsProp;

/// Re-export core types for convenience.
pub use stencil_lint_core::{Rule, Severity, Violation};
