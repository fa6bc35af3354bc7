//! Member categories.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Semantic category of a component member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MemberCategory {
    /// `@Element()` property.
    Element,
    /// `@Event()` property.
    Event,
    /// `@Prop()` whose options carry `context` or `connect`.
    InternalProp,
    /// Undecorated lifecycle method.
    Lifecycle,
    /// `@Listen()` method.
    Listen,
    /// `@Method()` method.
    Method,
    /// Undecorated method.
    OwnMethod,
    /// Undecorated property.
    OwnProp,
    /// `@Prop()` property.
    Prop,
    /// `@State()` property.
    State,
    /// Undecorated `hostData` / `render`.
    StencilMethod,
    /// `@Watch()` method.
    Watch,
    /// `@Prop()` property observed by a watcher.
    WatchedProp,
    /// `@State()` property observed by a watcher.
    WatchedState,
}

impl MemberCategory {
    /// Every category, alphabetically by kebab-case name.
    pub const ALL: [Self; 14] = [
        Self::Element,
        Self::Event,
        Self::InternalProp,
        Self::Lifecycle,
        Self::Listen,
        Self::Method,
        Self::OwnMethod,
        Self::OwnProp,
        Self::Prop,
        Self::State,
        Self::StencilMethod,
        Self::Watch,
        Self::WatchedProp,
        Self::WatchedState,
    ];

    /// Kebab-case name used in configuration and order messages.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Element => "element",
            Self::Event => "event",
            Self::InternalProp => "internal-prop",
            Self::Lifecycle => "lifecycle",
            Self::Listen => "listen",
            Self::Method => "method",
            Self::OwnMethod => "own-method",
            Self::OwnProp => "own-prop",
            Self::Prop => "prop",
            Self::State => "state",
            Self::StencilMethod => "stencil-method",
            Self::Watch => "watch",
            Self::WatchedProp => "watched-prop",
            Self::WatchedState => "watched-state",
        }
    }

    /// Human-readable label used in grouping messages.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Element => "Element",
            Self::Event => "Event",
            Self::InternalProp => "Internal Prop",
            Self::Lifecycle => "Lifecycle Method",
            Self::Listen => "Listen",
            Self::Method => "Method",
            Self::OwnMethod => "Own Method",
            Self::OwnProp => "Own Prop",
            Self::Prop => "Prop",
            Self::State => "State",
            Self::StencilMethod => "Stencil Method",
            Self::Watch => "Watch",
            Self::WatchedProp => "Watched Prop",
            Self::WatchedState => "Watched State",
        }
    }

    /// Category for a member decorator name, before refinement.
    #[must_use]
    pub fn from_decorator(name: &str) -> Option<Self> {
        match name {
            "Element" => Some(Self::Element),
            "Event" => Some(Self::Event),
            "Listen" => Some(Self::Listen),
            "Method" => Some(Self::Method),
            "Prop" => Some(Self::Prop),
            "State" => Some(Self::State),
            "Watch" => Some(Self::Watch),
            _ => None,
        }
    }

    /// The watched refinement of `prop` and `state`.
    #[must_use]
    pub fn watched(self) -> Option<Self> {
        match self {
            Self::Prop => Some(Self::WatchedProp),
            Self::State => Some(Self::WatchedState),
            _ => None,
        }
    }

    /// Categories whose canonical order is call order, not lexical.
    #[must_use]
    pub fn is_alphabetical_exempt(self) -> bool {
        matches!(self, Self::Lifecycle | Self::StencilMethod)
    }
}

impl fmt::Display for MemberCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for a category name that is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown member category `{0}`")]
pub struct UnknownCategory(pub String);

impl FromStr for MemberCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}
