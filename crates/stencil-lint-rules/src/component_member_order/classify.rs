//! Member classification and watcher resolution.

use std::collections::HashSet;

use stencil_lint_core::{ClassDeclaration, ClassMember, Literal, MemberKind};

use super::category::MemberCategory;
use crate::constants::{is_lifecycle_method, is_stencil_method, MEMBER_DECORATORS};

/// Option keys that turn a `@Prop()` into an internal prop.
const INTERNAL_PROP_KEYS: &[&str] = &["context", "connect"];

/// A named component member with its category.
#[derive(Debug, Clone)]
pub struct ClassifiedMember<'a> {
    /// Identifier name.
    pub name: &'a str,
    /// Category after watcher refinement.
    pub category: MemberCategory,
    /// The underlying declaration.
    pub member: &'a ClassMember,
    /// Name passed to `@Watch()`; empty when it is not a string literal.
    /// Set only for watchers.
    pub watches: Option<&'a str>,
    /// Index of the watcher observing this member.
    pub watched_by: Option<usize>,
}

impl ClassifiedMember<'_> {
    /// Returns true for watchers and the members they observe.
    #[must_use]
    pub fn in_watch_pair(&self) -> bool {
        self.category == MemberCategory::Watch || self.watched_by.is_some()
    }
}

/// Raw category of a single member, or `None` if it is not ordered.
///
/// Exactly one member decorator written as a call decides the category.
/// Otherwise the member's shape and name do: fields are own props, methods
/// are lifecycle, framework or own methods. Constructors, accessors and signatures are
/// not ordered.
#[must_use]
pub fn classify(member: &ClassMember) -> Option<MemberCategory> {
    let mut recognized = member
        .decorators
        .iter()
        .filter(|d| d.is_call && MEMBER_DECORATORS.contains(&d.name.as_str()));

    if let (Some(decorator), None) = (recognized.next(), recognized.next()) {
        let category = MemberCategory::from_decorator(&decorator.name)?;
        let internal = category == MemberCategory::Prop
            && decorator.first_value().is_some_and(|options| {
                INTERNAL_PROP_KEYS
                    .iter()
                    .any(|key| options.get(key).is_some_and(Literal::is_truthy))
            });
        return Some(if internal {
            MemberCategory::InternalProp
        } else {
            category
        });
    }

    match member.kind {
        MemberKind::Property => Some(MemberCategory::OwnProp),
        MemberKind::Method => {
            let name = member.name.as_deref()?;
            Some(if is_lifecycle_method(name) {
                MemberCategory::Lifecycle
            } else if is_stencil_method(name) {
                MemberCategory::StencilMethod
            } else {
                MemberCategory::OwnMethod
            })
        }
        MemberKind::Accessor | MemberKind::Constructor | MemberKind::Other => None,
    }
}

/// Classifies the named members of a class and links watchers to their
/// targets.
#[must_use]
pub fn collect(class: &ClassDeclaration) -> Vec<ClassifiedMember<'_>> {
    let mut members: Vec<ClassifiedMember<'_>> = class
        .members
        .iter()
        .filter_map(|member| {
            let name = member.name.as_deref()?;
            let category = classify(member)?;
            let watches = (category == MemberCategory::Watch).then(|| {
                member
                    .decorator("Watch")
                    .and_then(|d| d.first_string())
                    .unwrap_or("")
            });
            Some(ClassifiedMember {
                name,
                category,
                member,
                watches,
                watched_by: None,
            })
        })
        .collect();

    resolve_watchers(&mut members);
    members
}

/// Refines watched `prop`/`state` members and records their watcher.
///
/// Watchers whose target matches nothing stay plain watchers.
pub fn resolve_watchers(members: &mut [ClassifiedMember<'_>]) {
    let watched: HashSet<&str> = members
        .iter()
        .filter_map(|m| m.watches)
        .filter(|w| !w.is_empty())
        .collect();

    for i in 0..members.len() {
        let name = members[i].name;
        if !watched.contains(name) {
            continue;
        }
        let Some(refined) = members[i].category.watched() else {
            continue;
        };
        let watcher = members.iter().position(|m| m.watches == Some(name));
        members[i].category = refined;
        members[i].watched_by = watcher;
    }
}

/// Indices of watchers not declared immediately after the member they watch.
#[must_use]
pub fn misplaced_watchers(members: &[ClassifiedMember<'_>]) -> Vec<usize> {
    members
        .iter()
        .enumerate()
        .filter_map(|(i, m)| {
            let target = m.watches?;
            let follows = i
                .checked_sub(1)
                .is_some_and(|prev| members[prev].name == target);
            (!follows).then_some(i)
        })
        .collect()
}
