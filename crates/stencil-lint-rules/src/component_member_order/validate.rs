//! Grouping, order and alphabetical checks over classified members.

use std::collections::HashSet;

use super::category::MemberCategory;
use super::classify::ClassifiedMember;

/// Categories present, in order of first appearance.
#[must_use]
pub fn first_seen(members: &[ClassifiedMember<'_>]) -> Vec<MemberCategory> {
    let mut seen = Vec::new();
    for m in members {
        if !seen.contains(&m.category) {
            seen.push(m.category);
        }
    }
    seen
}

/// Categories whose members are interrupted by another category.
#[must_use]
pub fn ungrouped_categories(members: &[ClassifiedMember<'_>]) -> Vec<MemberCategory> {
    first_seen(members)
        .into_iter()
        .filter(|category| {
            let positions: Vec<usize> = members
                .iter()
                .enumerate()
                .filter(|(_, m)| m.category == *category)
                .map(|(i, _)| i)
                .collect();
            positions.windows(2).any(|w| w[1] != w[0] + 1)
        })
        .collect()
}

/// Members of one category mixed in with another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupingFailure {
    /// Category of the first offending member.
    pub category: MemberCategory,
    /// Category it is mixed with.
    pub paired: MemberCategory,
    /// Indices of every member in an offending category.
    pub members: Vec<usize>,
}

impl GroupingFailure {
    /// Failure message.
    #[must_use]
    pub fn message(&self) -> String {
        format!(
            "{} and {} should not be mixed",
            self.category.label(),
            self.paired.label()
        )
    }
}

/// Checks that every category is declared contiguously.
///
/// With `watch_follows_prop`, watchers and watched members are expected to
/// interleave and do not count as offenders.
#[must_use]
pub fn check_grouping(
    members: &[ClassifiedMember<'_>],
    watch_follows_prop: bool,
) -> Option<GroupingFailure> {
    let ungrouped = ungrouped_categories(members);
    if ungrouped.is_empty() {
        return None;
    }

    let offending: Vec<MemberCategory> = members
        .iter()
        .filter(|m| ungrouped.contains(&m.category))
        .filter(|m| !(watch_follows_prop && m.in_watch_pair()))
        .map(|m| m.category)
        .collect();
    let category = *offending.first()?;

    let seen = first_seen(members);
    let position = seen.iter().position(|c| *c == category)?;
    let paired = seen
        .get(position + 1)
        .or_else(|| position.checked_sub(1).and_then(|p| seen.get(p)))
        .copied()?;

    let offending: HashSet<MemberCategory> = offending.into_iter().collect();
    Some(GroupingFailure {
        category,
        paired,
        members: members
            .iter()
            .enumerate()
            .filter(|(_, m)| offending.contains(&m.category))
            .map(|(i, _)| i)
            .collect(),
    })
}

/// A category declared out of the configured order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderFailure {
    /// The misplaced category.
    pub category: MemberCategory,
    /// Configured category expected right before it.
    pub prev: Option<MemberCategory>,
    /// Configured category expected right after it.
    pub next: Option<MemberCategory>,
}

impl OrderFailure {
    /// Failure message.
    #[must_use]
    pub fn message(&self) -> String {
        let placement = match (self.prev, self.next) {
            (Some(prev), Some(next)) => format!("between \"{prev}\" and \"{next}\""),
            (None, Some(next)) => format!("before \"{next}\""),
            (Some(prev), None) => format!("after \"{prev}\""),
            (None, None) => "elsewhere".to_string(),
        };
        format!(
            "Component member \"{}\" should be placed {placement}",
            self.category
        )
    }
}

/// Compares the declared category sequence against `order`.
///
/// Only categories both present and configured take part, so a configured
/// category absent from the class never fails.
#[must_use]
pub fn check_order(
    members: &[ClassifiedMember<'_>],
    order: &[MemberCategory],
) -> Option<OrderFailure> {
    let actual: Vec<MemberCategory> = first_seen(members)
        .into_iter()
        .filter(|c| order.contains(c))
        .collect();

    let mut expected: Vec<MemberCategory> = Vec::new();
    for c in order {
        if actual.contains(c) && !expected.contains(c) {
            expected.push(*c);
        }
    }

    let index = actual.iter().zip(&expected).position(|(a, e)| a != e)?;
    let category = actual[index];
    let position = expected.iter().position(|c| *c == category)?;

    Some(OrderFailure {
        category,
        prev: position.checked_sub(1).map(|p| expected[p]),
        next: expected.get(position + 1).copied(),
    })
}

/// Key used to compare member names.
#[must_use]
pub fn sort_key(name: &str) -> String {
    name.to_uppercase()
}

/// Categories whose members are not in strictly increasing name order.
///
/// Lifecycle and framework methods are exempt. When `order` is set only its
/// categories are checked.
#[must_use]
pub fn unsorted_categories(
    members: &[ClassifiedMember<'_>],
    order: Option<&[MemberCategory]>,
) -> Vec<MemberCategory> {
    first_seen(members)
        .into_iter()
        .filter(|c| order.map_or(true, |o| o.contains(c)))
        .filter(|c| !c.is_alphabetical_exempt())
        .filter(|category| {
            let keys: Vec<String> = members
                .iter()
                .filter(|m| m.category == *category)
                .map(|m| sort_key(m.name))
                .collect();
            keys.windows(2).any(|w| w[0] >= w[1])
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component_member_order::classify::collect;
    use stencil_lint_core::{LanguageExtractor, SourceModel};
    use stencil_lint_ts::TypeScriptExtractor;
    use super::MemberCategory::{Lifecycle, OwnMethod, OwnProp, Prop, State, Watch, WatchedState};

    fn parse_component(body: &str) -> SourceModel {
        let src = format!("@Component({{ tag: 'x-cmp' }})\nclass Cmp {{\n{body}\n}}\n");
        TypeScriptExtractor::new().extract(&src, ".ts").expect("extracts")
    }

    #[test]
    fn contiguous_categories_are_grouped() {
        let model = parse_component("  a = 1;\n  b = 2;\n  @Prop() c: string;\n  @State() d = 1;");
        let members = collect(&model.classes[0]);
        assert!(ungrouped_categories(&members).is_empty());
        assert_eq!(check_grouping(&members, false), None);
    }

    #[test]
    fn interleaved_state_pairs_with_next_seen_category() {
        let model = parse_component("  @State() x = 1;\n  @Prop() y: string;\n  @State() z = 2;");
        let members = collect(&model.classes[0]);
        let failure = check_grouping(&members, false).unwrap();
        assert_eq!(failure.category, State);
        assert_eq!(failure.paired, Prop);
        assert_eq!(failure.members, vec![0, 2]);
        assert_eq!(failure.message(), "State and Prop should not be mixed");
    }

    #[test]
    fn paired_category_is_next_seen() {
        let model = parse_component("  a = 1;\n  @Prop() p: string;\n  helper() {}\n  @Prop() q: string;");
        let members = collect(&model.classes[0]);
        let failure = check_grouping(&members, false).unwrap();
        assert_eq!(failure.category, Prop);
        assert_eq!(failure.paired, OwnMethod);
    }

    #[test]
    fn watch_pairs_do_not_count_when_following_props() {
        let model = parse_component(
            "  @State() a = 1;\n  @Watch('a') aChanged() {}\n  @State() b = 2;\n  @Watch('b') bChanged() {}",
        );
        let members = collect(&model.classes[0]);
        assert_eq!(ungrouped_categories(&members), vec![WatchedState, Watch]);
        assert_eq!(check_grouping(&members, true), None);
        assert!(check_grouping(&members, false).is_some());
    }

    #[test]
    fn order_reports_first_misplaced_category() {
        let model = parse_component("  @State() s = 1;\n  @Prop() p: string;");
        let members = collect(&model.classes[0]);
        let failure = check_order(&members, &[Prop, State]).unwrap();
        assert_eq!(failure.category, State);
        insta::assert_snapshot!(failure.message(), @r#"Component member "state" should be placed after "prop""#);
    }

    #[test]
    fn order_message_after_and_between() {
        let model = parse_component("  @Prop() p: string;\n  a = 1;\n  @State() s = 1;");
        let members = collect(&model.classes[0]);
        let failure = check_order(&members, &[State, OwnProp, Prop]).unwrap();
        assert_eq!(failure.category, Prop);
        assert_eq!(
            failure.message(),
            r#"Component member "prop" should be placed after "own-prop""#
        );

        let failure = check_order(&members, &[OwnProp, Prop, State]).unwrap();
        assert_eq!(
            failure.message(),
            r#"Component member "prop" should be placed between "own-prop" and "state""#
        );

        let model = parse_component("  @State() s = 1;\n  a = 1;\n  @Prop() p: string;");
        let members = collect(&model.classes[0]);
        let failure = check_order(&members, &[Prop, State, OwnProp]).unwrap();
        assert_eq!(
            failure.message(),
            r#"Component member "state" should be placed between "prop" and "own-prop""#
        );
    }

    #[test]
    fn order_message_before() {
        let failure = OrderFailure {
            category: Prop,
            prev: None,
            next: Some(State),
        };
        assert_eq!(
            failure.message(),
            r#"Component member "prop" should be placed before "state""#
        );
    }

    #[test]
    fn absent_configured_categories_never_fail() {
        let model = parse_component("  @Prop() p: string;\n  @State() s = 1;");
        let members = collect(&model.classes[0]);
        assert_eq!(check_order(&members, &[Watch, Prop, Lifecycle, State]), None);
    }

    #[test]
    fn unconfigured_categories_are_ignored_by_order() {
        let model = parse_component("  helper() {}\n  @Prop() p: string;\n  @State() s = 1;");
        let members = collect(&model.classes[0]);
        assert_eq!(check_order(&members, &[Prop, State]), None);
    }

    #[test]
    fn alphabetical_is_case_insensitive_and_strict() {
        let model = parse_component("  apple = 1;\n  Banana = 2;\n  cherry = 3;");
        let members = collect(&model.classes[0]);
        assert!(unsorted_categories(&members, None).is_empty());

        let model = parse_component("  b = 1;\n  B = 2;");
        let members = collect(&model.classes[0]);
        assert_eq!(unsorted_categories(&members, None), vec![OwnProp]);
    }

    #[test]
    fn alphabetical_exempts_lifecycle_and_framework_methods() {
        let model = parse_component(
            "  componentWillLoad() {}\n  componentDidLoad() {}\n  render() {}\n  hostData() {}",
        );
        let members = collect(&model.classes[0]);
        assert!(unsorted_categories(&members, None).is_empty());
    }

    #[test]
    fn alphabetical_respects_configured_categories() {
        let model = parse_component("  b = 1;\n  a = 2;\n  @Prop() d: string;\n  @Prop() c: string;");
        let members = collect(&model.classes[0]);
        assert_eq!(unsorted_categories(&members, None), vec![OwnProp, Prop]);
        assert_eq!(unsorted_categories(&members, Some(&[Prop][..])), vec![Prop]);
    }
}
