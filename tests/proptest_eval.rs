
use mapcss_rules::{Outcome, Rule, RuleIndex, RuleMatch, Verdict, WILDCARD};
use proptest::prelude::*;
use strategies::{arb_condition, arb_rule, arb_rules, arb_tags, OBJECTS};

proptest! {
    /// Testing never panics for any condition and tag set.
    #[test]
    fn condition_test_never_panics(condition in arb_condition(), tags in arb_tags()) {
        let _ = condition.test(&tags);
    }

    /// A condition that reads a key fails whenever that key is missing.
    #[test]
    fn missing_required_key_fails(condition in arb_condition(), tags in arb_tags()) {
        if condition.requires_tag() {
            let key = condition.key().unwrap().to_owned();
            let without: mapcss_rules::Tags = tags
                .iter()
                .filter(|(k, _)| *k != key)
                .collect();
            prop_assert_eq!(condition.test(&without), Outcome::Fail);
        }
    }

    /// A matching rule's class is the class of its last class-yielding condition.
    #[test]
    fn last_class_wins(rule in arb_rule(), tags in arb_tags(), obj in prop::sample::select(OBJECTS)) {
        if let Verdict::Matched(class) = rule.test(obj, &tags, rule.min_zoom) {
            let expected = rule.conditions.iter().rev().find_map(|c| match c.test(&tags) {
                Outcome::Class(name) => Some(name),
                _ => None,
            });
            prop_assert_eq!(class, expected);
        }
    }

    /// A rule matches iff zoom, type and every condition pass.
    #[test]
    fn rule_is_gated_conjunction(
        rule in arb_rule(),
        tags in arb_tags(),
        obj in prop::sample::select(OBJECTS),
        zoom in 0_u8..=20,
    ) {
        let expected = zoom >= rule.min_zoom
            && zoom <= rule.max_zoom
            && rule.subject.accepts(obj)
            && rule.conditions.iter().all(|c| c.test(&tags).is_pass());
        prop_assert_eq!(rule.test(obj, &tags, zoom).is_match(), expected);
    }

    /// Wildcard collapse: the tag set is either `{"*"}` or free of `*`.
    #[test]
    fn extract_tags_collapses(rule in arb_rule()) {
        let keys = rule.extract_tags();
        if keys.contains(WILDCARD) {
            prop_assert_eq!(keys.len(), 1);
        }
    }

    /// Equality depends only on kind and params.
    #[test]
    fn equality_matches_kind_and_params(a in arb_condition(), b in arb_condition()) {
        let same = a.kind() == b.kind() && a.params() == b.params();
        prop_assert_eq!(a == b, same);
    }

    /// The index returns exactly what testing every rule in order would.
    #[test]
    fn index_matches_brute_force(
        rules in arb_rules(),
        tags in arb_tags(),
        obj in prop::sample::select(OBJECTS),
        zoom in 0_u8..=19,
    ) {
        let brute: Vec<(usize, Option<String>)> = rules
            .iter()
            .enumerate()
            .filter_map(|(i, rule): (usize, &Rule)| match rule.test(obj, &tags, zoom) {
                Verdict::Matched(class) => Some((i, class.map(str::to_owned))),
                Verdict::NoMatch => None,
            })
            .collect();

        let index = RuleIndex::new(rules);
        let indexed: Vec<(usize, Option<String>)> = index
            .matching(obj, &tags, zoom)
            .iter()
            .map(|m: &RuleMatch<'_>| (m.index, m.class.map(str::to_owned)))
            .collect();

        prop_assert_eq!(indexed, brute);
    }
}
