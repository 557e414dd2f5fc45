use std::collections::HashMap;

use crate::{Condition, Rule, RuleIndex, WILDCARD};

pub(crate) fn compile(rules: Vec<Rule>) -> RuleIndex {
    let mut by_key: HashMap<String, Vec<usize>> = HashMap::new();
    let mut unkeyed = Vec::new();

    for (i, rule) in rules.iter().enumerate() {
        match guard_key(rule) {
            Some(key) => by_key.entry(key.to_owned()).or_default().push(i),
            None => unkeyed.push(i),
        }
    }

    tracing::debug!(
        rules = rules.len(),
        keys = by_key.len(),
        unkeyed = unkeyed.len(),
        "built rule index"
    );

    RuleIndex {
        rules,
        by_key,
        unkeyed,
    }
}

/// A tag key the rule cannot match without, if one can be named.
///
/// Rules depending on unknown keys, or whose conditions can all pass on an
/// absent key, have no guard and are always candidates.
fn guard_key(rule: &Rule) -> Option<&str> {
    if rule.extract_tags().contains(WILDCARD) {
        return None;
    }
    rule.conditions
        .iter()
        .find(|c| c.requires_tag())
        .and_then(Condition::key)
}
