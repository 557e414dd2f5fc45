use crate::{Condition, Outcome, Rule, TagSource, Verdict};

/// Coerce a tag value to a number. Unparsable input reads as `0`.
///
/// Single underscores between digits group them (`1_000`), anywhere else they
/// make the value unparsable.
pub(crate) fn numeric(s: &str) -> f64 {
    let s = s.trim();
    if !s.contains('_') {
        return s.parse().unwrap_or(0.0);
    }
    let bytes = s.as_bytes();
    let grouped = bytes.iter().enumerate().all(|(i, &b)| {
        b != b'_'
            || (i > 0
                && bytes[i - 1].is_ascii_digit()
                && bytes.get(i + 1).is_some_and(u8::is_ascii_digit))
    });
    if grouped {
        s.replace('_', "").parse().unwrap_or(0.0)
    } else {
        0.0
    }
}

pub(crate) fn test_condition<'c, T: TagSource + ?Sized>(
    condition: &'c Condition,
    tags: &T,
) -> Outcome<'c> {
    match condition {
        // An empty class name selects nothing and counts as a failure.
        Condition::Class { class, .. } if class.is_empty() => Outcome::Fail,
        Condition::Class { class, .. } => Outcome::Class(class.as_str()),
        Condition::Eq { key, value } => tags.tag(key).is_some_and(|v| v == value).into(),
        Condition::Ne { key, value } => (tags.tag(key).unwrap_or("") != value).into(),
        Condition::Regex { key, regex, .. } => tags.tag(key).is_some_and(|v| regex.is_match(v)).into(),
        Condition::True { key } => (tags.tag(key) == Some("yes")).into(),
        Condition::Untrue { key } => (tags.tag(key) == Some("no")).into(),
        Condition::Set { key } => tags.tag(key).is_some_and(|v| !v.is_empty()).into(),
        Condition::Unset { key } => tags.tag(key).map_or(true, str::is_empty).into(),
        Condition::Compare {
            key, op, threshold, ..
        } => tags
            .tag(key)
            .is_some_and(|v| op.apply(numeric(v), *threshold))
            .into(),
        Condition::Unknown { .. } => Outcome::Fail,
    }
}

pub(crate) fn test_rule<'r, T: TagSource + ?Sized>(
    rule: &'r Rule,
    obj: &str,
    tags: &T,
    zoom: u8,
) -> Verdict<'r> {
    if zoom < rule.min_zoom || zoom > rule.max_zoom {
        return Verdict::NoMatch;
    }

    if !rule.subject.accepts(obj) {
        return Verdict::NoMatch;
    }

    let mut class = None;
    for condition in &rule.conditions {
        match condition.test(tags) {
            Outcome::Fail => return Verdict::NoMatch,
            Outcome::Pass => {}
            Outcome::Class(name) => class = Some(name),
        }
    }

    Verdict::Matched(class)
}
