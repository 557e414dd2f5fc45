use std::collections::BTreeSet;
use std::fmt;

use super::condition::{Condition, WILDCARD};
use super::error::BuildError;
use super::subject::Subject;
use super::tags::TagSource;
use super::verdict::Verdict;

pub const DEFAULT_MIN_ZOOM: u8 = 0;
pub const DEFAULT_MAX_ZOOM: u8 = 19;

/// One stylesheet selector: a geometry filter, an inclusive zoom range and a
/// conjunction of [`Condition`]s.
///
/// A stylesheet parser fills in the public fields directly; no validation is
/// done on them. Once built, a rule is only read, so it can be shared freely
/// between threads.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub subject: Subject,
    /// Inclusive zoom bounds. Map zoom levels are small non-negative
    /// integers, so callers holding wider integers narrow them first.
    pub min_zoom: u8,
    pub max_zoom: u8,
    pub conditions: Vec<Condition>,
}

impl Default for Rule {
    fn default() -> Self {
        Self::for_subject(Subject::Any)
    }
}

impl Rule {
    /// Create a rule from a selector subject string (`""`, `"*"`, `"node"`,
    /// `"way"`, `"line"` or `"area"`).
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::UnknownSubject`] for any other subject.
    pub fn new(subject: &str) -> Result<Self, BuildError> {
        Ok(Self::for_subject(subject.parse()?))
    }

    #[must_use]
    pub fn for_subject(subject: Subject) -> Self {
        Self {
            subject,
            min_zoom: DEFAULT_MIN_ZOOM,
            max_zoom: DEFAULT_MAX_ZOOM,
            conditions: Vec::new(),
        }
    }

    /// Restrict the rule to zoom levels `min..=max`.
    #[must_use]
    pub fn zoom(mut self, min: u8, max: u8) -> Self {
        self.min_zoom = min;
        self.max_zoom = max;
        self
    }

    /// Append a condition. Conditions are tested in the order they are added.
    #[must_use]
    pub fn when(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    /// Test a feature of kind `obj` with `tags` at `zoom`.
    ///
    /// Returns [`Verdict::NoMatch`], or [`Verdict::Matched`] carrying the class
    /// selected by the last class-yielding condition, if any.
    pub fn test<T: TagSource + ?Sized>(&self, obj: &str, tags: &T, zoom: u8) -> Verdict<'_> {
        crate::evaluate::test_rule(self, obj, tags, zoom)
    }

    /// Feature kinds this rule can apply to, for pre-filtering without
    /// calling [`test`](Self::test).
    #[must_use]
    pub fn compatible_types(&self) -> &'static [&'static str] {
        self.subject.compatible_types()
    }

    /// Tag keys referenced by this rule's conditions.
    ///
    /// Collapses to `{"*"}` as soon as any condition depends on an unknown key.
    #[must_use]
    pub fn extract_tags(&self) -> BTreeSet<&str> {
        let mut keys = BTreeSet::new();
        for condition in &self.conditions {
            let key = condition.extract_tag();
            if key == WILDCARD {
                return BTreeSet::from([WILDCARD]);
            }
            keys.insert(key);
        }
        keys
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|z{}-{} [", self.subject, self.min_zoom, self.max_zoom)?;
        for (i, condition) in self.conditions.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{condition}")?;
        }
        f.write_str("]")
    }
}
