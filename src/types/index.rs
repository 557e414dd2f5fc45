use std::collections::HashMap;
use std::fmt;
use std::time::Instant;

use super::match_report::MatchReport;
use super::rule::Rule;
use super::tags::TagSource;
use super::verdict::{Verdict, DEFAULT_CLASS};

/// A rule that matched a feature, identified by its stylesheet position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleMatch<'a> {
    pub index: usize,
    pub class: Option<&'a str>,
}

impl<'a> RuleMatch<'a> {
    /// The selected class, or [`DEFAULT_CLASS`].
    #[must_use]
    pub fn class_name(&self) -> &'a str {
        self.class.unwrap_or(DEFAULT_CLASS)
    }
}

impl fmt::Display for RuleMatch<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.class {
            Some(class) => write!(f, "#{}::{class}", self.index),
            None => write!(f, "#{}{DEFAULT_CLASS}", self.index),
        }
    }
}

/// The rules of a stylesheet in order, indexed by the tag key each one
/// cannot match without.
///
/// Lookups only skip rules that could not have matched, so
/// [`matching()`](Self::matching) returns exactly what testing every rule in
/// order would. Immutable after construction; share it behind `Arc`.
///
/// # Example
///
/// ```
/// use mapcss_rules::{Rule, RuleIndex, Tags, class, tag};
///
/// let index = RuleIndex::new(vec![
///     Rule::new("way").unwrap().when(tag("highway").eq("primary")),
///     Rule::new("way").unwrap().when(tag("bridge").is_true()).when(class("casing")),
///     Rule::new("area").unwrap().when(tag("natural").eq("water")),
/// ]);
///
/// let tags = Tags::new().set("highway", "primary").set("bridge", "yes");
/// let matches = index.matching("line", &tags, 14);
/// assert_eq!(matches.len(), 2);
/// assert_eq!(matches[1].class_name(), "casing");
/// ```
#[derive(Debug, Clone)]
pub struct RuleIndex {
    pub(crate) rules: Vec<Rule>,
    pub(crate) by_key: HashMap<String, Vec<usize>>,
    /// Rules that must be tested for every feature.
    pub(crate) unkeyed: Vec<usize>,
}

impl RuleIndex {
    #[must_use]
    pub fn new(rules: Vec<Rule>) -> Self {
        crate::compile::compile(rules)
    }

    /// The indexed rules in stylesheet order.
    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Positions of rules that might match a feature of kind `obj` with
    /// `tags`, ascending. Zoom is not considered.
    #[must_use]
    pub fn candidates<T: TagSource + ?Sized>(&self, obj: &str, tags: &T) -> Vec<usize> {
        let mut out = self.unkeyed.clone();
        for key in tags.keys() {
            if let Some(bucket) = self.by_key.get(key) {
                out.extend_from_slice(bucket);
            }
        }
        out.retain(|&i| self.rules[i].subject.accepts(obj));
        out.sort_unstable();
        out.dedup();
        out
    }

    /// All rules matching the feature, in stylesheet order.
    #[must_use]
    pub fn matching<T: TagSource + ?Sized>(&self, obj: &str, tags: &T, zoom: u8) -> Vec<RuleMatch<'_>> {
        let candidates = self.candidates(obj, tags);
        let matches = self.test_candidates(&candidates, obj, tags, zoom);
        tracing::trace!(
            obj,
            zoom,
            candidates = candidates.len(),
            matched = matches.len(),
            "matched feature"
        );
        matches
    }

    /// Like [`matching()`](Self::matching), with candidate counts and timing.
    pub fn matching_detailed<T: TagSource + ?Sized>(
        &self,
        obj: &str,
        tags: &T,
        zoom: u8,
    ) -> MatchReport<'_> {
        let start = Instant::now();
        let candidates = self.candidates(obj, tags);
        let matches = self.test_candidates(&candidates, obj, tags, zoom);
        MatchReport::new(matches, candidates.len(), self.rules.len(), start.elapsed())
    }

    fn test_candidates<T: TagSource + ?Sized>(
        &self,
        candidates: &[usize],
        obj: &str,
        tags: &T,
        zoom: u8,
    ) -> Vec<RuleMatch<'_>> {
        candidates
            .iter()
            .filter_map(|&index| match self.rules[index].test(obj, tags, zoom) {
                Verdict::Matched(class) => Some(RuleMatch { index, class }),
                Verdict::NoMatch => None,
            })
            .collect()
    }
}

impl fmt::Display for RuleIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RuleIndex({} rules, {} keys, {} unkeyed)",
            self.rules.len(),
            self.by_key.len(),
            self.unkeyed.len(),
        )
    }
}
