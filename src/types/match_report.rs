use std::fmt;
use std::time::Duration;

use super::index::RuleMatch;

/// Detailed result of
/// [`RuleIndex::matching_detailed()`](super::index::RuleIndex::matching_detailed).
#[derive(Debug, Clone)]
#[must_use]
pub struct MatchReport<'a> {
    matches: Vec<RuleMatch<'a>>,
    candidates: usize,
    total: usize,
    duration: Duration,
}

impl<'a> MatchReport<'a> {
    pub(crate) fn new(
        matches: Vec<RuleMatch<'a>>,
        candidates: usize,
        total: usize,
        duration: Duration,
    ) -> Self {
        Self {
            matches,
            candidates,
            total,
            duration,
        }
    }

    /// Matching rules, same as [`RuleIndex::matching()`](super::index::RuleIndex::matching).
    #[must_use]
    pub fn matches(&self) -> &[RuleMatch<'a>] {
        &self.matches
    }

    /// How many rules survived the key and type pre-filter and were tested.
    #[must_use]
    pub fn candidates(&self) -> usize {
        self.candidates
    }

    /// How many rules the index holds.
    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }
}

impl fmt::Display for MatchReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let matches: Vec<String> = self.matches.iter().map(ToString::to_string).collect();
        write!(f, "matched: [{}]", matches.join(", "))?;
        write!(f, ", tested: {}/{}", self.candidates, self.total)?;
        write!(f, ", duration: {:?}", self.duration)?;
        Ok(())
    }
}
