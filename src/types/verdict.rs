use std::fmt;

/// Class reported by a matching rule that selected no named class.
pub const DEFAULT_CLASS: &str = "::default";

/// Result of testing a single [`Condition`](super::Condition).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum Outcome<'a> {
    Fail,
    Pass,
    /// Passed, and selects the named style class.
    Class(&'a str),
}

impl Outcome<'_> {
    #[must_use]
    pub fn is_pass(&self) -> bool {
        !matches!(self, Outcome::Fail)
    }
}

impl From<bool> for Outcome<'_> {
    fn from(passed: bool) -> Self {
        if passed {
            Outcome::Pass
        } else {
            Outcome::Fail
        }
    }
}

/// Result of testing a [`Rule`](super::Rule) against a feature.
///
/// `Matched(None)` means the rule applies with default styling; callers must
/// not collapse it into a plain boolean.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum Verdict<'a> {
    NoMatch,
    Matched(Option<&'a str>),
}

impl<'a> Verdict<'a> {
    #[must_use]
    pub fn is_match(&self) -> bool {
        matches!(self, Verdict::Matched(_))
    }

    /// The selected class, with [`DEFAULT_CLASS`] standing in for "no class".
    #[must_use]
    pub fn class(&self) -> Option<&'a str> {
        match self {
            Verdict::NoMatch => None,
            Verdict::Matched(class) => Some(class.unwrap_or(DEFAULT_CLASS)),
        }
    }
}

impl fmt::Display for Verdict<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::NoMatch => write!(f, "no match"),
            Verdict::Matched(None) => write!(f, "{DEFAULT_CLASS}"),
            Verdict::Matched(Some(class)) => write!(f, "::{class}"),
        }
    }
}
