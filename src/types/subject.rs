use std::fmt;
use std::str::FromStr;

use super::error::BuildError;

/// The geometry kind a rule selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Subject {
    /// Any geometry (`*` or empty in a selector).
    #[default]
    Any,
    Node,
    Way,
    Line,
    Area,
}

impl Subject {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Subject::Any => "",
            Subject::Node => "node",
            Subject::Way => "way",
            Subject::Line => "line",
            Subject::Area => "area",
        }
    }

    /// Feature kinds this subject is compatible with.
    #[must_use]
    pub fn compatible_types(self) -> &'static [&'static str] {
        match self {
            Subject::Any => &["area", "line", "way", "node"],
            Subject::Area => &["area", "way"],
            Subject::Node => &["node"],
            Subject::Way => &["line", "area", "way"],
            Subject::Line => &["line", "area"],
        }
    }

    /// Whether a feature of kind `obj` passes this subject's type gate.
    ///
    /// `Any` imposes no gate at all, so it accepts kinds outside the table too.
    #[must_use]
    pub fn accepts(self, obj: &str) -> bool {
        self == Subject::Any || self.as_str() == obj || self.compatible_types().contains(&obj)
    }
}

impl FromStr for Subject {
    type Err = BuildError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "*" => Ok(Subject::Any),
            "node" => Ok(Subject::Node),
            "way" => Ok(Subject::Way),
            "line" => Ok(Subject::Line),
            "area" => Ok(Subject::Area),
            other => Err(BuildError::UnknownSubject {
                subject: other.to_owned(),
            }),
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Subject::Any => f.write_str("*"),
            other => f.write_str(other.as_str()),
        }
    }
}
