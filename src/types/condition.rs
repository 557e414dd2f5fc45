use std::fmt;

use regex::{Regex, RegexBuilder};

use super::error::BuildError;
use super::tags::TagSource;
use super::verdict::Outcome;

/// Keys starting with this prefix name a style class rather than a tag.
pub const CLASS_PREFIX: &str = "::";

/// Tag key reported by conditions whose dependencies are unknown.
pub const WILDCARD: &str = "*";

/// Numeric comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Lt,
    Lte,
    Gt,
    Gte,
}

impl CompareOp {
    fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "<" => Some(CompareOp::Lt),
            "<=" => Some(CompareOp::Lte),
            ">" => Some(CompareOp::Gt),
            ">=" => Some(CompareOp::Gte),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            CompareOp::Lt => "<",
            CompareOp::Lte => "<=",
            CompareOp::Gt => ">",
            CompareOp::Gte => ">=",
        }
    }

    pub(crate) fn apply(self, lhs: f64, rhs: f64) -> bool {
        match self {
            CompareOp::Lt => lhs < rhs,
            CompareOp::Lte => lhs <= rhs,
            CompareOp::Gt => lhs > rhs,
            CompareOp::Gte => lhs >= rhs,
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Positional condition parameters as handed over by a stylesheet parser.
///
/// A lone string becomes a one-element list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(Vec<String>);

impl From<&str> for Params {
    fn from(v: &str) -> Self {
        Params(vec![v.to_owned()])
    }
}

impl From<String> for Params {
    fn from(v: String) -> Self {
        Params(vec![v])
    }
}

impl From<Vec<String>> for Params {
    fn from(v: Vec<String>) -> Self {
        Params(v)
    }
}

impl From<Vec<&str>> for Params {
    fn from(v: Vec<&str>) -> Self {
        Params(v.into_iter().map(str::to_owned).collect())
    }
}

impl From<&[&str]> for Params {
    fn from(v: &[&str]) -> Self {
        Params(v.iter().map(|s| (*s).to_owned()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Params {
    fn from(v: [&str; N]) -> Self {
        Params(v.iter().map(|s| (*s).to_owned()).collect())
    }
}

/// A single predicate over a feature's tags.
///
/// Conditions are immutable once built and safe to share across threads.
/// Equality compares only the kind and the original parameters; the compiled
/// pattern and cached numeric threshold are derived from them.
#[derive(Debug, Clone)]
pub enum Condition {
    /// `::class`: always passes and selects `class`.
    Class { key: String, class: String },
    /// `key=value`
    Eq { key: String, value: String },
    /// `key!=value`; a missing key reads as the empty string.
    Ne { key: String, value: String },
    /// `key=~/pattern/`, case-insensitive, anchored at the start of the value.
    #[non_exhaustive]
    Regex {
        key: String,
        pattern: String,
        regex: Regex,
    },
    /// `key?`: value is `yes`.
    True { key: String },
    /// `!key?`: value is `no`.
    Untrue { key: String },
    /// `key`: present and non-empty.
    Set { key: String },
    /// `!key`: absent or empty.
    Unset { key: String },
    /// `key<value` and friends; both sides coerce to numbers.
    #[non_exhaustive]
    Compare {
        key: String,
        op: CompareOp,
        value: String,
        threshold: f64,
    },
    /// A kind this crate does not know. Never matches.
    Unknown { kind: String, params: Vec<String> },
}

impl Condition {
    /// Build a condition from its parser-level kind string and parameters.
    ///
    /// Unrecognized kinds produce [`Condition::Unknown`], which never matches.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::Arity`] when the parameter count does not fit the
    /// kind, and [`BuildError::InvalidPattern`] when a `regex` pattern fails to
    /// compile.
    pub fn new(kind: &str, params: impl Into<Params>) -> Result<Self, BuildError> {
        let Params(params) = params.into();
        let condition = match kind {
            "eq" => {
                let [key, value] = take::<2>(kind, params)?;
                Self::equals(key, value)
            }
            "ne" => {
                let [key, value] = take::<2>(kind, params)?;
                Condition::Ne { key, value }
            }
            "regex" => {
                let [key, pattern] = take::<2>(kind, params)?;
                Self::regex(key, pattern)?
            }
            "true" => {
                let [key] = take::<1>(kind, params)?;
                Condition::True { key }
            }
            "untrue" => {
                let [key] = take::<1>(kind, params)?;
                Condition::Untrue { key }
            }
            "set" => {
                let [key] = take::<1>(kind, params)?;
                Condition::Set { key }
            }
            "unset" => {
                let [key] = take::<1>(kind, params)?;
                Condition::Unset { key }
            }
            other => match CompareOp::from_symbol(other) {
                Some(op) => {
                    let [key, value] = take::<2>(kind, params)?;
                    Self::compare(key, op, value)
                }
                None => {
                    tracing::warn!(kind = other, "unrecognized condition kind, it will never match");
                    Condition::Unknown {
                        kind: other.to_owned(),
                        params,
                    }
                }
            },
        };
        Ok(condition)
    }

    fn equals(key: String, value: String) -> Self {
        if key.starts_with(CLASS_PREFIX) {
            Condition::Class { key, class: value }
        } else {
            Condition::Eq { key, value }
        }
    }

    fn regex(key: String, pattern: String) -> Result<Self, BuildError> {
        // The bare pattern must compile on its own, or a stray `)` could close
        // the anchoring group early.
        let anchored = Regex::new(&pattern).and_then(|_| {
            RegexBuilder::new(&format!("^(?:{pattern})"))
                .case_insensitive(true)
                .build()
        });
        match anchored {
            Ok(regex) => Ok(Condition::Regex {
                key,
                pattern,
                regex,
            }),
            Err(source) => Err(BuildError::InvalidPattern {
                key,
                pattern,
                source,
            }),
        }
    }

    fn compare(key: String, op: CompareOp, value: String) -> Self {
        let threshold = crate::evaluate::numeric(&value);
        Condition::Compare {
            key,
            op,
            value,
            threshold,
        }
    }

    /// The parser-level kind string (`"eq"`, `"regex"`, `"<="`, ...).
    #[must_use]
    pub fn kind(&self) -> &str {
        match self {
            Condition::Class { .. } | Condition::Eq { .. } => "eq",
            Condition::Ne { .. } => "ne",
            Condition::Regex { .. } => "regex",
            Condition::True { .. } => "true",
            Condition::Untrue { .. } => "untrue",
            Condition::Set { .. } => "set",
            Condition::Unset { .. } => "unset",
            Condition::Compare { op, .. } => op.as_str(),
            Condition::Unknown { kind, .. } => kind.as_str(),
        }
    }

    /// The parameters this condition was built from, in order.
    #[must_use]
    pub fn params(&self) -> Vec<&str> {
        match self {
            Condition::Class { key, class } => vec![key.as_str(), class.as_str()],
            Condition::Eq { key, value }
            | Condition::Ne { key, value }
            | Condition::Compare { key, value, .. } => vec![key.as_str(), value.as_str()],
            Condition::Regex { key, pattern, .. } => vec![key.as_str(), pattern.as_str()],
            Condition::True { key }
            | Condition::Untrue { key }
            | Condition::Set { key }
            | Condition::Unset { key } => vec![key.as_str()],
            Condition::Unknown { params, .. } => params.iter().map(String::as_str).collect(),
        }
    }

    /// The first parameter, which names the tag (or class key) for every known kind.
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        match self {
            Condition::Class { key, .. }
            | Condition::Eq { key, .. }
            | Condition::Ne { key, .. }
            | Condition::Regex { key, .. }
            | Condition::True { key }
            | Condition::Untrue { key }
            | Condition::Set { key }
            | Condition::Unset { key }
            | Condition::Compare { key, .. } => Some(key.as_str()),
            Condition::Unknown { params, .. } => params.first().map(String::as_str),
        }
    }

    /// The tag key this condition depends on, or [`WILDCARD`] when it cannot be
    /// pinned to one key (class references and regex conditions).
    #[must_use]
    pub fn extract_tag(&self) -> &str {
        match (self, self.key()) {
            (Condition::Regex { .. }, _) | (_, None) => WILDCARD,
            (_, Some(key)) if key.starts_with(CLASS_PREFIX) => WILDCARD,
            (_, Some(key)) => key,
        }
    }

    /// Whether this condition can only pass when its key is present in the tags.
    #[must_use]
    pub fn requires_tag(&self) -> bool {
        match self {
            Condition::Eq { .. }
            | Condition::Regex { .. }
            | Condition::True { .. }
            | Condition::Untrue { .. }
            | Condition::Set { .. }
            | Condition::Compare { .. } => true,
            Condition::Class { .. }
            | Condition::Ne { .. }
            | Condition::Unset { .. }
            | Condition::Unknown { .. } => false,
        }
    }

    /// Test this condition against a tag dictionary.
    ///
    /// A missing key never raises; it simply fails the condition (except for
    /// kinds that define a meaning for absence).
    pub fn test<'c, T: TagSource + ?Sized>(&'c self, tags: &T) -> Outcome<'c> {
        crate::evaluate::test_condition(self, tags)
    }
}

fn take<const N: usize>(kind: &str, params: Vec<String>) -> Result<[String; N], BuildError> {
    let found = params.len();
    <[String; N]>::try_from(params).map_err(|_| BuildError::Arity {
        kind: kind.to_owned(),
        expected: N,
        found,
    })
}

impl PartialEq for Condition {
    fn eq(&self, other: &Self) -> bool {
        self.kind() == other.kind() && self.params() == other.params()
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::Class { class, .. } => write!(f, "::{class}"),
            Condition::Eq { key, value } => write!(f, "{key}={value}"),
            Condition::Ne { key, value } => write!(f, "{key}!={value}"),
            Condition::Regex { key, pattern, .. } => write!(f, "{key}=~/{pattern}/"),
            Condition::True { key } => write!(f, "{key}?"),
            Condition::Untrue { key } => write!(f, "!{key}?"),
            Condition::Set { key } => write!(f, "{key}"),
            Condition::Unset { key } => write!(f, "!{key}"),
            Condition::Compare { key, op, value, .. } => write!(f, "{key}{op}{value}"),
            Condition::Unknown { kind, params } => write!(f, "{kind} {params:?}"),
        }
    }
}

/// Intermediate builder for tag conditions. Created by [`tag()`].
#[derive(Debug, Clone)]
pub struct TagExpr {
    key: String,
}

impl TagExpr {
    /// `key=value`. A `::`-prefixed key yields the class form.
    #[must_use]
    pub fn eq(self, value: &str) -> Condition {
        Condition::equals(self.key, value.to_owned())
    }

    #[must_use]
    pub fn ne(self, value: &str) -> Condition {
        Condition::Ne {
            key: self.key,
            value: value.to_owned(),
        }
    }

    /// `key=~/pattern/`.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::InvalidPattern`] if the pattern does not compile.
    pub fn matches(self, pattern: &str) -> Result<Condition, BuildError> {
        Condition::regex(self.key, pattern.to_owned())
    }

    #[must_use]
    pub fn is_true(self) -> Condition {
        Condition::True { key: self.key }
    }

    #[must_use]
    pub fn is_untrue(self) -> Condition {
        Condition::Untrue { key: self.key }
    }

    #[must_use]
    pub fn set(self) -> Condition {
        Condition::Set { key: self.key }
    }

    #[must_use]
    pub fn unset(self) -> Condition {
        Condition::Unset { key: self.key }
    }

    #[must_use]
    pub fn lt(self, value: &str) -> Condition {
        Condition::compare(self.key, CompareOp::Lt, value.to_owned())
    }

    #[must_use]
    pub fn lte(self, value: &str) -> Condition {
        Condition::compare(self.key, CompareOp::Lte, value.to_owned())
    }

    #[must_use]
    pub fn gt(self, value: &str) -> Condition {
        Condition::compare(self.key, CompareOp::Gt, value.to_owned())
    }

    #[must_use]
    pub fn gte(self, value: &str) -> Condition {
        Condition::compare(self.key, CompareOp::Gte, value.to_owned())
    }
}

#[must_use]
pub fn tag(key: &str) -> TagExpr {
    TagExpr {
        key: key.to_owned(),
    }
}

/// The class form `::name`.
#[must_use]
pub fn class(name: &str) -> Condition {
    Condition::Class {
        key: "::class".to_owned(),
        class: name.to_owned(),
    }
}
