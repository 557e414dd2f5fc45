//! Selector matching for MapCSS-style cartographic stylesheets.
//!
//! A [`Rule`] pairs a geometry [`Subject`] and a zoom range with an ordered
//! list of [`Condition`]s over a feature's tags. Testing a rule yields a
//! [`Verdict`]: no match, or a match carrying the style class it selects.
//! [`RuleIndex`] keeps a whole stylesheet's rules and skips the ones that
//! cannot apply to a feature.

mod compile;
mod evaluate;
mod types;

pub use types::{
    class, tag, BuildError, CompareOp, Condition, MatchReport, Outcome, Params, Rule, RuleIndex,
    RuleMatch, Subject, TagExpr, TagSource, Tags, Verdict, CLASS_PREFIX, DEFAULT_CLASS,
    DEFAULT_MAX_ZOOM, DEFAULT_MIN_ZOOM, WILDCARD,
};
