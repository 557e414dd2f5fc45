mod condition;
mod error;
mod index;
mod match_report;
mod rule;
mod subject;
mod tags;
mod verdict;

pub use condition::{class, tag, CompareOp, Condition, Params, TagExpr, CLASS_PREFIX, WILDCARD};
pub use error::BuildError;
pub use index::{RuleIndex, RuleMatch};
pub use match_report::MatchReport;
pub use rule::{Rule, DEFAULT_MAX_ZOOM, DEFAULT_MIN_ZOOM};
pub use subject::Subject;
pub use tags::{TagSource, Tags};
pub use verdict::{Outcome, Verdict, DEFAULT_CLASS};
