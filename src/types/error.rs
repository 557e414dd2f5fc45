use thiserror::Error;

/// Errors raised while building conditions and rules.
///
/// Evaluation itself never fails; these only surface when a builder hands
/// the crate something structurally unusable.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("condition '{kind}' expects {expected} parameter(s), got {found}")]
    Arity {
        kind: String,
        expected: usize,
        found: usize,
    },

    #[error("invalid pattern '{pattern}' for tag '{key}'")]
    InvalidPattern {
        key: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("unknown subject '{subject}'")]
    UnknownSubject { subject: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arity_message() {
        let err = BuildError::Arity {
            kind: "eq".into(),
            expected: 2,
            found: 1,
        };
        assert_eq!(
            err.to_string(),
            "condition 'eq' expects 2 parameter(s), got 1"
        );
    }

    #[test]
    fn invalid_pattern_message_and_source() {
        let source = regex::Regex::new("(").unwrap_err();
        let err = BuildError::InvalidPattern {
            key: "name".into(),
            pattern: "(".into(),
            source,
        };
        assert_eq!(err.to_string(), "invalid pattern '(' for tag 'name'");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn unknown_subject_message() {
        let err = BuildError::UnknownSubject {
            subject: "relation".into(),
        };
        assert_eq!(err.to_string(), "unknown subject 'relation'");
    }
}
