//! Error types for the jstag crate.

use thiserror::Error;

/// Errors raised while dispatching a filter invocation.
///
/// Recognition itself never fails: text that matches no construct is passed
/// through. The only rejected input is a filter name the translator does not
/// know.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    /// The filter name is not one of the built-in filters.
    #[error("unknown filter '{0}' (expected one of: each, endeach, if, elseif, else, end, js)")]
    UnknownFilter(String),
}

/// Result type for jstag operations.
pub type Result<T> = std::result::Result<T, FilterError>;

/// Failure to pre-resolve an expression fragment.
///
/// Returned by [`Evaluate`](crate::Evaluate) implementations and folded back
/// into the source text by [`safe_evaluate`](crate::safe_evaluate).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// The fragment could not be parsed or evaluated.
    #[error("cannot evaluate '{code}': {message}")]
    Failed { code: String, message: String },

    /// The fragment evaluated to an undefined value.
    #[error("'{0}' evaluated to an undefined value")]
    Undefined(String),
}

impl EvalError {
    /// Builds a [`EvalError::Failed`] from any displayable cause.
    pub fn failed(code: impl Into<String>, cause: impl std::fmt::Display) -> Self {
        Self::Failed {
            code: code.into(),
            message: cause.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_filter_lists_known_names() {
        let err = FilterError::UnknownFilter("loop".to_string());
        let msg = err.to_string();
        assert!(msg.contains("'loop'"));
        assert!(msg.contains("endeach"));
    }

    #[test]
    fn failed_keeps_code_and_cause() {
        let err = EvalError::failed("a.b(", "unexpected end of input");
        assert_eq!(
            err.to_string(),
            "cannot evaluate 'a.b(': unexpected end of input"
        );
    }
}
