//! Error types for host integration.

use jstag::{FilterError, FilterKind};
use thiserror::Error;

/// Errors that can occur while rendering through a registry or host template.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The filter name is not a built-in filter.
    #[error(transparent)]
    Filter(#[from] FilterError),

    /// The filter is known but was removed from the registry.
    #[error("filter '{0}' is not registered")]
    NotRegistered(FilterKind),

    /// Configuration text could not be read.
    #[error("invalid render configuration: {0}")]
    Config(#[from] serde_yaml::Error),

    /// An evaluation context could not be parsed.
    #[error("invalid evaluation context: {0}")]
    Context(#[from] serde_json::Error),

    /// Template compilation or rendering failed.
    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),
}

/// Result type for render operations.
pub type Result<T> = std::result::Result<T, RenderError>;

impl From<RenderError> for minijinja::Error {
    fn from(err: RenderError) -> Self {
        match err {
            RenderError::Template(err) => err,
            other => minijinja::Error::new(minijinja::ErrorKind::InvalidOperation, other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RenderError::NotRegistered(FilterKind::Each);
        assert_eq!(err.to_string(), "filter 'each' is not registered");
    }

    #[test]
    fn test_filter_error_is_transparent() {
        let err: RenderError = FilterError::UnknownFilter("loop".into()).into();
        assert!(err.to_string().starts_with("unknown filter 'loop'"));
    }

    #[test]
    fn test_into_minijinja_error() {
        let err: minijinja::Error = RenderError::NotRegistered(FilterKind::Js).into();
        assert_eq!(err.kind(), minijinja::ErrorKind::InvalidOperation);
    }
}
