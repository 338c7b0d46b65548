//! Best-effort pre-resolution of expression fragments.
//!
//! Some hosts want `= ...` fragments resolved before the tag is emitted (a
//! constant title, a translated string). The [`Evaluate`] trait is the seam
//! for that; [`safe_evaluate`] is the only place its result is consumed, and
//! it always yields text: the evaluated value, or the source fragment when
//! evaluation fails.

use std::borrow::Cow;

use log::debug;

use crate::error::EvalError;

/// Resolves an expression fragment to text.
pub trait Evaluate: Send + Sync {
    /// Evaluates `code`, returning its textual value.
    fn evaluate(&self, code: &str) -> Result<String, EvalError>;
}

impl<F> Evaluate for F
where
    F: Fn(&str) -> Result<String, EvalError> + Send + Sync,
{
    fn evaluate(&self, code: &str) -> Result<String, EvalError> {
        self(code)
    }
}

/// Evaluates `code`, keeping it verbatim when evaluation fails.
///
/// # Example
///
/// ```rust
/// use jstag::{safe_evaluate, EvalError};
///
/// let upper = |code: &str| -> Result<String, EvalError> {
///     if code.starts_with('"') {
///         Ok(code.trim_matches('"').to_uppercase())
///     } else {
///         Err(EvalError::Undefined(code.to_string()))
///     }
/// };
///
/// assert_eq!(safe_evaluate("\"hi\"", &upper), "HI");
/// assert_eq!(safe_evaluate("model.get('x')", &upper), "model.get('x')");
/// ```
pub fn safe_evaluate<'a>(code: &'a str, evaluator: &dyn Evaluate) -> Cow<'a, str> {
    match evaluator.evaluate(code) {
        Ok(value) => Cow::Owned(value),
        Err(err) => {
            debug!("keeping source text: {}", err);
            Cow::Borrowed(code)
        }
    }
}
