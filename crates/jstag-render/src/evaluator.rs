//! MiniJinja-backed expression evaluator.

use jstag::{EvalError, Evaluate};
use minijinja::value::ValueKind;
use minijinja::{context, Environment, UndefinedBehavior, Value};
use serde::Serialize;

/// Evaluates fragments as MiniJinja expressions against a fixed context.
///
/// Undefined names are errors, so a fragment that refers to client-side data
/// (`model.get('x')`) fails and keeps its source text under
/// [`safe_evaluate`](jstag::safe_evaluate). Only strings and numbers count as
/// results. Any other kind (booleans, functions, lists, maps) has no faithful
/// JavaScript spelling and is reported as a failure.
///
/// ```rust
/// use jstag::Evaluate;
/// use jstag_render::MiniJinjaEvaluator;
///
/// let evaluator = MiniJinjaEvaluator::new().with_context(serde_json::json!({ "site": "Docs" }));
/// assert_eq!(evaluator.evaluate("site ~ ' home'").unwrap(), "Docs home");
/// assert!(evaluator.evaluate("model.get('x')").is_err());
/// assert!(evaluator.evaluate("true").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct MiniJinjaEvaluator {
    context: Value,
}

impl Default for MiniJinjaEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl MiniJinjaEvaluator {
    /// Creates an evaluator with an empty context.
    pub fn new() -> Self {
        Self { context: context! {} }
    }

    /// Creates an evaluator whose context is a JSON document.
    pub fn from_json(text: &str) -> crate::Result<Self> {
        let context: serde_json::Value = serde_json::from_str(text)?;
        Ok(Self::new().with_context(context))
    }

    /// Replaces the evaluation context.
    pub fn with_context<S: Serialize>(mut self, context: S) -> Self {
        self.context = Value::from_serialize(&context);
        self
    }
}

impl Evaluate for MiniJinjaEvaluator {
    fn evaluate(&self, code: &str) -> Result<String, EvalError> {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);

        let expr = env
            .compile_expression(code)
            .map_err(|err| EvalError::failed(code, err))?;
        let value = expr
            .eval(&self.context)
            .map_err(|err| EvalError::failed(code, err))?;

        match value.kind() {
            ValueKind::String | ValueKind::Number => Ok(value.to_string()),
            ValueKind::Undefined | ValueKind::None => Err(EvalError::Undefined(code.to_string())),
            kind => Err(EvalError::failed(
                code,
                format_args!("{:?} result has no script literal", kind),
            )),
        }
    }
}
