//! MiniJinja filter and function registration.
//!
//! Every filter in a [`FilterRegistry`] is bound under its prefixed name
//! (`jst_js`, `jst_if`, ...). The piped value is the filter's raw text block;
//! an optional argument is passed as the filter argument:
//!
//! ```jinja
//! {% filter jst_js %}
//!   = model.get('title')
//!   if model.get('done')
//!   end
//! {% endfilter %}
//!
//! {{ "x > 0" | jst_if }} ... {{ none | jst_end }}
//! {{ none | jst_end("each") }}
//! ```
//!
//! Output is marked safe, so auto-escaping never touches the tags.
//!
//! The markup helpers are bound as global functions:
//!
//! - `jst_link_to(text, url, options=none)`
//! - `jst_image_tag(source, options=none)`
//! - `jst_tag(name, options=none)`

use std::sync::Arc;

use jstag::{FilterInvocation, FilterKind};
use log::debug;
use minijinja::value::ValueKind;
use minijinja::{Environment, Error, ErrorKind, Value};
use serde::Serialize;

use crate::config::RenderConfig;
use crate::helpers;
use crate::registry::FilterRegistry;

/// Registers every filter of `registry` and the markup helpers on `env`.
///
/// `config` supplies the name prefix and body splitting. Expression
/// pre-resolution belongs to the registry: its `js` entry decides, and
/// `config.compile_text` is only read by [`FilterRegistry::from_config`]
/// (and so by [`environment`]).
///
/// # Example
///
/// ```rust
/// use jstag_render::{register_filters, FilterRegistry, RenderConfig};
/// use minijinja::Environment;
///
/// let mut env = Environment::new();
/// register_filters(&mut env, &FilterRegistry::standard(), &RenderConfig::default());
///
/// let out = env.render_str("{{ 'tabs tab' | jst_each }}", ()).unwrap();
/// assert_eq!(out, "<% tabs.each(function(tab) { %>");
/// ```
pub fn register_filters(
    env: &mut Environment<'static>,
    registry: &FilterRegistry,
    config: &RenderConfig,
) {
    if config.compile_text && registry.evaluator().is_none() {
        debug!("compile_text is set but the registry has no evaluator; expressions pass through");
    }

    let shared = Arc::new(registry.clone());
    for kind in registry.kinds() {
        let filters = Arc::clone(&shared);
        let config = config.clone();

        env.add_filter(
            config.qualified(kind.name()),
            move |value: Value, argument: Option<String>| -> Result<Value, Error> {
                let invocation = invocation_for(kind, &value, argument, &config);
                Ok(Value::from_safe_string(filters.translate(&invocation)?))
            },
        );
    }

    register_helpers(env, registry, config);
}

/// Creates an environment with filters bound per `config`.
pub fn environment(config: &RenderConfig) -> Environment<'static> {
    let mut env = Environment::new();
    register_filters(&mut env, &FilterRegistry::from_config(config), config);
    env
}

/// Renders a one-off template through [`environment`].
///
/// ```rust
/// use jstag_render::{render_template, RenderConfig};
///
/// let out = render_template(&RenderConfig::default(), "{{ 'x' | jst_if }}", ()).unwrap();
/// assert_eq!(out, "<% if(x) { %>");
/// ```
pub fn render_template<S: Serialize>(
    config: &RenderConfig,
    source: &str,
    context: S,
) -> crate::Result<String> {
    Ok(environment(config).render_str(source, context)?)
}

/// Builds the invocation for a piped value.
fn invocation_for(
    kind: FilterKind,
    value: &Value,
    argument: Option<String>,
    config: &RenderConfig,
) -> FilterInvocation {
    let body = if value.is_undefined() || value.is_none() {
        Vec::new()
    } else {
        match value.as_str() {
            Some(text) => config.split_body(text),
            None => config.split_body(&value.to_string()),
        }
    };

    let invocation = FilterInvocation::new(kind).with_body(body);
    match argument {
        Some(argument) => invocation.with_argument(argument),
        None => invocation,
    }
}

fn register_helpers(env: &mut Environment<'static>, registry: &FilterRegistry, config: &RenderConfig) {
    let evaluator = registry.shared_evaluator();

    env.add_function(
        config.qualified("link_to"),
        move |text: String, url: String, options: Option<Value>| -> Result<Value, Error> {
            let options = option_pairs(options.as_ref())?;
            let evaluator = evaluator.as_deref();
            Ok(Value::from_safe_string(helpers::link_to(
                &text, &url, &options, evaluator,
            )))
        },
    );

    env.add_function(
        config.qualified("image_tag"),
        |source: String, options: Option<Value>| -> Result<Value, Error> {
            let options = option_pairs(options.as_ref())?;
            Ok(Value::from_safe_string(helpers::image_tag(&source, &options)))
        },
    );

    env.add_function(
        config.qualified("tag"),
        |name: String, options: Option<Value>| -> Result<Value, Error> {
            let options = option_pairs(options.as_ref())?;
            Ok(Value::from_safe_string(helpers::tag(&name, &options)))
        },
    );
}

/// Reads a map value into ordered `(key, value)` pairs.
fn option_pairs(options: Option<&Value>) -> Result<Vec<(String, String)>, Error> {
    let Some(options) = options.filter(|v| !v.is_none() && !v.is_undefined()) else {
        return Ok(Vec::new());
    };

    if options.kind() != ValueKind::Map {
        return Err(Error::new(
            ErrorKind::InvalidOperation,
            "options must be a map of attribute names to values",
        ));
    }

    options
        .try_iter()?
        .map(|key| {
            let value = options.get_item(&key)?;
            Ok((key.to_string(), value.to_string()))
        })
        .collect()
}
