//! Markup helpers producing JavaScript string expressions.
//!
//! Inside a JST echo tag, markup is built by string concatenation:
//!
//! ```text
//! <%= "<a href='" + model.url() + "'  class='nav' >" + model.get('title') + "</a>" %>
//! ```
//!
//! These helpers generate such expressions. Quoted parts are literal markup;
//! unquoted parts are passed through as JavaScript.

use std::borrow::Cow;

use jstag::{safe_evaluate, Evaluate};

/// Renders attributes as ` key='value'` pairs, in order.
pub fn options_for<K, V>(options: &[(K, V)]) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    options
        .iter()
        .map(|(key, value)| format!(" {}='{}'", key.as_ref(), value.as_ref()))
        .collect()
}

/// A fragment URL (`#top`) becomes a quoted literal; anything else is a
/// JavaScript expression and is left as-is.
pub fn get_url(url: &str) -> Cow<'_, str> {
    if url.starts_with('#') {
        Cow::Owned(format!("\"{}\"", url))
    } else {
        Cow::Borrowed(url)
    }
}

/// A self-closing element: `"<name OPTIONS />"`.
pub fn tag<K, V>(name: &str, options: &[(K, V)]) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    format!("\"<{} {} />\"", name, options_for(options))
}

/// An `img` element whose `src` is the JavaScript expression `source`.
///
/// An existing `src` option is replaced in place; otherwise `src` is added
/// last.
pub fn image_tag<K, V>(source: &str, options: &[(K, V)]) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let src = format!("\" + {} + \"", source);
    let mut attrs: Vec<(&str, &str)> = options
        .iter()
        .map(|(key, value)| (key.as_ref(), value.as_ref()))
        .collect();

    match attrs.iter_mut().find(|(key, _)| *key == "src") {
        Some(entry) => entry.1 = src.as_str(),
        None => attrs.push(("src", src.as_str())),
    }

    tag("img", &attrs)
}

/// An anchor linking to `url` with `text` as its content.
///
/// `text` is pre-resolved through `evaluator` when one is given, keeping the
/// source text if evaluation fails.
pub fn link_to<K, V>(
    text: &str,
    url: &str,
    options: &[(K, V)],
    evaluator: Option<&dyn Evaluate>,
) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let text = match evaluator {
        Some(evaluator) => safe_evaluate(text, evaluator),
        None => Cow::Borrowed(text),
    };

    format!(
        "\"<a href='\" + {} + \"' {} >\" + {} + \"</a>\"",
        get_url(url),
        options_for(options),
        text
    )
}
