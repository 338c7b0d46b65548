//! Filter dispatch.
//!
//! A host template marks a block with a filter name (`:js`, `:if`, ...) and
//! hands its raw text to the translator. [`FilterInvocation`] carries that
//! text; [`render`] dispatches on the [`FilterKind`] and returns the string
//! to splice into the host output.
//!
//! The multiplexed `js` filter recognizes and emits every body line. The
//! other filters are single-purpose and return exactly one tag built from the
//! whole argument (or the body, when no argument is given).

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use log::debug;
use serde_yaml::{Mapping, Value};

use crate::construct::{is_loop_hint, recognize, strip_terminator, Construct};
use crate::emit::emit;
use crate::error::FilterError;
use crate::eval::{safe_evaluate, Evaluate};

/// The built-in filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FilterKind {
    Each,
    Endeach,
    If,
    Elseif,
    Else,
    End,
    Js,
}

impl FilterKind {
    /// Every filter, in registration order.
    pub const ALL: [FilterKind; 7] = [
        FilterKind::Each,
        FilterKind::Endeach,
        FilterKind::If,
        FilterKind::Elseif,
        FilterKind::Else,
        FilterKind::End,
        FilterKind::Js,
    ];

    /// The name the filter is invoked by.
    pub fn name(self) -> &'static str {
        match self {
            FilterKind::Each => "each",
            FilterKind::Endeach => "endeach",
            FilterKind::If => "if",
            FilterKind::Elseif => "elseif",
            FilterKind::Else => "else",
            FilterKind::End => "end",
            FilterKind::Js => "js",
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FilterKind {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FilterKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| FilterError::UnknownFilter(s.to_string()))
    }
}

/// One occurrence of a filter in a host template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterInvocation {
    kind: FilterKind,
    body: Vec<String>,
    argument: Option<String>,
}

impl FilterInvocation {
    /// Creates an invocation with an empty body and no argument.
    pub fn new(kind: FilterKind) -> Self {
        Self {
            kind,
            body: Vec::new(),
            argument: None,
        }
    }

    /// Sets the body lines, in order. Indentation must already be stripped.
    pub fn with_body<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.body = lines.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the single-line argument.
    pub fn with_argument(mut self, argument: impl Into<String>) -> Self {
        self.argument = Some(argument.into());
        self
    }

    pub fn kind(&self) -> FilterKind {
        self.kind
    }

    pub fn body(&self) -> &[String] {
        &self.body
    }

    pub fn argument(&self) -> Option<&str> {
        self.argument.as_deref()
    }

    /// The argument, or the body joined with newlines when there is none.
    fn argument_text(&self) -> Cow<'_, str> {
        match &self.argument {
            Some(argument) => Cow::Borrowed(argument),
            None => Cow::Owned(self.body.join("\n")),
        }
    }

    /// The lines a multiplexed filter iterates: the body, or the argument
    /// split into lines when the body is empty.
    fn lines(&self) -> Vec<&str> {
        if self.body.is_empty() {
            self.argument.as_deref().map(|a| a.lines().collect()).unwrap_or_default()
        } else {
            self.body.iter().map(String::as_str).collect()
        }
    }

    /// Renders this invocation. See [`render`].
    pub fn render(&self) -> String {
        render(self)
    }
}

/// Options block of the standalone `each` filter.
///
/// The body is a YAML mapping:
///
/// ```yaml
/// collection: tabs
/// item: tab
/// ```
///
/// Either key may be omitted. Scalar values are used as written; a list or
/// mapping value is ignored and the default name applies. A body that is not
/// a mapping is read in the `js` line form instead (`tabs tab`, optionally
/// preceded by `each`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EachOptions {
    pub collection: Option<String>,
    pub item: Option<String>,
}

impl EachOptions {
    /// Reads options from a filter body. Never fails.
    pub fn parse(text: &str) -> Self {
        if text.trim().is_empty() {
            return Self::default();
        }

        match serde_yaml::from_str::<Value>(text) {
            Ok(Value::Mapping(options)) => Self {
                collection: scalar_name(&options, "collection"),
                item: scalar_name(&options, "item"),
            },
            parsed => {
                debug!("each options are not a mapping ({:?}), reading tokens", parsed);
                let mut tokens = text.split_whitespace().peekable();
                if tokens.peek() == Some(&"each") {
                    tokens.next();
                }
                Self {
                    collection: tokens.next().map(str::to_string),
                    item: tokens.next().map(str::to_string),
                }
            }
        }
    }

    /// The loop start these options describe.
    pub fn to_construct(&self) -> Construct {
        Construct::loop_start(self.collection.as_deref(), self.item.as_deref())
    }
}

fn scalar_name(options: &Mapping, key: &str) -> Option<String> {
    match options.get(key)? {
        Value::String(name) => Some(name.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null => None,
        other => {
            debug!("each option '{}' is not a scalar ({:?}), using default", key, other);
            None
        }
    }
}

/// Renders a filter invocation to the text spliced into the host output.
///
/// # Example
///
/// ```rust
/// use jstag::{render, FilterInvocation, FilterKind};
///
/// let js = FilterInvocation::new(FilterKind::Js)
///     .with_body(["= a.get('x')", "if a>1", "= a.get('y')", "end"]);
/// assert_eq!(
///     render(&js),
///     "<%= a.get('x') %><% if(a>1) { %><%= a.get('y') %><% } %>"
/// );
///
/// let cond = FilterInvocation::new(FilterKind::If).with_argument("x>0\n");
/// assert_eq!(render(&cond), "<% if(x>0) { %>");
/// ```
pub fn render(invocation: &FilterInvocation) -> String {
    dispatch(invocation, None)
}

/// Like [`render`], but pre-resolves `js` expression lines through
/// `evaluator`, keeping the source text of any fragment that fails.
pub fn render_with(invocation: &FilterInvocation, evaluator: &dyn Evaluate) -> String {
    dispatch(invocation, Some(evaluator))
}

/// Renders a filter by name, rejecting names that are not built-in filters.
pub fn render_named<I, S>(name: &str, body: I, argument: Option<&str>) -> crate::Result<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut invocation = FilterInvocation::new(name.parse()?).with_body(body);
    if let Some(argument) = argument {
        invocation = invocation.with_argument(argument);
    }
    Ok(render(&invocation))
}

fn dispatch(invocation: &FilterInvocation, evaluator: Option<&dyn Evaluate>) -> String {
    debug!(
        "rendering '{}' filter ({} body lines)",
        invocation.kind,
        invocation.body.len()
    );

    let construct = match invocation.kind {
        FilterKind::Js => return render_lines(&invocation.lines(), evaluator),
        FilterKind::If => Construct::if_(strip_terminator(&invocation.argument_text())),
        FilterKind::Elseif => Construct::else_if(strip_terminator(&invocation.argument_text())),
        FilterKind::Else => Construct::else_(),
        FilterKind::End => Construct::BlockEnd {
            closes_loop: is_loop_hint(strip_terminator(&invocation.argument_text())),
        },
        FilterKind::Each => EachOptions::parse(&invocation.argument_text()).to_construct(),
        FilterKind::Endeach => Construct::LoopEnd,
    };

    emit(&construct)
}

fn render_lines(lines: &[&str], evaluator: Option<&dyn Evaluate>) -> String {
    let mut output = String::new();

    for line in lines {
        let construct = match (recognize(line), evaluator) {
            (Construct::Expression { code }, Some(evaluator)) => Construct::Expression {
                code: safe_evaluate(&code, evaluator).into_owned(),
            },
            (construct, _) => construct,
        };
        output.push_str(&emit(&construct));
    }

    output
}
