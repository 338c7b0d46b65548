//! Translator from a small control-flow mini-language to inline JST tags.
//!
//! Host markup templates embed blocks like this:
//!
//! ```text
//! :js
//!   each tabs tab
//!   = tab.get('title')
//!   if tab.get('active')
//!   = tab.get('body')
//!   end
//!   endeach
//! ```
//!
//! and this crate turns each block into the `<% ... %>` / `<%= ... %>` tags a
//! client-side (Underscore-style) template engine expects:
//!
//! ```rust
//! use jstag::{render, FilterInvocation, FilterKind};
//!
//! let block = FilterInvocation::new(FilterKind::Js).with_body([
//!     "each tabs tab",
//!     "= tab.get('title')",
//!     "endeach",
//! ]);
//!
//! assert_eq!(
//!     render(&block),
//!     "<% tabs.each(function(tab) { %><%= tab.get('title') %><% }); %>"
//! );
//! ```
//!
//! # Pipeline
//!
//! Each line goes through two steps:
//!
//! 1. [`recognize`] classifies it into a [`Construct`]. Recognition never
//!    fails; unmatched text becomes [`Construct::Raw`] and passes through.
//! 2. [`emit`] renders the construct as exactly one tag.
//!
//! [`render`] dispatches a whole [`FilterInvocation`] by [`FilterKind`]. The
//! `js` filter handles every construct line by line; the others (`if`,
//! `elseif`, `else`, `end`, `each`, `endeach`) each produce one tag.
//!
//! # Nesting
//!
//! The translator is stateless. A bare `end` closes a conditional (`}`)
//! unless the caller says it closes a loop, either with the `each` argument
//! to the `end` filter or with an `end each` line.
//!
//! # Embedded code
//!
//! Conditions, collection names and expressions are opaque text. They are
//! neither validated nor escaped; errors surface only when the client-side
//! engine evaluates the tags.

mod construct;
mod emit;
mod error;
mod eval;
mod filter;

pub use construct::{
    recognize, strip_terminator, ConditionalKind, Construct, DEFAULT_COLLECTION, DEFAULT_ITEM,
};
pub use emit::{emit, CLOSE, OPEN, OPEN_ECHO};
pub use error::{EvalError, FilterError, Result};
pub use eval::{safe_evaluate, Evaluate};
pub use filter::{
    render, render_named, render_with, EachOptions, FilterInvocation, FilterKind,
};
