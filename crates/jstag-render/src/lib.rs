//! MiniJinja host integration for the jstag JST filters.
//!
//! [`jstag`] translates mini-language blocks into `<% %>` tags but knows
//! nothing about the template that contains them. This crate is the host
//! side:
//!
//! - [`FilterRegistry`]: the table of filter name to translator function.
//! - [`register_filters`] / [`environment`] / [`render_template`]: bind a registry into a
//!   MiniJinja [`Environment`](minijinja::Environment), together with the
//!   markup helpers in [`helpers`].
//! - [`RenderConfig`]: name prefix, body splitting and the `compile_text`
//!   switch.
//! - [`MiniJinjaEvaluator`]: pre-resolves `= ...` fragments when
//!   `compile_text` is on, keeping the source text of anything it cannot
//!   evaluate.
//!
//! # Example
//!
//! ```rust
//! use jstag_render::{environment, RenderConfig};
//!
//! let env = environment(&RenderConfig::default());
//! let template = "\
//! {{ 'tabs tab' | jst_each }}<li>{% filter jst_js %}
//!   = tab.get('title')
//! {% endfilter %}</li>{{ none | jst_endeach }}";
//!
//! assert_eq!(
//!     env.render_str(template, ()).unwrap(),
//!     "<% tabs.each(function(tab) { %><li><%= tab.get('title') %></li><% }); %>"
//! );
//! ```

mod config;
mod error;
mod evaluator;
mod filters;
pub mod helpers;
mod registry;

pub use config::{RenderConfig, DEFAULT_PREFIX};
pub use error::{RenderError, Result};
pub use evaluator::MiniJinjaEvaluator;
pub use filters::{environment, register_filters, render_template};
pub use registry::{FilterRegistry, TranslateFn};
