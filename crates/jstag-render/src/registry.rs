//! Filter registration table.
//!
//! [`FilterRegistry`] maps each filter name to the function that translates
//! it. A host asks the table for a name and calls what it finds; nothing is
//! mixed into the host's own types. [`register_filters`](crate::register_filters)
//! binds a registry into a MiniJinja environment, but the table is usable by
//! any host through [`FilterRegistry::translate`].
//!
//! # Example
//!
//! ```rust
//! use jstag_render::FilterRegistry;
//!
//! let registry = FilterRegistry::standard();
//! let output = registry
//!     .translate_named("js", ["= a.get('x')", "foo();"], None)
//!     .unwrap();
//! assert_eq!(output, "<%= a.get('x') %><% foo(); %>");
//!
//! assert!(registry.translate_named("unless", ["x"], None).is_err());
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use jstag::{Evaluate, FilterInvocation, FilterKind};
use log::debug;

use crate::config::RenderConfig;
use crate::error::{RenderError, Result};
use crate::evaluator::MiniJinjaEvaluator;

/// A translator function for one filter.
pub type TranslateFn = Arc<dyn Fn(&FilterInvocation) -> String + Send + Sync>;

/// Table of filter name to translator function.
#[derive(Clone, Default)]
pub struct FilterRegistry {
    filters: HashMap<FilterKind, TranslateFn>,
    evaluator: Option<Arc<dyn Evaluate>>,
}

impl fmt::Debug for FilterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterRegistry")
            .field("filters", &self.names().collect::<Vec<_>>())
            .field("evaluator", &self.evaluator.is_some())
            .finish()
    }
}

impl FilterRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every built-in filter.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        for kind in FilterKind::ALL {
            registry.insert(kind, Arc::new(jstag::render));
        }
        registry
    }

    /// The standard registry, pre-resolving `js` expressions through
    /// `evaluator`.
    pub fn with_evaluator(evaluator: Arc<dyn Evaluate>) -> Self {
        let mut registry = Self::standard();
        let js_evaluator = Arc::clone(&evaluator);
        registry.insert(
            FilterKind::Js,
            Arc::new(move |invocation: &FilterInvocation| {
                jstag::render_with(invocation, js_evaluator.as_ref())
            }),
        );
        registry.evaluator = Some(evaluator);
        registry
    }

    /// The registry described by `config`: standard, with a
    /// [`MiniJinjaEvaluator`] when `compile_text` is on.
    pub fn from_config(config: &RenderConfig) -> Self {
        if config.compile_text {
            Self::with_evaluator(Arc::new(MiniJinjaEvaluator::new()))
        } else {
            Self::standard()
        }
    }

    /// Registers (or replaces) the translator for `kind`.
    pub fn insert(&mut self, kind: FilterKind, translate: TranslateFn) -> Option<TranslateFn> {
        self.filters.insert(kind, translate)
    }

    /// Removes the translator for `kind`.
    pub fn remove(&mut self, kind: FilterKind) -> Option<TranslateFn> {
        self.filters.remove(&kind)
    }

    pub fn get(&self, kind: FilterKind) -> Option<&TranslateFn> {
        self.filters.get(&kind)
    }

    pub fn contains(&self, kind: FilterKind) -> bool {
        self.filters.contains_key(&kind)
    }

    /// Registered filters, in [`FilterKind::ALL`] order.
    pub fn kinds(&self) -> impl Iterator<Item = FilterKind> + '_ {
        FilterKind::ALL
            .into_iter()
            .filter(move |kind| self.filters.contains_key(kind))
    }

    /// Registered filter names, in [`FilterKind::ALL`] order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.kinds().map(FilterKind::name)
    }

    /// The evaluator used for expression pre-resolution, if any.
    pub fn evaluator(&self) -> Option<&dyn Evaluate> {
        self.evaluator.as_deref()
    }

    pub(crate) fn shared_evaluator(&self) -> Option<Arc<dyn Evaluate>> {
        self.evaluator.clone()
    }

    /// Translates an invocation with the function registered for its kind.
    pub fn translate(&self, invocation: &FilterInvocation) -> Result<String> {
        let kind = invocation.kind();
        let translate = self.get(kind).ok_or(RenderError::NotRegistered(kind))?;
        Ok(translate(invocation))
    }

    /// Translates by filter name, rejecting unknown or unregistered names.
    pub fn translate_named<I, S>(&self, name: &str, body: I, argument: Option<&str>) -> Result<String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let kind: FilterKind = name.parse()?;
        let mut invocation = FilterInvocation::new(kind).with_body(body);
        if let Some(argument) = argument {
            invocation = invocation.with_argument(argument);
        }
        debug!("translating '{}' through registry", name);
        self.translate(&invocation)
    }
}
