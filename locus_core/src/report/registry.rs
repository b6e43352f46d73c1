//! Registry mapping file extensions to report formatters

use super::{BoxedSink, FormatterFactory, ReportFormatter};
use crate::Result;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Extra construction options bound into a formatter factory
pub type FormatterOptions = Map<String, Value>;

/// Builds a formatter from a sink and construction options
pub type FormatterConstructor<D> =
    Arc<dyn Fn(BoxedSink, &FormatterOptions) -> Result<Box<dyn ReportFormatter<D>>> + Send + Sync>;

/// Static table of formatter constructors keyed by extension (`".csv"`)
pub struct ExtensionFormatterRegistry<D: ?Sized> {
    mapping: HashMap<String, FormatterConstructor<D>>,
}

impl<D: ?Sized + 'static> ExtensionFormatterRegistry<D> {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            mapping: HashMap::new(),
        }
    }

    /// Create a registry from an initial mapping; later entries win
    pub fn from_entries<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, FormatterConstructor<D>)>,
        K: Into<String>,
    {
        Self {
            mapping: entries
                .into_iter()
                .map(|(extension, constructor)| (extension.into(), constructor))
                .collect(),
        }
    }

    /// Register `constructor` for `extension`, replacing any earlier one
    pub fn register<F>(&mut self, extension: impl Into<String>, constructor: F)
    where
        F: Fn(BoxedSink, &FormatterOptions) -> Result<Box<dyn ReportFormatter<D>>>
            + Send
            + Sync
            + 'static,
    {
        self.register_shared(extension, Arc::new(constructor));
    }

    /// Register an already shared constructor for `extension`
    pub fn register_shared(
        &mut self,
        extension: impl Into<String>,
        constructor: FormatterConstructor<D>,
    ) {
        let extension = extension.into();
        if self
            .mapping
            .insert(extension.clone(), constructor)
            .is_some()
        {
            log::debug!("Replaced formatter registered for '{extension}'");
        }
    }

    /// Constructor registered for `extension`
    pub fn get_formatter(&self, extension: &str) -> Option<FormatterConstructor<D>> {
        self.mapping.get(extension).cloned()
    }

    /// Constructor registered for `extension`, or `default`
    pub fn get_formatter_or(
        &self,
        extension: &str,
        default: FormatterConstructor<D>,
    ) -> FormatterConstructor<D> {
        self.get_formatter(extension).unwrap_or(default)
    }

    /// Factory that builds the formatter for `extension` with `options` applied
    ///
    /// Returns `None` when nothing is registered; callers wanting a fallback
    /// supply it with `unwrap_or`.
    pub fn get_formatter_factory(
        &self,
        extension: &str,
        options: FormatterOptions,
    ) -> Option<FormatterFactory<D>> {
        let constructor = self.get_formatter(extension)?;
        Some(Box::new(move |sink| constructor(sink, &options)))
    }

    /// Registered extensions, sorted
    pub fn extensions(&self) -> Vec<&str> {
        let mut extensions: Vec<_> = self.mapping.keys().map(String::as_str).collect();
        extensions.sort_unstable();
        extensions
    }

    pub fn len(&self) -> usize {
        self.mapping.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mapping.is_empty()
    }
}

impl<D: ?Sized + 'static> Default for ExtensionFormatterRegistry<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: ?Sized + 'static> fmt::Debug for ExtensionFormatterRegistry<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtensionFormatterRegistry")
            .field("extensions", &self.extensions())
            .finish()
    }
}
