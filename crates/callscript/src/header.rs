//! Load-time header contributions
//!
//! Behaviors and decorators declare the scripts they depend on by rendering
//! into a [`HeaderResponse`]. Writing the actual document head is the
//! framework's job; [`RecordingHeaderResponse`] keeps the contributions in
//! memory for callers that emit them later.

use std::fmt;

use indexmap::{IndexMap, map::Entry};
use log::debug;

use crate::component::Component;


/// Sink receiving load-time dependencies
pub trait HeaderResponse {
    /// Reference an external script by name or url
    fn render_javascript_reference(&mut self, reference: &str);

    /// Contribute an inline script. Scripts sharing an `id` are rendered once.
    fn render_javascript(&mut self, script: &str, id: Option<&str>);
}

/// Capability of contributing load-time dependencies for a component
pub trait HeaderContributor {
    fn render_head(&self, component: &dyn Component, response: &mut dyn HeaderResponse);
}

/// A single recorded contribution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderItem {
    JavaScriptReference(String),
    JavaScript { script: String, id: Option<String> },
}

impl fmt::Display for HeaderItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::JavaScriptReference(reference) => write!(f, "reference {reference}"),
            Self::JavaScript {
                script,
                id: Some(id),
            } => write!(f, "script [{id}] {script}"),
            Self::JavaScript { script, id: None } => write!(f, "script {script}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum HeaderKey {
    Reference(String),
    ScriptId(String),
    ScriptText(String),
}

/// In-memory header response, first contribution per key wins
#[derive(Debug, Default)]
pub struct RecordingHeaderResponse {
    items: IndexMap<HeaderKey, HeaderItem>,
}

impl RecordingHeaderResponse {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded contributions in the order they were first rendered
    pub fn items(&self) -> impl Iterator<Item = &HeaderItem> {
        self.items.values()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether `reference` was rendered
    pub fn has_reference(&self, reference: &str) -> bool {
        self.items
            .contains_key(&HeaderKey::Reference(reference.to_owned()))
    }

    fn record(&mut self, key: HeaderKey, item: HeaderItem) {
        match self.items.entry(key) {
            Entry::Occupied(existing) => {
                debug!("Skipping duplicate header contribution {:?}", existing.key());
            }
            Entry::Vacant(slot) => {
                slot.insert(item);
            }
        }
    }
}

impl HeaderResponse for RecordingHeaderResponse {
    fn render_javascript_reference(&mut self, reference: &str) {
        self.record(
            HeaderKey::Reference(reference.to_owned()),
            HeaderItem::JavaScriptReference(reference.to_owned()),
        );
    }

    fn render_javascript(&mut self, script: &str, id: Option<&str>) {
        let key = id.map_or_else(
            || HeaderKey::ScriptText(script.to_owned()),
            |id| HeaderKey::ScriptId(id.to_owned()),
        );
        self.record(
            key,
            HeaderItem::JavaScript {
                script: script.to_owned(),
                id: id.map(str::to_owned),
            },
        );
    }
}
