//! Component tree seen by the composer
//!
//! Markup id assignment and the tree itself belong to the surrounding
//! framework. The composer only needs read access: the markup id, whether the
//! component is a page, its parent, and whether it owns a busy indicator.

/// Capability of owning a client-side busy indicator
pub trait IndicatorAware {
    /// Markup id of the indicator element
    fn indicator_markup_id(&self) -> String;
}

/// Read-only view of a component in the page tree
pub trait Component {
    fn markup_id(&self) -> &str;

    fn is_page(&self) -> bool {
        false
    }

    /// Structural parent, `None` at the root
    fn parent(&self) -> Option<&dyn Component>;

    /// Indicator capability of this component, if it has one
    fn indicator(&self) -> Option<&dyn IndicatorAware> {
        None
    }
}

/// An indicator identified by a fixed markup id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticIndicator(pub String);

impl IndicatorAware for StaticIndicator {
    fn indicator_markup_id(&self) -> String {
        self.0.clone()
    }
}

/// Owned component with an owned ancestor chain
#[derive(Debug, Clone, Default)]
pub struct ComponentNode {
    markup_id: String,
    page: bool,
    indicator: Option<StaticIndicator>,
    parent: Option<Box<ComponentNode>>,
}

impl ComponentNode {
    pub fn new(markup_id: impl Into<String>) -> Self {
        Self {
            markup_id: markup_id.into(),
            ..Self::default()
        }
    }

    /// Create a page, the root of a component tree
    pub fn page(markup_id: impl Into<String>) -> Self {
        Self {
            markup_id: markup_id.into(),
            page: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_indicator(mut self, indicator_id: impl Into<String>) -> Self {
        self.indicator = Some(StaticIndicator(indicator_id.into()));
        self
    }

    #[must_use]
    pub fn with_parent(mut self, parent: Self) -> Self {
        self.parent = Some(Box::new(parent));
        self
    }
}

impl Component for ComponentNode {
    fn markup_id(&self) -> &str {
        &self.markup_id
    }

    fn is_page(&self) -> bool {
        self.page
    }

    fn parent(&self) -> Option<&dyn Component> {
        let parent: &Self = self.parent.as_deref()?;
        Some(parent)
    }

    fn indicator(&self) -> Option<&dyn IndicatorAware> {
        let indicator = self.indicator.as_ref()?;
        Some(indicator)
    }
}
