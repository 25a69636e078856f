//! Decorator chain resolution
//!
//! Starting at the primary decorator, the chain follows `delegate()` links
//! until a decorator without a delegate is reached. Each link has at most one
//! successor. Chains are supplied by the integrator and assumed acyclic: a
//! decorator that (directly or indirectly) delegates to itself makes
//! resolution loop forever.

use log::trace;

use crate::{
    component::Component,
    decorator::CallDecorator,
    header::{HeaderContributor, HeaderResponse},
};

#[cfg(test)]
mod tests;

/// Decorator chain flattened into primary-to-innermost order
#[derive(Default)]
pub struct DecoratorChain<'a> {
    links: Vec<&'a dyn CallDecorator>,
    contributors: Vec<&'a dyn HeaderContributor>,
}

impl<'a> DecoratorChain<'a> {
    /// Walk the chain starting at `primary`. An absent primary yields an
    /// empty chain.
    pub fn resolve(primary: Option<&'a dyn CallDecorator>) -> Self {
        let mut chain = Self::default();
        let mut cursor = primary;
        while let Some(decorator) = cursor {
            if let Some(contributor) = decorator.header_contributor() {
                chain.contributors.push(contributor);
            }
            chain.links.push(decorator);
            cursor = decorator.delegate();
        }
        trace!(
            "Resolved decorator chain: {} links, {} header contributors",
            chain.links.len(),
            chain.contributors.len()
        );
        chain
    }

    /// All decorators, primary first
    pub fn links(&self) -> &[&'a dyn CallDecorator] {
        &self.links
    }

    /// Decorators able to contribute to the header, primary first
    pub fn contributors(&self) -> &[&'a dyn HeaderContributor] {
        &self.contributors
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Ask every contributor, once and in chain order, to render its
    /// load-time dependencies
    pub fn render_head(&self, component: &dyn Component, response: &mut dyn HeaderResponse) {
        for contributor in &self.contributors {
            contributor.render_head(component, response);
        }
    }
}

impl std::fmt::Debug for DecoratorChain<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecoratorChain")
            .field("links", &self.links.len())
            .field("contributors", &self.contributors.len())
            .finish()
    }
}

/// Flatten the chain headed by `primary`
pub fn resolve_chain(primary: Option<&dyn CallDecorator>) -> DecoratorChain<'_> {
    DecoratorChain::resolve(primary)
}
