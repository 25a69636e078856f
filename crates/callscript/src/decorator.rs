//! Call decorators
//!
//! A decorator rewrites the pieces of a composed call: the success handler
//! body, the failure handler body and the complete script. Decorators may wrap
//! exactly one delegate, forming a chain. The composer only talks to the
//! primary decorator; each decorator is responsible for invoking its
//! delegate. The chain is walked separately to collect header contributions,
//! see [`crate::chain`].

use std::time::Duration;

use anyhow::{Result, ensure};
use log::warn;

use crate::{
    component::Component,
    header::{HeaderContributor, HeaderResponse},
    protocol::CALL_RESULT_VAR,
    throttle::throttle_script,
};

#[cfg(test)]
mod tests;

/// Rewrites scripts produced by the composer. All hooks default to identity.
pub trait CallDecorator {
    /// Decorate the complete call script
    fn decorate_script(&self, _component: &dyn Component, script: &str) -> String {
        script.to_owned()
    }

    /// Decorate the body of the success handler
    fn decorate_on_success_script(&self, _component: &dyn Component, script: &str) -> String {
        script.to_owned()
    }

    /// Decorate the body of the failure handler
    fn decorate_on_failure_script(&self, _component: &dyn Component, script: &str) -> String {
        script.to_owned()
    }

    /// The decorator wrapped by this one, if any
    fn delegate(&self) -> Option<&dyn CallDecorator> {
        None
    }

    /// Header contribution capability of this decorator, if any
    fn header_contributor(&self) -> Option<&dyn HeaderContributor> {
        None
    }
}

type Hook = fn(&(dyn CallDecorator + 'static), &dyn Component, &str) -> String;

fn apply(
    decorator: Option<&(dyn CallDecorator + 'static)>,
    hook: Hook,
    component: &dyn Component,
    script: &str,
) -> String {
    decorator.map_or_else(|| script.to_owned(), |decorator| hook(decorator, component, script))
}

/// Runs its own decoration first, then hands the result to the delegate
pub struct PreprocessingDecorator {
    own: Box<dyn CallDecorator>,
    delegate: Option<Box<dyn CallDecorator>>,
}

impl PreprocessingDecorator {
    pub fn new(own: Box<dyn CallDecorator>, delegate: Option<Box<dyn CallDecorator>>) -> Self {
        Self { own, delegate }
    }

    fn run(&self, hook: Hook, component: &dyn Component, script: &str) -> String {
        let pre = hook(self.own.as_ref(), component, script);
        apply(self.delegate.as_deref(), hook, component, &pre)
    }
}

impl CallDecorator for PreprocessingDecorator {
    fn decorate_script(&self, component: &dyn Component, script: &str) -> String {
        self.run(CallDecorator::decorate_script, component, script)
    }

    fn decorate_on_success_script(&self, component: &dyn Component, script: &str) -> String {
        self.run(CallDecorator::decorate_on_success_script, component, script)
    }

    fn decorate_on_failure_script(&self, component: &dyn Component, script: &str) -> String {
        self.run(CallDecorator::decorate_on_failure_script, component, script)
    }

    fn delegate(&self) -> Option<&dyn CallDecorator> {
        self.delegate.as_deref()
    }

    fn header_contributor(&self) -> Option<&dyn HeaderContributor> {
        self.own.header_contributor()
    }
}

impl std::fmt::Debug for PreprocessingDecorator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreprocessingDecorator")
            .field("has_delegate", &self.delegate.is_some())
            .finish_non_exhaustive()
    }
}

/// Lets the delegate decorate first, then runs its own decoration
pub struct PostprocessingDecorator {
    own: Box<dyn CallDecorator>,
    delegate: Option<Box<dyn CallDecorator>>,
}

impl PostprocessingDecorator {
    pub fn new(own: Box<dyn CallDecorator>, delegate: Option<Box<dyn CallDecorator>>) -> Self {
        Self { own, delegate }
    }

    fn run(&self, hook: Hook, component: &dyn Component, script: &str) -> String {
        let inner = apply(self.delegate.as_deref(), hook, component, script);
        hook(self.own.as_ref(), component, &inner)
    }
}

impl CallDecorator for PostprocessingDecorator {
    fn decorate_script(&self, component: &dyn Component, script: &str) -> String {
        self.run(CallDecorator::decorate_script, component, script)
    }

    fn decorate_on_success_script(&self, component: &dyn Component, script: &str) -> String {
        self.run(CallDecorator::decorate_on_success_script, component, script)
    }

    fn decorate_on_failure_script(&self, component: &dyn Component, script: &str) -> String {
        self.run(CallDecorator::decorate_on_failure_script, component, script)
    }

    fn delegate(&self) -> Option<&dyn CallDecorator> {
        self.delegate.as_deref()
    }

    fn header_contributor(&self) -> Option<&dyn HeaderContributor> {
        self.own.header_contributor()
    }
}

impl std::fmt::Debug for PostprocessingDecorator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostprocessingDecorator")
            .field("has_delegate", &self.delegate.is_some())
            .finish_non_exhaustive()
    }
}

/// Returns `false` from the event handler unless the Ajax call could not be
/// made, so the browser's default action only runs as a fallback
#[derive(Default)]
pub struct CancelEventIfNoAjaxDecorator {
    delegate: Option<Box<dyn CallDecorator>>,
}

impl CancelEventIfNoAjaxDecorator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn wrapping(delegate: Box<dyn CallDecorator>) -> Self {
        Self {
            delegate: Some(delegate),
        }
    }
}

impl CallDecorator for CancelEventIfNoAjaxDecorator {
    fn decorate_script(&self, component: &dyn Component, script: &str) -> String {
        let inner = apply(
            self.delegate.as_deref(),
            CallDecorator::decorate_script,
            component,
            script,
        );
        format!("{inner}return !{CALL_RESULT_VAR};")
    }

    fn decorate_on_success_script(&self, component: &dyn Component, script: &str) -> String {
        apply(
            self.delegate.as_deref(),
            CallDecorator::decorate_on_success_script,
            component,
            script,
        )
    }

    fn decorate_on_failure_script(&self, component: &dyn Component, script: &str) -> String {
        apply(
            self.delegate.as_deref(),
            CallDecorator::decorate_on_failure_script,
            component,
            script,
        )
    }

    fn delegate(&self) -> Option<&dyn CallDecorator> {
        self.delegate.as_deref()
    }
}

impl std::fmt::Debug for CancelEventIfNoAjaxDecorator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CancelEventIfNoAjaxDecorator")
            .field("has_delegate", &self.delegate.is_some())
            .finish()
    }
}

/// Throttles the complete call so it runs at most once per delay window
pub struct ThrottlingDecorator {
    throttle_id: String,
    throttle_delay: Duration,
    delegate: Option<Box<dyn CallDecorator>>,
}

impl ThrottlingDecorator {
    /// Rejects a blank throttle id
    pub fn new(
        throttle_id: impl Into<String>,
        throttle_delay: Duration,
        delegate: Option<Box<dyn CallDecorator>>,
    ) -> Result<Self> {
        let throttle_id = throttle_id.into();
        ensure!(
            !throttle_id.trim().is_empty(),
            "Argument 'throttleId' may not be null or empty."
        );
        Ok(Self {
            throttle_id,
            throttle_delay,
            delegate,
        })
    }
}

impl CallDecorator for ThrottlingDecorator {
    fn decorate_script(&self, component: &dyn Component, script: &str) -> String {
        let inner = apply(
            self.delegate.as_deref(),
            CallDecorator::decorate_script,
            component,
            script,
        );
        match throttle_script(&inner, &self.throttle_id, Some(self.throttle_delay)) {
            Ok(throttled) => throttled,
            Err(err) => {
                warn!(
                    "Not throttling script of '{}': {err}",
                    component.markup_id()
                );
                inner
            }
        }
    }

    fn decorate_on_success_script(&self, component: &dyn Component, script: &str) -> String {
        apply(
            self.delegate.as_deref(),
            CallDecorator::decorate_on_success_script,
            component,
            script,
        )
    }

    fn decorate_on_failure_script(&self, component: &dyn Component, script: &str) -> String {
        apply(
            self.delegate.as_deref(),
            CallDecorator::decorate_on_failure_script,
            component,
            script,
        )
    }

    fn delegate(&self) -> Option<&dyn CallDecorator> {
        self.delegate.as_deref()
    }
}

impl std::fmt::Debug for ThrottlingDecorator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThrottlingDecorator")
            .field("throttle_id", &self.throttle_id)
            .field("throttle_delay", &self.throttle_delay)
            .field("has_delegate", &self.delegate.is_some())
            .finish()
    }
}

/// Prefix and suffix wrapped around one decoration hook
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Wrap {
    pub before: String,
    pub after: String,
}

impl Wrap {
    fn around(&self, script: &str) -> String {
        format!("{}{script}{}", self.before, self.after)
    }
}

/// Decorator described by data rather than code.
///
/// The delegate decorates first, then the wraps are applied. Header references
/// are contributed when non-empty.
#[derive(Default)]
pub struct ScriptDecorator {
    pub script: Wrap,
    pub on_success: Wrap,
    pub on_failure: Wrap,
    pub header_references: Vec<String>,
    pub delegate: Option<Box<dyn CallDecorator>>,
}

impl CallDecorator for ScriptDecorator {
    fn decorate_script(&self, component: &dyn Component, script: &str) -> String {
        let inner = apply(
            self.delegate.as_deref(),
            CallDecorator::decorate_script,
            component,
            script,
        );
        self.script.around(&inner)
    }

    fn decorate_on_success_script(&self, component: &dyn Component, script: &str) -> String {
        let inner = apply(
            self.delegate.as_deref(),
            CallDecorator::decorate_on_success_script,
            component,
            script,
        );
        self.on_success.around(&inner)
    }

    fn decorate_on_failure_script(&self, component: &dyn Component, script: &str) -> String {
        let inner = apply(
            self.delegate.as_deref(),
            CallDecorator::decorate_on_failure_script,
            component,
            script,
        );
        self.on_failure.around(&inner)
    }

    fn delegate(&self) -> Option<&dyn CallDecorator> {
        self.delegate.as_deref()
    }

    fn header_contributor(&self) -> Option<&dyn HeaderContributor> {
        if self.header_references.is_empty() {
            None
        } else {
            Some(self)
        }
    }
}

impl HeaderContributor for ScriptDecorator {
    fn render_head(&self, _component: &dyn Component, response: &mut dyn HeaderResponse) {
        for reference in &self.header_references {
            response.render_javascript_reference(reference);
        }
    }
}

impl std::fmt::Debug for ScriptDecorator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScriptDecorator")
            .field("script", &self.script)
            .field("on_success", &self.on_success)
            .field("on_failure", &self.on_failure)
            .field("header_references", &self.header_references)
            .field("has_delegate", &self.delegate.is_some())
            .finish()
    }
}
