//! Callback script composition
//!
//! Turns a partial call expression plus the optional behaviors attached to a
//! call (handlers, busy indicator, precondition, channel, decorator) into one
//! statement for the client runtime.
//!
//! The order of the steps below is part of the output contract:
//! - the success handler is decorated *before* the indicator hide is
//!   appended, the failure handler *after* it;
//! - the precondition text is embedded in the guard twice when an indicator
//!   is present (once to revert the indicator, once as the return value), so
//!   a precondition with side effects runs twice on the client;
//! - the indicator show guard wraps the whole call;
//! - `decorate_script` sees the fully composed script.

use log::trace;

use crate::{
    call_descriptor::CallDescriptor,
    channel::Channel,
    component::Component,
    decorator::CallDecorator,
    protocol::{hide_indicator, show_indicator},
};

#[cfg(test)]
mod tests;

/// Everything that goes into one callback script
#[derive(Clone, Copy, Default)]
pub struct CallRequest<'a> {
    /// Call expression missing its trailing arguments, e.g. `wicketAjaxGet('url'`
    pub partial_call: &'a str,
    pub success_script: Option<&'a str>,
    pub failure_script: Option<&'a str>,
    /// Script ending in a `return <bool>;` statement
    pub precondition: Option<&'a str>,
    pub indicator_id: Option<&'a str>,
    pub channel: Option<&'a Channel>,
    pub decorator: Option<&'a dyn CallDecorator>,
}

impl<'a> CallRequest<'a> {
    pub fn new(partial_call: &'a str) -> Self {
        Self {
            partial_call,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_success_script(mut self, script: &'a str) -> Self {
        self.success_script = Some(script);
        self
    }

    #[must_use]
    pub fn with_failure_script(mut self, script: &'a str) -> Self {
        self.failure_script = Some(script);
        self
    }

    #[must_use]
    pub fn with_precondition(mut self, precondition: &'a str) -> Self {
        self.precondition = Some(precondition);
        self
    }

    #[must_use]
    pub fn with_indicator_id(mut self, indicator_id: &'a str) -> Self {
        self.indicator_id = Some(indicator_id);
        self
    }

    #[must_use]
    pub fn with_channel(mut self, channel: &'a Channel) -> Self {
        self.channel = Some(channel);
        self
    }

    #[must_use]
    pub fn with_decorator(mut self, decorator: &'a dyn CallDecorator) -> Self {
        self.decorator = Some(decorator);
        self
    }

    /// Indicator id, treating a blank id as absent
    fn effective_indicator_id(&self) -> Option<&'a str> {
        self.indicator_id.filter(|id| !id.trim().is_empty())
    }
}

impl std::fmt::Debug for CallRequest<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallRequest")
            .field("partial_call", &self.partial_call)
            .field("success_script", &self.success_script)
            .field("failure_script", &self.failure_script)
            .field("precondition", &self.precondition)
            .field("indicator_id", &self.indicator_id)
            .field("channel", &self.channel)
            .field("has_decorator", &self.decorator.is_some())
            .finish()
    }
}

/// Compose the callback script for `request`, issued on behalf of `component`.
///
/// Absent optional parts never fail; they only change what is emitted.
pub fn compose(component: &dyn Component, request: &CallRequest<'_>) -> String {
    let decorator = request.decorator;
    let indicator_id = request.effective_indicator_id();

    let mut success = request.success_script.unwrap_or_default().to_owned();
    let mut failure = request.failure_script.unwrap_or_default().to_owned();

    if let Some(decorator) = decorator {
        success = decorator.decorate_on_success_script(component, &success);
    }

    if let Some(indicator_id) = indicator_id {
        let hide = format!(";{}", hide_indicator(indicator_id));
        success.push_str(&hide);
        failure.push_str(&hide);
    }

    if let Some(decorator) = decorator {
        failure = decorator.decorate_on_failure_script(component, &failure);
    }

    let mut call = CallDescriptor::new(request.partial_call, success, failure);
    if let Some(precondition) = request.precondition {
        call = call.with_precondition(guard_body(precondition, indicator_id));
    }
    if let Some(channel) = request.channel {
        call = call.with_channel(channel.name());
    }

    let mut script = call.render();

    if let Some(indicator_id) = indicator_id {
        let condition = request.precondition.map_or_else(
            || "true".to_owned(),
            |precondition| format!("function(){{{precondition}}}.bind(this)()"),
        );
        script = format!(
            "if ({condition}) {{ {}}}{script}",
            show_indicator(indicator_id)
        );
    }

    if let Some(decorator) = decorator {
        script = decorator.decorate_script(component, &script);
    }

    trace!(
        "Composed callback script for '{}': {script}",
        component.markup_id()
    );
    script
}

/// Body of the precondition argument.
///
/// With an indicator, a failing precondition hides the indicator again: the
/// show guard may have run before the client postponed the call on its
/// channel, and the precondition can change its outcome in the meantime.
fn guard_body(precondition: &str, indicator_id: Option<&str>) -> String {
    match indicator_id {
        Some(indicator_id) => format!(
            "if (!function() {{{precondition}}}.bind(this)()) {{{}}}{precondition}",
            hide_indicator(indicator_id)
        ),
        None => precondition.to_owned(),
    }
}
