//! Ajax behavior template
//!
//! A behavior is attached to one component and produces two strings on
//! request: the callback script that triggers the Ajax call, and the header
//! contributions the client needs before that script can run. Implementors
//! supply the component and callback url and override the hooks they need.

use cow_utils::CowUtils;
use log::debug;

use crate::{
    chain::resolve_chain,
    channel::Channel,
    component::{Component, ComponentNode, IndicatorAware, StaticIndicator},
    composer::{CallRequest, compose},
    decorator::CallDecorator,
    header::HeaderResponse,
    indicator::find_indicator_id,
    protocol::{
        AJAX_BASE_URL_ID, AJAX_DEBUG_ENABLE_ID, AJAX_DEBUG_JS_REFERENCE, AJAX_JS_REFERENCE,
        ELEMENT_LOOKUP_FN, EVENT_JS_REFERENCE, ajax_get_partial_call,
    },
};


/// Application-level settings that affect header rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AjaxSettings {
    /// Render the client debug window support
    pub debug_mode: bool,
    /// Base url the client resolves relative callback urls against
    pub base_url: String,
}

impl Default for AjaxSettings {
    fn default() -> Self {
        Self {
            debug_mode: false,
            base_url: ".".to_owned(),
        }
    }
}

/// Behavior performing Ajax callbacks for its component
pub trait AjaxBehavior {
    /// Component this behavior is attached to
    fn component(&self) -> &dyn Component;

    /// Url the client calls back
    fn callback_url(&self) -> String;

    fn success_script(&self) -> Option<String> {
        None
    }

    fn failure_script(&self) -> Option<String> {
        None
    }

    /// Expression deciding on the client whether the call is made, in the
    /// form `return <bool>;`. By default the call only happens while the
    /// component's element is still in the document.
    fn precondition_script(&self) -> Option<String> {
        Some(default_precondition(self.component()))
    }

    fn channel(&self) -> Option<&Channel> {
        None
    }

    fn call_decorator(&self) -> Option<&dyn CallDecorator> {
        None
    }

    /// Indicator capability of the behavior itself
    fn indicator(&self) -> Option<&dyn IndicatorAware> {
        None
    }

    /// Markup id of the applicable busy indicator: component, then behavior,
    /// then the component's ancestors
    fn find_indicator_id(&self) -> Option<String> {
        find_indicator_id(self.component(), self.indicator())
    }

    /// Script performing an Ajax GET to [`AjaxBehavior::callback_url`]
    fn callback_script(&self) -> String {
        self.generate_callback_script(&ajax_get_partial_call(&self.callback_url()))
    }

    /// Complete `partial_call` with this behavior's handlers, precondition,
    /// indicator, channel and decorator
    fn generate_callback_script(&self, partial_call: &str) -> String {
        let success = self.success_script();
        let failure = self.failure_script();
        let precondition = self.precondition_script();
        let indicator_id = self.find_indicator_id();

        let request = CallRequest {
            partial_call,
            success_script: success.as_deref(),
            failure_script: failure.as_deref(),
            precondition: precondition.as_deref(),
            indicator_id: indicator_id.as_deref(),
            channel: self.channel(),
            decorator: self.call_decorator(),
        };
        compose(self.component(), &request)
    }

    /// Render the client runtime and the decorator chain's dependencies
    fn render_head(&self, response: &mut dyn HeaderResponse, settings: &AjaxSettings) {
        response.render_javascript_reference(EVENT_JS_REFERENCE);
        response.render_javascript_reference(AJAX_JS_REFERENCE);

        if settings.debug_mode {
            debug!("Ajax debug mode enabled, rendering debug support");
            response.render_javascript_reference(AJAX_DEBUG_JS_REFERENCE);
            response.render_javascript(
                "wicketAjaxDebugEnable=true;",
                Some(AJAX_DEBUG_ENABLE_ID),
            );
        }

        let base_url = escape_markup(&settings.base_url);
        response.render_javascript(
            &format!("Wicket.Ajax.baseUrl=\"{base_url}\";"),
            Some(AJAX_BASE_URL_ID),
        );

        resolve_chain(self.call_decorator()).render_head(self.component(), response);
    }
}

/// `return true;` for pages, otherwise a check that the element exists
pub fn default_precondition(component: &dyn Component) -> String {
    if component.is_page() {
        "return true;".to_owned()
    } else {
        format!(
            "return {ELEMENT_LOOKUP_FN}('{}') != null;",
            component.markup_id()
        )
    }
}

/// Escape text for use inside markup attribute and script contexts
pub fn escape_markup(text: &str) -> String {
    let escaped = text.cow_replace('&', "&amp;");
    let escaped = escaped.cow_replace('<', "&lt;");
    let escaped = escaped.cow_replace('>', "&gt;");
    let escaped = escaped.cow_replace('"', "&quot;");
    let escaped = escaped.cow_replace('\'', "&#039;");
    escaped.into_owned()
}

/// Where the precondition of a [`CallbackBehavior`] comes from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Precondition {
    /// Element-exists check, see [`default_precondition`]
    #[default]
    Default,
    /// No precondition argument at all
    Disabled,
    Script(String),
}

/// Behavior configured with plain values
#[derive(Default)]
pub struct CallbackBehavior {
    pub component: ComponentNode,
    pub callback_url: String,
    pub success_script: Option<String>,
    pub failure_script: Option<String>,
    pub precondition: Precondition,
    pub channel: Option<Channel>,
    pub indicator: Option<StaticIndicator>,
    pub decorator: Option<Box<dyn CallDecorator>>,
}

impl CallbackBehavior {
    pub fn new(component: ComponentNode, callback_url: impl Into<String>) -> Self {
        Self {
            component,
            callback_url: callback_url.into(),
            ..Self::default()
        }
    }
}

impl AjaxBehavior for CallbackBehavior {
    fn component(&self) -> &dyn Component {
        &self.component
    }

    fn callback_url(&self) -> String {
        self.callback_url.clone()
    }

    fn success_script(&self) -> Option<String> {
        self.success_script.clone()
    }

    fn failure_script(&self) -> Option<String> {
        self.failure_script.clone()
    }

    fn precondition_script(&self) -> Option<String> {
        match &self.precondition {
            Precondition::Default => Some(default_precondition(&self.component)),
            Precondition::Disabled => None,
            Precondition::Script(script) => Some(script.clone()),
        }
    }

    fn channel(&self) -> Option<&Channel> {
        self.channel.as_ref()
    }

    fn call_decorator(&self) -> Option<&dyn CallDecorator> {
        self.decorator.as_deref()
    }

    fn indicator(&self) -> Option<&dyn IndicatorAware> {
        let indicator = self.indicator.as_ref()?;
        Some(indicator)
    }
}

impl std::fmt::Debug for CallbackBehavior {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallbackBehavior")
            .field("component", &self.component)
            .field("callback_url", &self.callback_url)
            .field("success_script", &self.success_script)
            .field("failure_script", &self.failure_script)
            .field("precondition", &self.precondition)
            .field("channel", &self.channel)
            .field("indicator", &self.indicator)
            .field("has_decorator", &self.decorator.is_some())
            .finish()
    }
}
