//! Call descriptions read from TOML files
//!
//! ```toml
//! callback-url = "?page=1&behavior=0"
//! success = "refresh();"
//! precondition = "return isReady();"   # or `false` to disable, `true` for the default
//! indicator = "spinner"                # behavior-level indicator
//! channel = "search"
//!
//! [component]
//! markup-id = "query"
//!
//! [[component.ancestors]]              # nearest first
//! markup-id = "form"
//! indicator = "form-busy"
//!
//! [[decorators]]                       # primary first
//! kind = "throttle"
//! throttle-id = "typing"
//! delay-ms = 500
//! ```

use std::{fs, path::Path, time::Duration};

use anyhow::{Context, Result, ensure};
use serde::Deserialize;

use crate::{
    behavior::{AjaxBehavior, CallbackBehavior, Precondition},
    channel::Channel,
    component::{ComponentNode, StaticIndicator},
    decorator::{
        CallDecorator, CancelEventIfNoAjaxDecorator, ScriptDecorator, ThrottlingDecorator, Wrap,
    },
};


#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct RequestFile {
    pub callback_url: Option<String>,
    /// Completed instead of the GET call to `callback-url`
    pub partial_call: Option<String>,
    pub success: Option<String>,
    pub failure: Option<String>,
    #[serde(default)]
    pub precondition: PreconditionSpec,
    pub indicator: Option<String>,
    pub channel: Option<String>,
    pub component: ComponentSpec,
    #[serde(default)]
    pub decorators: Vec<DecoratorSpec>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum PreconditionSpec {
    Enabled(bool),
    Script(String),
}

impl Default for PreconditionSpec {
    fn default() -> Self {
        Self::Enabled(true)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct ComponentSpec {
    pub markup_id: String,
    #[serde(default)]
    pub page: bool,
    pub indicator: Option<String>,
    /// Nearest ancestor first
    #[serde(default)]
    pub ancestors: Vec<AncestorSpec>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct AncestorSpec {
    pub markup_id: String,
    #[serde(default)]
    pub page: bool,
    pub indicator: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum DecoratorSpec {
    CancelEventIfNoAjax,
    #[serde(rename_all = "kebab-case")]
    Throttle { throttle_id: String, delay_ms: u64 },
    #[serde(rename_all = "kebab-case")]
    Script {
        #[serde(default)]
        before_script: String,
        #[serde(default)]
        after_script: String,
        #[serde(default)]
        before_success: String,
        #[serde(default)]
        after_success: String,
        #[serde(default)]
        before_failure: String,
        #[serde(default)]
        after_failure: String,
        #[serde(default)]
        header_references: Vec<String>,
    },
}

/// A behavior built from a request file, plus an optional custom partial call
#[derive(Debug)]
pub struct ConfiguredCall {
    pub behavior: CallbackBehavior,
    pub partial_call: Option<String>,
}

impl ConfiguredCall {
    /// Callback script of the configured behavior
    pub fn script(&self) -> String {
        match &self.partial_call {
            Some(partial_call) => self.behavior.generate_callback_script(partial_call),
            None => self.behavior.callback_script(),
        }
    }
}

impl RequestFile {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read request file {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Invalid request file {}", path.display()))
    }

    /// Build the behavior the file describes
    pub fn build(self) -> Result<ConfiguredCall> {
        ensure!(
            self.callback_url.is_some() || self.partial_call.is_some(),
            "Either 'callback-url' or 'partial-call' must be given"
        );

        let precondition = match self.precondition {
            PreconditionSpec::Enabled(true) => Precondition::Default,
            PreconditionSpec::Enabled(false) => Precondition::Disabled,
            PreconditionSpec::Script(script) => Precondition::Script(script),
        };

        let behavior = CallbackBehavior {
            component: self.component.into_node(),
            callback_url: self.callback_url.unwrap_or_default(),
            success_script: self.success,
            failure_script: self.failure,
            precondition,
            channel: self.channel.map(Channel::new),
            indicator: self.indicator.map(StaticIndicator),
            decorator: build_decorator_chain(self.decorators)?,
        };

        Ok(ConfiguredCall {
            behavior,
            partial_call: self.partial_call,
        })
    }
}

impl ComponentSpec {
    fn into_node(self) -> ComponentNode {
        // Link from the outermost ancestor down to the component
        let parent = self
            .ancestors
            .into_iter()
            .rev()
            .fold(None, |parent: Option<ComponentNode>, ancestor| {
                let node = node(ancestor.markup_id, ancestor.page, ancestor.indicator);
                Some(match parent {
                    Some(parent) => node.with_parent(parent),
                    None => node,
                })
            });

        let component = node(self.markup_id, self.page, self.indicator);
        match parent {
            Some(parent) => component.with_parent(parent),
            None => component,
        }
    }
}

fn node(markup_id: String, page: bool, indicator: Option<String>) -> ComponentNode {
    let node = if page {
        ComponentNode::page(markup_id)
    } else {
        ComponentNode::new(markup_id)
    };
    match indicator {
        Some(indicator) => node.with_indicator(indicator),
        None => node,
    }
}

/// Build decorators innermost first so each wraps the one listed after it
fn build_decorator_chain(specs: Vec<DecoratorSpec>) -> Result<Option<Box<dyn CallDecorator>>> {
    let mut delegate: Option<Box<dyn CallDecorator>> = None;
    for spec in specs.into_iter().rev() {
        delegate = Some(spec.build(delegate)?);
    }
    Ok(delegate)
}

impl DecoratorSpec {
    fn build(self, delegate: Option<Box<dyn CallDecorator>>) -> Result<Box<dyn CallDecorator>> {
        let decorator: Box<dyn CallDecorator> = match self {
            Self::CancelEventIfNoAjax => match delegate {
                Some(delegate) => Box::new(CancelEventIfNoAjaxDecorator::wrapping(delegate)),
                None => Box::new(CancelEventIfNoAjaxDecorator::new()),
            },
            Self::Throttle {
                throttle_id,
                delay_ms,
            } => Box::new(ThrottlingDecorator::new(
                throttle_id,
                Duration::from_millis(delay_ms),
                delegate,
            )?),
            Self::Script {
                before_script,
                after_script,
                before_success,
                after_success,
                before_failure,
                after_failure,
                header_references,
            } => Box::new(ScriptDecorator {
                script: Wrap {
                    before: before_script,
                    after: after_script,
                },
                on_success: Wrap {
                    before: before_success,
                    after: after_success,
                },
                on_failure: Wrap {
                    before: before_failure,
                    after: after_failure,
                },
                header_references,
                delegate,
            }),
        };
        Ok(decorator)
    }
}
