//! Tests for decorator chain resolution

use pretty_assertions::assert_eq;

use super::*;
use crate::{
    component::ComponentNode,
    decorator::{CancelEventIfNoAjaxDecorator, ScriptDecorator},
};

/// Header response that records every call, duplicates included
#[derive(Debug, Default)]
struct CallLog {
    calls: Vec<String>,
}

impl HeaderResponse for CallLog {
    fn render_javascript_reference(&mut self, reference: &str) {
        self.calls.push(reference.to_string());
    }

    fn render_javascript(&mut self, script: &str, _id: Option<&str>) {
        self.calls.push(script.to_string());
    }
}

fn contributing(reference: &str, delegate: Option<Box<dyn CallDecorator>>) -> ScriptDecorator {
    ScriptDecorator {
        header_references: vec![reference.to_string()],
        delegate,
        ..ScriptDecorator::default()
    }
}

#[test]
fn test_absent_primary_gives_empty_chain() {
    let chain = resolve_chain(None);
    assert!(chain.is_empty());
    assert!(chain.contributors().is_empty());
}

#[test]
fn test_three_contributors_in_primary_to_innermost_order() {
    let innermost = contributing("inner.js", None);
    let middle = contributing("middle.js", Some(Box::new(innermost)));
    let primary = contributing("outer.js", Some(Box::new(middle)));

    let chain = resolve_chain(Some(&primary));
    assert_eq!(chain.len(), 3);
    assert_eq!(chain.contributors().len(), 3);

    let component = ComponentNode::new("c");
    let mut log = CallLog::default();
    chain.render_head(&component, &mut log);

    assert_eq!(log.calls, vec!["outer.js", "middle.js", "inner.js"]);
}

#[test]
fn test_non_contributing_links_are_walked_through() {
    let innermost = contributing("inner.js", None);
    let middle = CancelEventIfNoAjaxDecorator::wrapping(Box::new(innermost));
    let primary = contributing("outer.js", Some(Box::new(middle)));

    let chain = resolve_chain(Some(&primary));
    assert_eq!(chain.len(), 3);
    assert_eq!(chain.contributors().len(), 2);

    let component = ComponentNode::new("c");
    let mut log = CallLog::default();
    chain.render_head(&component, &mut log);
    assert_eq!(log.calls, vec!["outer.js", "inner.js"]);
}

#[test]
fn test_single_link_without_contribution() {
    let primary = CancelEventIfNoAjaxDecorator::new();
    let chain = resolve_chain(Some(&primary));
    assert_eq!(chain.len(), 1);
    assert!(chain.contributors().is_empty());
}
