//! Tests for the built-in call decorators

use std::time::Duration;

use pretty_assertions::assert_eq;

use super::*;
use crate::{component::ComponentNode, header::RecordingHeaderResponse};

fn wrap(before: &str, after: &str) -> Wrap {
    Wrap {
        before: before.to_string(),
        after: after.to_string(),
    }
}

fn tagging(tag: &str) -> ScriptDecorator {
    ScriptDecorator {
        script: wrap(&format!("<{tag}>"), &format!("</{tag}>")),
        on_success: wrap("", &format!("{tag}.ok();")),
        on_failure: wrap("", &format!("{tag}.fail();")),
        ..ScriptDecorator::default()
    }
}

#[test]
fn test_default_hooks_are_identity() {
    struct Plain;
    impl CallDecorator for Plain {}

    let component = ComponentNode::new("c");
    assert_eq!(Plain.decorate_script(&component, "x();"), "x();");
    assert_eq!(Plain.decorate_on_success_script(&component, "x();"), "x();");
    assert_eq!(Plain.decorate_on_failure_script(&component, "x();"), "x();");
    assert!(Plain.delegate().is_none());
    assert!(Plain.header_contributor().is_none());
}

#[test]
fn test_preprocessing_runs_own_decoration_first() {
    let component = ComponentNode::new("c");
    let decorator = PreprocessingDecorator::new(
        Box::new(tagging("own")),
        Some(Box::new(tagging("inner"))),
    );

    assert_eq!(
        decorator.decorate_script(&component, "x"),
        "<inner><own>x</own></inner>"
    );
    assert_eq!(
        decorator.decorate_on_success_script(&component, ""),
        "own.ok();inner.ok();"
    );
}

#[test]
fn test_postprocessing_runs_delegate_first() {
    let component = ComponentNode::new("c");
    let decorator = PostprocessingDecorator::new(
        Box::new(tagging("own")),
        Some(Box::new(tagging("inner"))),
    );

    assert_eq!(
        decorator.decorate_script(&component, "x"),
        "<own><inner>x</inner></own>"
    );
    assert_eq!(
        decorator.decorate_on_failure_script(&component, ""),
        "inner.fail();own.fail();"
    );
    assert!(decorator.delegate().is_some());
}

#[test]
fn test_cancel_event_if_no_ajax() {
    let component = ComponentNode::new("c");
    let decorator = CancelEventIfNoAjaxDecorator::new();
    assert_eq!(
        decorator.decorate_script(&component, "var wcall=f();"),
        "var wcall=f();return !wcall;"
    );
    assert_eq!(decorator.decorate_on_success_script(&component, "s();"), "s();");
}

#[test]
fn test_cancel_event_applies_delegate_before_return() {
    let component = ComponentNode::new("c");
    let decorator = CancelEventIfNoAjaxDecorator::wrapping(Box::new(tagging("inner")));
    assert_eq!(
        decorator.decorate_script(&component, "x"),
        "<inner>x</inner>return !wcall;"
    );
}

#[test]
fn test_throttling_wraps_whole_script() {
    let component = ComponentNode::new("c");
    let decorator =
        ThrottlingDecorator::new("typing", Duration::from_millis(250), None).unwrap();
    assert_eq!(
        decorator.decorate_script(&component, "go();"),
        "wicketThrottler.throttle( 'typing', 250, function() { go();}.bind(this));"
    );
}

#[test]
fn test_throttling_rejects_blank_id() {
    assert!(ThrottlingDecorator::new(" ", Duration::from_secs(1), None).is_err());
}

#[test]
fn test_script_decorator_header_capability() {
    let component = ComponentNode::new("c");
    let plain = ScriptDecorator::default();
    assert!(plain.header_contributor().is_none());

    let contributing = ScriptDecorator {
        header_references: vec!["timing.js".to_string()],
        ..ScriptDecorator::default()
    };
    let mut response = RecordingHeaderResponse::new();
    contributing
        .header_contributor()
        .unwrap()
        .render_head(&component, &mut response);
    assert!(response.has_reference("timing.js"));
}
