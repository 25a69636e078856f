//! Tests for callback script composition

use std::cell::RefCell;

use pretty_assertions::assert_eq;

use super::*;
use crate::component::ComponentNode;

const PARTIAL: &str = "wicketAjaxGet('url'";

/// Decorator recording the scripts each hook received
#[derive(Debug, Default)]
struct Recorder {
    seen: RefCell<Vec<(&'static str, String)>>,
}

impl CallDecorator for Recorder {
    fn decorate_script(&self, _component: &dyn Component, script: &str) -> String {
        self.seen.borrow_mut().push(("script", script.to_string()));
        format!("/*timed*/{script}")
    }

    fn decorate_on_success_script(&self, _component: &dyn Component, script: &str) -> String {
        self.seen.borrow_mut().push(("success", script.to_string()));
        format!("{script}ok();")
    }

    fn decorate_on_failure_script(&self, _component: &dyn Component, script: &str) -> String {
        self.seen.borrow_mut().push(("failure", script.to_string()));
        format!("{script}fail();")
    }
}

#[test]
fn test_bare_call() {
    let component = ComponentNode::new("link");
    let script = compose(&component, &CallRequest::new(PARTIAL));
    assert_eq!(
        script,
        "var wcall=wicketAjaxGet('url',function() { }.bind(this),function() { }.bind(this));"
    );
}

#[test]
fn test_success_and_failure_scripts() {
    let component = ComponentNode::new("link");
    let request = CallRequest::new(PARTIAL)
        .with_success_script("done();")
        .with_failure_script("oops();");
    assert_eq!(
        compose(&component, &request),
        "var wcall=wicketAjaxGet('url',function() { done();}.bind(this),function() { oops();}.bind(this));"
    );
}

#[test]
fn test_indicator_without_precondition() {
    let component = ComponentNode::new("link");
    let request = CallRequest::new(PARTIAL).with_indicator_id("ind1");
    assert_eq!(
        compose(&component, &request),
        "if (true) { Wicket.showIncrementally('ind1');}\
         var wcall=wicketAjaxGet('url',\
         function() { ;Wicket.hideIncrementally('ind1');}.bind(this),\
         function() { ;Wicket.hideIncrementally('ind1');}.bind(this));"
    );
}

#[test]
fn test_blank_indicator_is_ignored() {
    let component = ComponentNode::new("link");
    let request = CallRequest::new(PARTIAL).with_indicator_id("  ");
    let script = compose(&component, &request);
    assert!(!script.contains("Incrementally"));
}

#[test]
fn test_no_indicator_no_show_or_hide() {
    let component = ComponentNode::new("link");
    let channel = Channel::new("lane");
    let request = CallRequest::new(PARTIAL)
        .with_success_script("a();")
        .with_precondition("return true;")
        .with_channel(&channel);
    let script = compose(&component, &request);
    assert!(!script.contains("showIncrementally"));
    assert!(!script.contains("hideIncrementally"));
}

#[test]
fn test_precondition_without_indicator_embedded_once() {
    let component = ComponentNode::new("link");
    let precondition = "return Wicket.$('link') != null;";
    let request = CallRequest::new(PARTIAL).with_precondition(precondition);
    let script = compose(&component, &request);

    assert_eq!(script.matches(precondition).count(), 1);
    assert!(script.ends_with(", function() {return Wicket.$('link') != null;}.bind(this));"));
}

#[test]
fn test_precondition_with_indicator() {
    let component = ComponentNode::new("link");
    let request = CallRequest::new(PARTIAL)
        .with_precondition("return ok;")
        .with_indicator_id("busy");
    let script = compose(&component, &request);

    let (show_guard, call) = script.split_once("var wcall=").unwrap();
    assert_eq!(
        show_guard,
        "if (function(){return ok;}.bind(this)()) { Wicket.showIncrementally('busy');}"
    );
    // Revert check plus return value
    assert_eq!(call.matches("return ok;").count(), 2);
    assert!(call.ends_with(
        ", function() {if (!function() {return ok;}.bind(this)()) \
         {Wicket.hideIncrementally('busy');}return ok;}.bind(this));"
    ));
}

#[test]
fn test_channel_without_precondition_reserves_null() {
    let component = ComponentNode::new("link");
    let channel = Channel::new("autocomplete");
    let request = CallRequest::new(PARTIAL).with_channel(&channel);
    let script = compose(&component, &request);
    assert!(script.ends_with("}.bind(this), null, 'autocomplete');"));
}

#[test]
fn test_channel_after_precondition() {
    let component = ComponentNode::new("link");
    let channel = Channel::new("autocomplete");
    let request = CallRequest::new(PARTIAL)
        .with_precondition("return true;")
        .with_channel(&channel);
    let script = compose(&component, &request);
    assert!(!script.contains("null"));
    assert!(script.ends_with(", function() {return true;}.bind(this), 'autocomplete');"));
}

#[test]
fn test_decoration_order_around_indicator_hide() {
    let component = ComponentNode::new("link");
    let recorder = Recorder::default();
    let request = CallRequest::new(PARTIAL)
        .with_success_script("s();")
        .with_failure_script("f();")
        .with_indicator_id("busy")
        .with_decorator(&recorder);
    let script = compose(&component, &request);

    let seen = recorder.seen.borrow();
    assert_eq!(seen.len(), 3);
    // Success is decorated before the hide is appended
    assert_eq!(seen[0], ("success", "s();".to_string()));
    // Failure is decorated after the hide is appended
    assert_eq!(
        seen[1],
        ("failure", "f();;Wicket.hideIncrementally('busy');".to_string())
    );
    assert_eq!(seen[2].0, "script");

    assert!(script.contains("function() { s();ok();;Wicket.hideIncrementally('busy');}"));
    assert!(script.contains("function() { f();;Wicket.hideIncrementally('busy');fail();}"));
}

#[test]
fn test_decorate_script_sees_full_script_and_is_last() {
    let component = ComponentNode::new("link");
    let recorder = Recorder::default();
    let request = CallRequest::new(PARTIAL)
        .with_indicator_id("busy")
        .with_decorator(&recorder);
    let script = compose(&component, &request);

    let seen = recorder.seen.borrow();
    let (hook, received) = &seen[2];
    assert_eq!(*hook, "script");
    assert!(received.starts_with("if (true) { Wicket.showIncrementally('busy');}"));
    assert_eq!(script, format!("/*timed*/{received}"));
}

#[test]
fn test_compose_is_deterministic() {
    let component = ComponentNode::new("link");
    let channel = Channel::new("c");
    let request = CallRequest::new(PARTIAL)
        .with_success_script("a();")
        .with_precondition("return x;")
        .with_indicator_id("i")
        .with_channel(&channel);
    assert_eq!(compose(&component, &request), compose(&component, &request));
}
