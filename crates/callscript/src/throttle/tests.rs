//! Tests for the throttle wrapper

use std::time::Duration;

use pretty_assertions::assert_eq;

use super::*;

#[test]
fn test_wraps_script() {
    let wrapped = throttle_script("doThing();", "k", Some(Duration::from_millis(1000))).unwrap();
    assert_eq!(
        wrapped,
        "wicketThrottler.throttle( 'k', 1000, function() { doThing();}.bind(this));"
    );
}

#[test]
fn test_zero_delay_is_accepted() {
    let wrapped = throttle_script("doThing();", "k", Some(Duration::ZERO)).unwrap();
    assert!(wrapped.contains("'k', 0,"));
}

#[test]
fn test_rejects_empty_throttle_id() {
    let err = throttle_script("doThing();", "", Some(Duration::ZERO)).unwrap_err();
    assert!(err.to_string().contains("throttleId"));
}

#[test]
fn test_rejects_blank_script() {
    let err = throttle_script("   ", "k", Some(Duration::from_secs(1))).unwrap_err();
    assert!(err.to_string().contains("'script'"));
}

#[test]
fn test_rejects_missing_delay() {
    let err = throttle_script("doThing();", "k", None).unwrap_err();
    assert!(err.to_string().contains("throttleDelay"));
}
