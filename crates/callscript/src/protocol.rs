//! Names agreed with the client runtime
//!
//! Every identifier here is emitted verbatim into page scripts. An unmodified
//! client runtime looks these names up, so none of them may change.

/// Variable that holds the result of the Ajax call function
pub const CALL_RESULT_VAR: &str = "wcall";

/// Client function that shows a busy indicator, incrementing its usage count
pub const SHOW_INDICATOR_FN: &str = "Wicket.showIncrementally";

/// Client function that hides a busy indicator, decrementing its usage count
pub const HIDE_INDICATOR_FN: &str = "Wicket.hideIncrementally";

/// Client throttling primitive: `throttle(id, delayMs, fn)`
pub const THROTTLE_FN: &str = "wicketThrottler.throttle";

/// Client entry point performing an Ajax GET request
pub const AJAX_GET_FN: &str = "wicketAjaxGet";

/// Client element lookup by markup id
pub const ELEMENT_LOOKUP_FN: &str = "Wicket.$";

/// Script reference for the client event support library
pub const EVENT_JS_REFERENCE: &str = "wicket-event.js";

/// Script reference for the client Ajax runtime
pub const AJAX_JS_REFERENCE: &str = "wicket-ajax.js";

/// Script reference for the client Ajax debug window
pub const AJAX_DEBUG_JS_REFERENCE: &str = "wicket-ajax-debug.js";

/// Header script id of the debug switch
pub const AJAX_DEBUG_ENABLE_ID: &str = "wicket-ajax-debug-enable";

/// Header script id of the base url assignment
pub const AJAX_BASE_URL_ID: &str = "wicket-ajax-base-url";

/// Statement that shows the indicator with the given markup id
pub fn show_indicator(indicator_id: &str) -> String {
    format!("{SHOW_INDICATOR_FN}('{indicator_id}');")
}

/// Statement that hides the indicator with the given markup id
pub fn hide_indicator(indicator_id: &str) -> String {
    format!("{HIDE_INDICATOR_FN}('{indicator_id}');")
}

/// Partial GET call for `url`, missing its trailing arguments
pub fn ajax_get_partial_call(url: &str) -> String {
    format!("{AJAX_GET_FN}('{url}'")
}
