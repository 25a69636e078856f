//! Client-side throttling of script fragments
//!
//! A throttled fragment runs at most once per delay window no matter how
//! often it is triggered, e.g. an Ajax call bound to `onkeypress`. Throttle
//! state lives in the client runtime and is keyed by the throttle id, so the
//! id should stay constant for the same fragment.

use std::time::Duration;

use anyhow::{Result, bail, ensure};

use crate::protocol::THROTTLE_FN;

#[cfg(test)]
mod tests;

/// Wrap `script` so that it executes at most once within `throttle_delay`.
///
/// Rejects a blank `script` or `throttle_id` and an absent delay.
pub fn throttle_script(
    script: &str,
    throttle_id: &str,
    throttle_delay: Option<Duration>,
) -> Result<String> {
    ensure!(
        !script.trim().is_empty(),
        "Argument 'script' may not be null or empty."
    );
    ensure!(
        !throttle_id.trim().is_empty(),
        "Argument 'throttleId' may not be null or empty."
    );
    let Some(delay) = throttle_delay else {
        bail!("Argument 'throttleDelay' may not be null.");
    };

    Ok(format!(
        "{THROTTLE_FN}( '{throttle_id}', {}, function() {{ {script}}}.bind(this));",
        delay.as_millis()
    ))
}
