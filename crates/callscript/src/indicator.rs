//! Busy indicator lookup
//!
//! The first owner found wins: the call-site component, then the behavior
//! performing the call, then the call site's ancestors from the nearest
//! parent upward. Owners are never merged.

use log::trace;

use crate::component::{Component, IndicatorAware};


/// Find the markup id of the indicator that applies to a call.
///
/// Returns `None` when neither the call site, the behavior nor any ancestor
/// owns an indicator.
pub fn find_indicator_id(
    call_site: &dyn Component,
    behavior: Option<&dyn IndicatorAware>,
) -> Option<String> {
    if let Some(owner) = call_site.indicator() {
        trace!("Indicator owned by call site '{}'", call_site.markup_id());
        return Some(owner.indicator_markup_id());
    }

    if let Some(owner) = behavior {
        trace!("Indicator owned by behavior of '{}'", call_site.markup_id());
        return Some(owner.indicator_markup_id());
    }

    let mut cursor = call_site.parent();
    while let Some(ancestor) = cursor {
        if let Some(owner) = ancestor.indicator() {
            trace!(
                "Indicator for '{}' inherited from ancestor '{}'",
                call_site.markup_id(),
                ancestor.markup_id()
            );
            return Some(owner.indicator_markup_id());
        }
        cursor = ancestor.parent();
    }

    None
}
