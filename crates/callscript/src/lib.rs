//! Composition of client-side Ajax callback scripts
//!
//! Given a partial call expression and the optional behaviors attached to a
//! call (completion handlers, busy indicator, precondition, channel and a
//! decorator chain), [`composer::compose`] produces a single statement for the
//! client runtime. Everything here is pure string assembly: no I/O and no
//! shared state, so composition can run concurrently for independent
//! requests.

pub mod behavior;
pub mod call_descriptor;
pub mod chain;
pub mod channel;
pub mod component;
pub mod composer;
pub mod config;
pub mod decorator;
pub mod header;
pub mod indicator;
pub mod protocol;
pub mod request;
pub mod throttle;

pub use behavior::{AjaxBehavior, AjaxSettings, CallbackBehavior};
pub use composer::{CallRequest, compose};
pub use throttle::throttle_script;
