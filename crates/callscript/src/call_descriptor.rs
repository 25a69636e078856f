//! Structured form of the positional client call
//!
//! The client runtime signature is
//! `fn(url-or-partial, onSuccess, onFailure[, precondition[, channelName]])`.
//! Optional arguments are positional, so an absent precondition still has to
//! occupy its slot when a channel follows it. The descriptor keeps the slots
//! typed until [`CallDescriptor::render`] turns them into text.

use std::fmt::{self, Write};

use crate::protocol::CALL_RESULT_VAR;


/// A single trailing argument of the client call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgumentSlot {
    /// Completion handler, rendered as a bound function around the body
    Handler(String),
    /// Guard function whose body ends with a `return` statement
    Guard(String),
    /// Slot kept free for a later argument, rendered as `null`
    Reserved,
    /// String literal argument
    Quoted(String),
}

impl fmt::Display for ArgumentSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Handler(body) => write!(f, ",function() {{ {body}}}.bind(this)"),
            Self::Guard(body) => write!(f, ", function() {{{body}}}.bind(this)"),
            Self::Reserved => f.write_str(", null"),
            Self::Quoted(value) => write!(f, ", '{value}'"),
        }
    }
}

/// The complete client call, before serialization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallDescriptor {
    partial_call: String,
    on_success: String,
    on_failure: String,
    precondition: Option<String>,
    channel: Option<String>,
}

impl CallDescriptor {
    /// Create a call from a partial call expression and its two handlers
    pub fn new(
        partial_call: impl Into<String>,
        on_success: impl Into<String>,
        on_failure: impl Into<String>,
    ) -> Self {
        Self {
            partial_call: partial_call.into(),
            on_success: on_success.into(),
            on_failure: on_failure.into(),
            precondition: None,
            channel: None,
        }
    }

    /// Set the body of the guard function (fourth argument)
    #[must_use]
    pub fn with_precondition(mut self, body: impl Into<String>) -> Self {
        self.precondition = Some(body.into());
        self
    }

    /// Set the channel name (fifth argument)
    #[must_use]
    pub fn with_channel(mut self, name: impl Into<String>) -> Self {
        self.channel = Some(name.into());
        self
    }

    /// Trailing argument slots in positional order.
    ///
    /// An absent precondition is reserved only when a channel follows it;
    /// trailing absent slots are dropped.
    pub fn slots(&self) -> Vec<ArgumentSlot> {
        let mut slots = vec![
            ArgumentSlot::Handler(self.on_success.clone()),
            ArgumentSlot::Handler(self.on_failure.clone()),
        ];

        match (&self.precondition, &self.channel) {
            (Some(body), _) => slots.push(ArgumentSlot::Guard(body.clone())),
            (None, Some(_)) => slots.push(ArgumentSlot::Reserved),
            (None, None) => {}
        }

        if let Some(channel) = &self.channel {
            slots.push(ArgumentSlot::Quoted(channel.clone()));
        }

        slots
    }

    /// Serialize into a complete statement assigning the call result
    pub fn render(&self) -> String {
        let mut buff = String::with_capacity(256);
        // Writing into a String cannot fail
        let _ = write!(buff, "var {CALL_RESULT_VAR}={}", self.partial_call);
        for slot in self.slots() {
            let _ = write!(buff, "{slot}");
        }
        buff.push_str(");");
        buff
    }
}

impl fmt::Display for CallDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
