//! Request-ordering channels
//!
//! A channel names a client-side lane. Calls sharing a lane are ordered or
//! collapsed by the client runtime; the composer only emits the name.

use serde::Deserialize;

/// Named lane used by the client runtime to order concurrent calls
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
pub struct Channel {
    name: String,
}

impl Channel {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Name emitted as the channel argument of the client call
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}
