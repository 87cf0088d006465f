//! Lifecycle events
//!
//! Events are explicit and typed; the string form goes into the `event`
//! field of the log line.

use std::fmt;

/// Observable lifecycle events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Configuration loaded and validated
    ConfigLoaded,
    /// Persisted collections loaded
    StoreLoaded,
    /// Persisted collections could not be loaded; serving from memory
    StoreLoadFailed,
    /// Listener bound, serving requests
    ServerStart,
    /// Graceful shutdown finished
    ServerStop,
}

impl Event {
    /// Returns the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::StoreLoaded => "STORE_LOADED",
            Event::StoreLoadFailed => "STORE_LOAD_FAILED",
            Event::ServerStart => "SERVER_START",
            Event::ServerStop => "SERVER_STOP",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
