//! crates/render/src/entry.rs

use serde_json::Value;
use sink::{LogLevel, join_args};

/// One severity-level call captured for rendering.
#[derive(Clone, Debug, PartialEq)]
pub struct LogEntry {
    /// Severity the call was made at.
    pub level: LogLevel,
    /// The call's arguments, in order.
    pub args: Vec<Value>,
}

impl LogEntry {
    /// Builds an entry from a level and its arguments.
    #[must_use]
    pub const fn new(level: LogLevel, args: Vec<Value>) -> Self {
        Self { level, args }
    }

    /// The arguments joined with single spaces.
    #[must_use]
    pub fn message(&self) -> String {
        join_args(&self.args)
    }

    /// The level name in upper case, as in `WARN`.
    #[must_use]
    pub fn level_upper(&self) -> String {
        self.level.as_str().to_ascii_uppercase()
    }
}
