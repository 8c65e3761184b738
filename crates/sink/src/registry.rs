//! crates/sink/src/registry.rs
//! The closed set of console operations that can be bound and intercepted.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// A console operation recognised by the interception layer.
///
/// The variant order is the registry order; every component that wires up
/// bindings walks [`OperationName::ALL`] front to back.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum OperationName {
    /// Conditional error output.
    Assert,
    /// Clears the output.
    Clear,
    /// Increments and prints a labelled counter.
    Count,
    /// Resets a labelled counter.
    CountReset,
    /// Debug severity output.
    Debug,
    /// Structured listing of a value.
    Dir,
    /// Markup listing of a value.
    Dirxml,
    /// Error severity output.
    Error,
    /// Alias of error output.
    Exception,
    /// Opens an indented group.
    Group,
    /// Opens a collapsed group.
    GroupCollapsed,
    /// Closes the innermost group.
    GroupEnd,
    /// Info severity output.
    Info,
    /// Plain log output.
    Log,
    /// Starts a profile.
    Profile,
    /// Stops a profile.
    ProfileEnd,
    /// Tabular output.
    Table,
    /// Starts a labelled timer.
    Time,
    /// Stops a labelled timer.
    TimeEnd,
    /// Prints a labelled timer without stopping it.
    TimeLog,
    /// Adds a marker to the timeline.
    TimeStamp,
    /// Prints a stack trace.
    Trace,
    /// Warning severity output.
    Warn,
}

impl OperationName {
    /// Number of operations in the registry.
    pub const COUNT: usize = 23;

    /// Every operation, in registry order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Assert,
        Self::Clear,
        Self::Count,
        Self::CountReset,
        Self::Debug,
        Self::Dir,
        Self::Dirxml,
        Self::Error,
        Self::Exception,
        Self::Group,
        Self::GroupCollapsed,
        Self::GroupEnd,
        Self::Info,
        Self::Log,
        Self::Profile,
        Self::ProfileEnd,
        Self::Table,
        Self::Time,
        Self::TimeEnd,
        Self::TimeLog,
        Self::TimeStamp,
        Self::Trace,
        Self::Warn,
    ];

    /// Returns the operation's wire name as the host console spells it.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Assert => "assert",
            Self::Clear => "clear",
            Self::Count => "count",
            Self::CountReset => "countReset",
            Self::Debug => "debug",
            Self::Dir => "dir",
            Self::Dirxml => "dirxml",
            Self::Error => "error",
            Self::Exception => "exception",
            Self::Group => "group",
            Self::GroupCollapsed => "groupCollapsed",
            Self::GroupEnd => "groupEnd",
            Self::Info => "info",
            Self::Log => "log",
            Self::Profile => "profile",
            Self::ProfileEnd => "profileEnd",
            Self::Table => "table",
            Self::Time => "time",
            Self::TimeEnd => "timeEnd",
            Self::TimeLog => "timeLog",
            Self::TimeStamp => "timeStamp",
            Self::Trace => "trace",
            Self::Warn => "warn",
        }
    }

    /// Position of the operation within [`OperationName::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the severity level for the five severity operations.
    #[must_use]
    pub const fn log_level(self) -> Option<LogLevel> {
        match self {
            Self::Log => Some(LogLevel::Log),
            Self::Info => Some(LogLevel::Info),
            Self::Warn => Some(LogLevel::Warn),
            Self::Debug => Some(LogLevel::Debug),
            Self::Error => Some(LogLevel::Error),
            _ => None,
        }
    }
}

impl fmt::Display for OperationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for OperationName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Error returned when a string does not name a registered operation.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("unknown console operation: {name}")]
pub struct UnknownOperation {
    /// The rejected name.
    pub name: String,
}

impl FromStr for OperationName {
    type Err = UnknownOperation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| UnknownOperation {
                name: s.to_string(),
            })
    }
}

/// Returns the registry of interceptable operations.
///
/// The slice is a `'static` constant; nothing can reorder or extend it at
/// runtime.
#[must_use]
pub fn registry() -> &'static [OperationName] {
    &OperationName::ALL
}

/// Severity levels gated by the enablement filter and rendered by
/// interceptors.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum LogLevel {
    /// Plain log output.
    Log,
    /// Informational output.
    Info,
    /// Warnings.
    Warn,
    /// Debug output.
    Debug,
    /// Errors.
    Error,
}

impl LogLevel {
    /// Every level, in declaration order.
    pub const ALL: [Self; 5] = [Self::Log, Self::Info, Self::Warn, Self::Debug, Self::Error];

    /// Lowercase level name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        self.operation().as_str()
    }

    /// The console operation that emits this level.
    #[must_use]
    pub const fn operation(self) -> OperationName {
        match self {
            Self::Log => OperationName::Log,
            Self::Info => OperationName::Info,
            Self::Warn => OperationName::Warn,
            Self::Debug => OperationName::Debug,
            Self::Error => OperationName::Error,
        }
    }
}

impl From<LogLevel> for OperationName {
    fn from(level: LogLevel) -> Self {
        level.operation()
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = UnknownOperation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<OperationName>()
            .ok()
            .and_then(OperationName::log_level)
            .ok_or_else(|| UnknownOperation {
                name: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_order_is_stable() {
        let names: Vec<&str> = registry().iter().map(|op| op.as_str()).collect();
        assert_eq!(names.first(), Some(&"assert"));
        assert_eq!(names.last(), Some(&"warn"));
        assert_eq!(names.len(), OperationName::COUNT);
        for (position, op) in registry().iter().enumerate() {
            assert_eq!(op.index(), position);
        }
    }

    #[test]
    fn names_round_trip_through_from_str() {
        for op in OperationName::ALL {
            assert_eq!(op.as_str().parse::<OperationName>(), Ok(op));
        }
    }

    #[test]
    fn unknown_name_is_rejected() {
        let err = "foobar".parse::<OperationName>().unwrap_err();
        assert_eq!(err.name, "foobar");
        assert_eq!(err.to_string(), "unknown console operation: foobar");
    }

    #[test]
    fn names_are_case_sensitive() {
        assert!("countreset".parse::<OperationName>().is_err());
        assert_eq!(
            "countReset".parse::<OperationName>(),
            Ok(OperationName::CountReset)
        );
    }

    #[test]
    fn only_severity_operations_have_levels() {
        let levels: Vec<LogLevel> = registry()
            .iter()
            .filter_map(|op| op.log_level())
            .collect();
        assert_eq!(levels.len(), 5);
        for level in LogLevel::ALL {
            assert_eq!(level.operation().log_level(), Some(level));
        }
        assert_eq!(OperationName::Trace.log_level(), None);
    }

    #[test]
    fn log_level_parses_only_severities() {
        assert_eq!("warn".parse::<LogLevel>(), Ok(LogLevel::Warn));
        assert!("count".parse::<LogLevel>().is_err());
    }
}
