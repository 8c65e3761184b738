//! crates/sink/src/host.rs
//! Host console implementation backed by the tracing crate.
//!
//! The interception layer never implements logging itself; it needs a real
//! console to fall through to. This module provides one that turns every
//! registered operation into a tracing event, so applications that already
//! install a tracing subscriber see console output alongside their own
//! diagnostics.
//!
//! | Operation                                   | Tracing level |
//! |---------------------------------------------|---------------|
//! | `error`, `exception`, failed `assert`       | `ERROR`       |
//! | `warn`                                      | `WARN`        |
//! | `log`, `info`, `table`, `dir`, `dirxml`     | `INFO`        |
//! | `debug`                                     | `DEBUG`       |
//! | everything else                             | `TRACE`       |

use serde_json::Value;
use tracing::Level;

use crate::console::{Console, ConsoleFn, join_args};
use crate::registry::OperationName;

/// Tracing target used for events emitted by the host console.
pub const HOST_TARGET: &str = "console_redirect::host";

/// Maps an operation to the tracing level it is emitted at.
#[must_use]
pub const fn tracing_level(op: OperationName) -> Level {
    match op {
        OperationName::Error | OperationName::Exception | OperationName::Assert => Level::ERROR,
        OperationName::Warn => Level::WARN,
        OperationName::Log
        | OperationName::Info
        | OperationName::Table
        | OperationName::Dir
        | OperationName::Dirxml => Level::INFO,
        OperationName::Debug => Level::DEBUG,
        _ => Level::TRACE,
    }
}

fn emit(op: OperationName, args: &[Value]) {
    let operation = op.as_str();
    let message = join_args(args);
    match tracing_level(op) {
        Level::ERROR => tracing::error!(target: HOST_TARGET, operation, "{message}"),
        Level::WARN => tracing::warn!(target: HOST_TARGET, operation, "{message}"),
        Level::INFO => tracing::info!(target: HOST_TARGET, operation, "{message}"),
        Level::DEBUG => tracing::debug!(target: HOST_TARGET, operation, "{message}"),
        _ => tracing::trace!(target: HOST_TARGET, operation, "{message}"),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Builds a console that binds every registered operation to a tracing event.
///
/// `assert` only emits when its first argument is falsy, in which case the
/// remaining arguments form the message.
#[must_use]
pub fn tracing_console() -> Console {
    OperationName::ALL
        .into_iter()
        .map(|op| {
            let f = if op == OperationName::Assert {
                ConsoleFn::from_fn(|args: &[Value]| {
                    let holds = args.first().is_some_and(is_truthy);
                    if !holds {
                        let rest = args.get(1..).unwrap_or_default();
                        emit(OperationName::Assert, rest);
                    }
                })
            } else {
                ConsoleFn::from_fn(move |args: &[Value]| emit(op, args))
            };
            (op, f)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn binds_every_registered_operation() {
        let console = tracing_console();
        assert_eq!(console.len(), OperationName::COUNT);
    }

    #[test]
    fn severity_operations_map_to_matching_levels() {
        assert_eq!(tracing_level(OperationName::Error), Level::ERROR);
        assert_eq!(tracing_level(OperationName::Warn), Level::WARN);
        assert_eq!(tracing_level(OperationName::Info), Level::INFO);
        assert_eq!(tracing_level(OperationName::Log), Level::INFO);
        assert_eq!(tracing_level(OperationName::Debug), Level::DEBUG);
        assert_eq!(tracing_level(OperationName::Time), Level::TRACE);
    }

    #[test]
    fn truthiness_follows_console_rules() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!("")));
        assert!(is_truthy(&json!("x")));
        assert!(is_truthy(&json!([])));
        assert!(is_truthy(&json!(2.5)));
    }

    #[test]
    fn calls_return_null() {
        let console = tracing_console();
        assert_eq!(console.log(&[json!("hello")]), Some(Value::Null));
        assert_eq!(
            console.call(OperationName::Assert, &[json!(true), json!("never")]),
            Some(Value::Null)
        );
    }
}
