//! crates/sink/src/filter.rs
//! Console decorator that gates each severity level behind an enabled flag.

use std::cell::RefCell;
use std::rc::Rc;

use serde_json::Value;

use crate::config::{LevelEnablement, LevelSelector};
use crate::console::{Console, ConsoleFn, SharedConsole};
use crate::global::global_console;
use crate::registry::LogLevel;

/// Gates the five severity operations of a wrapped console.
///
/// The wrapped console's level functions are captured when the filter is
/// built. A call on an enabled level forwards its arguments unchanged to the
/// captured function; a call on a disabled level does nothing and yields
/// [`Value::Null`]. Levels the wrapped console does not bind are not exposed.
///
/// ```
/// use serde_json::json;
/// use sink::{Console, ConsoleFn, EnablementFilter, LogLevel, OperationName, SharedConsole};
///
/// let target = SharedConsole::new(
///     Console::new().with(OperationName::Warn, ConsoleFn::from_fn(|_| {})),
/// );
/// let filter = EnablementFilter::new(&target);
/// filter.set_level_enabled(LogLevel::Warn, false);
/// assert!(!filter.is_level_enabled(LogLevel::Warn));
/// assert_eq!(filter.warn(&[json!("dropped")]), Some(json!(null)));
/// ```
#[derive(Clone, Debug)]
pub struct EnablementFilter {
    enablement: Rc<RefCell<LevelEnablement>>,
    functions: Console,
}

impl EnablementFilter {
    /// Wraps `target` with every level enabled.
    #[must_use]
    pub fn new(target: &SharedConsole) -> Self {
        Self::with_config(&target.snapshot(), LevelEnablement::default())
    }

    /// Wraps this thread's ambient console.
    #[must_use]
    pub fn global() -> Self {
        Self::new(&global_console())
    }

    /// Wraps an explicit set of bindings with an initial configuration.
    #[must_use]
    pub fn with_config(target: &Console, config: LevelEnablement) -> Self {
        let enablement = Rc::new(RefCell::new(config));
        let functions = LogLevel::ALL
            .into_iter()
            .filter_map(|level| {
                let op = level.operation();
                let target_fn = target.get(op)?.clone();
                let enablement = Rc::clone(&enablement);
                let gated = ConsoleFn::new(move |args: &[Value]| {
                    let enabled = enablement.borrow().get(level);
                    if enabled {
                        target_fn.call(args)
                    } else {
                        Value::Null
                    }
                });
                Some((op, gated))
            })
            .collect();
        Self {
            enablement,
            functions,
        }
    }

    /// Enables or disables one level, or all of them.
    ///
    /// Takes effect for calls made after this returns.
    pub fn set_level_enabled(&self, selector: impl Into<LevelSelector>, enabled: bool) {
        let selector = selector.into();
        self.enablement.borrow_mut().apply(selector, enabled);
        tracing::debug!(
            target: "console_redirect::filter",
            ?selector,
            enabled,
            "level enablement changed"
        );
    }

    /// Enables or disables every level.
    pub fn set_all_levels_enabled(&self, enabled: bool) {
        self.set_level_enabled(LevelSelector::All, enabled);
    }

    /// Reports whether `level` is currently enabled.
    #[must_use]
    pub fn is_level_enabled(&self, level: LogLevel) -> bool {
        self.enablement.borrow().get(level)
    }

    /// Returns a copy of the current configuration.
    #[must_use]
    pub fn config(&self) -> LevelEnablement {
        *self.enablement.borrow()
    }

    /// Replaces the whole configuration.
    pub fn set_config(&self, config: LevelEnablement) {
        *self.enablement.borrow_mut() = config;
    }

    /// The gated operations as a binding table.
    ///
    /// The table can serve as a proxy target or as a replacement map for a
    /// proxy's default handler.
    #[must_use]
    pub fn functions(&self) -> &Console {
        &self.functions
    }

    /// Calls the gated `level` operation; `None` when the wrapped console
    /// does not bind it.
    pub fn call(&self, level: LogLevel, args: &[Value]) -> Option<Value> {
        self.functions.call(level.operation(), args)
    }

    /// Gated `log`.
    pub fn log(&self, args: &[Value]) -> Option<Value> {
        self.call(LogLevel::Log, args)
    }

    /// Gated `info`.
    pub fn info(&self, args: &[Value]) -> Option<Value> {
        self.call(LogLevel::Info, args)
    }

    /// Gated `warn`.
    pub fn warn(&self, args: &[Value]) -> Option<Value> {
        self.call(LogLevel::Warn, args)
    }

    /// Gated `debug`.
    pub fn debug(&self, args: &[Value]) -> Option<Value> {
        self.call(LogLevel::Debug, args)
    }

    /// Gated `error`.
    pub fn error(&self, args: &[Value]) -> Option<Value> {
        self.call(LogLevel::Error, args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::OperationName;
    use serde_json::json;

    type Calls = Rc<RefCell<Vec<(OperationName, Vec<Value>)>>>;

    fn recording_console() -> (SharedConsole, Calls) {
        let calls: Calls = Rc::default();
        let console = OperationName::ALL
            .into_iter()
            .map(|op| {
                let calls = Rc::clone(&calls);
                let f = ConsoleFn::from_fn(move |args| {
                    calls.borrow_mut().push((op, args.to_vec()));
                });
                (op, f)
            })
            .collect::<Console>();
        (SharedConsole::new(console), calls)
    }

    #[test]
    fn all_levels_enabled_per_default() {
        let (target, calls) = recording_console();
        let filter = EnablementFilter::new(&target);

        for level in LogLevel::ALL {
            let a = format!("{level}1");
            let b = format!("{level}2");
            filter.call(level, &[json!(a), json!(b)]);
        }

        let calls = calls.borrow();
        assert_eq!(calls.len(), 5);
        for ((op, args), level) in calls.iter().zip(LogLevel::ALL) {
            assert_eq!(*op, level.operation());
            assert_eq!(args, &vec![json!(format!("{level}1")), json!(format!("{level}2"))]);
        }
    }

    #[test]
    fn disabled_level_is_not_forwarded() {
        for level in LogLevel::ALL {
            let (target, calls) = recording_console();
            let filter = EnablementFilter::new(&target);
            filter.set_level_enabled(level, false);

            assert_eq!(filter.call(level, &[json!("x")]), Some(Value::Null));
            assert!(calls.borrow().is_empty(), "{level} should be dropped");
        }
    }

    #[test]
    fn reenabling_restores_exact_arguments() {
        let (target, calls) = recording_console();
        let filter = EnablementFilter::new(&target);
        filter.set_level_enabled(LogLevel::Warn, false);
        filter.warn(&[json!("lost")]);
        filter.set_level_enabled(LogLevel::Warn, true);
        filter.warn(&[json!("x"), json!("y")]);

        assert_eq!(
            *calls.borrow(),
            vec![(OperationName::Warn, vec![json!("x"), json!("y")])]
        );
    }

    #[test]
    fn disable_all_then_enable_one() {
        let (target, calls) = recording_console();
        let filter = EnablementFilter::new(&target);
        filter.set_all_levels_enabled(false);
        filter.set_level_enabled(LogLevel::Error, true);

        for level in LogLevel::ALL {
            filter.call(level, &[json!(level.as_str())]);
        }
        assert_eq!(
            *calls.borrow(),
            vec![(OperationName::Error, vec![json!("error")])]
        );
    }

    #[test]
    fn forwards_to_functions_captured_at_construction() {
        let (target, calls) = recording_console();
        let filter = EnablementFilter::new(&target);
        target.set(OperationName::Log, ConsoleFn::from_fn(|_| panic!("rebound")));

        filter.log(&[json!("kept")]);
        assert_eq!(calls.borrow().len(), 1);
    }

    #[test]
    fn unbound_levels_are_not_exposed() {
        let target = SharedConsole::new(
            Console::new().with(OperationName::Log, ConsoleFn::from_fn(|_| {})),
        );
        let filter = EnablementFilter::new(&target);
        assert_eq!(filter.functions().len(), 1);
        assert_eq!(filter.warn(&[]), None);
    }

    #[test]
    fn returns_wrapped_result() {
        let target = SharedConsole::new(
            Console::new().with(OperationName::Info, ConsoleFn::new(|_| json!("done"))),
        );
        let filter = EnablementFilter::new(&target);
        assert_eq!(filter.info(&[]), Some(json!("done")));
    }

    #[test]
    fn config_can_be_swapped_wholesale() {
        let (target, _) = recording_console();
        let filter = EnablementFilter::with_config(
            &target.snapshot(),
            LevelEnablement::from_tokens("all0,debug").unwrap(),
        );
        assert!(filter.is_level_enabled(LogLevel::Debug));
        assert!(!filter.is_level_enabled(LogLevel::Log));
        filter.set_config(LevelEnablement::default());
        assert_eq!(filter.config(), LevelEnablement::default());
    }
}
