//! crates/sink/src/console.rs
//! Binding tables mapping console operations to callable functions.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use serde_json::Value;

use crate::registry::OperationName;

/// A bound console function.
///
/// Functions are reference counted; clones share one allocation and compare
/// equal under [`ConsoleFn::ptr_eq`]. Binding identity is what the swap
/// control inspects to decide whether a proxy is installed.
#[derive(Clone)]
pub struct ConsoleFn(Rc<dyn Fn(&[Value]) -> Value>);

impl ConsoleFn {
    /// Wraps a closure as a console function.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&[Value]) -> Value + 'static,
    {
        Self(Rc::new(f))
    }

    /// Wraps a closure that returns nothing; calls yield [`Value::Null`].
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&[Value]) + 'static,
    {
        Self::new(move |args| {
            f(args);
            Value::Null
        })
    }

    /// Invokes the function with `args`.
    pub fn call(&self, args: &[Value]) -> Value {
        (self.0)(args)
    }

    /// Reports whether both handles refer to the same function.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for ConsoleFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ConsoleFn")
            .field(&Rc::as_ptr(&self.0).cast::<()>())
            .finish()
    }
}

/// A console: one optional binding per registered operation.
///
/// A `Console` is a plain value. Cloning it copies the bindings while keeping
/// function identity, which is how snapshots of a live console are taken.
#[derive(Clone, Default)]
pub struct Console {
    slots: [Option<ConsoleFn>; OperationName::COUNT],
}

impl Console {
    /// Creates a console with no bound operations.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the function bound to `op`.
    #[must_use]
    pub fn get(&self, op: OperationName) -> Option<&ConsoleFn> {
        self.slots[op.index()].as_ref()
    }

    /// Reports whether `op` is bound.
    #[must_use]
    pub fn contains(&self, op: OperationName) -> bool {
        self.slots[op.index()].is_some()
    }

    /// Binds `op` to `f`, returning the previous binding.
    pub fn set(&mut self, op: OperationName, f: ConsoleFn) -> Option<ConsoleFn> {
        self.slots[op.index()].replace(f)
    }

    /// Removes the binding for `op`.
    pub fn remove(&mut self, op: OperationName) -> Option<ConsoleFn> {
        self.slots[op.index()].take()
    }

    /// Builder-style variant of [`Console::set`].
    #[must_use]
    pub fn with(mut self, op: OperationName, f: ConsoleFn) -> Self {
        self.set(op, f);
        self
    }

    /// Iterates over bound operations in registry order.
    pub fn operations(&self) -> impl Iterator<Item = OperationName> + '_ {
        OperationName::ALL
            .into_iter()
            .filter(|op| self.contains(*op))
    }

    /// Iterates over bound operations and their functions in registry order.
    pub fn iter(&self) -> impl Iterator<Item = (OperationName, &ConsoleFn)> + '_ {
        OperationName::ALL
            .into_iter()
            .filter_map(|op| self.get(op).map(|f| (op, f)))
    }

    /// Number of bound operations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Reports whether no operation is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Calls `op` with `args`; `None` when the operation is not bound.
    pub fn call(&self, op: OperationName, args: &[Value]) -> Option<Value> {
        self.get(op).map(|f| f.call(args))
    }

    /// Calls the `log` operation if bound.
    pub fn log(&self, args: &[Value]) -> Option<Value> {
        self.call(OperationName::Log, args)
    }

    /// Calls the `info` operation if bound.
    pub fn info(&self, args: &[Value]) -> Option<Value> {
        self.call(OperationName::Info, args)
    }

    /// Calls the `warn` operation if bound.
    pub fn warn(&self, args: &[Value]) -> Option<Value> {
        self.call(OperationName::Warn, args)
    }

    /// Calls the `debug` operation if bound.
    pub fn debug(&self, args: &[Value]) -> Option<Value> {
        self.call(OperationName::Debug, args)
    }

    /// Calls the `error` operation if bound.
    pub fn error(&self, args: &[Value]) -> Option<Value> {
        self.call(OperationName::Error, args)
    }
}

impl fmt::Debug for Console {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl FromIterator<(OperationName, ConsoleFn)> for Console {
    fn from_iter<I: IntoIterator<Item = (OperationName, ConsoleFn)>>(iter: I) -> Self {
        let mut console = Self::new();
        for (op, f) in iter {
            console.set(op, f);
        }
        console
    }
}

/// Shared, mutable handle to a live console.
///
/// This is the binding table that call sites hold on to and that the swap
/// control rebinds. Calls clone the bound function out before invoking it, so
/// a running function may rebind the table without a borrow conflict.
#[derive(Clone, Default)]
pub struct SharedConsole(Rc<RefCell<Console>>);

impl SharedConsole {
    /// Wraps `console` in a new shared handle.
    #[must_use]
    pub fn new(console: Console) -> Self {
        Self(Rc::new(RefCell::new(console)))
    }

    /// Copies the current bindings.
    #[must_use]
    pub fn snapshot(&self) -> Console {
        self.0.borrow().clone()
    }

    /// Returns the function currently bound to `op`.
    #[must_use]
    pub fn get(&self, op: OperationName) -> Option<ConsoleFn> {
        self.0.borrow().get(op).cloned()
    }

    /// Reports whether `op` is currently bound.
    #[must_use]
    pub fn contains(&self, op: OperationName) -> bool {
        self.0.borrow().contains(op)
    }

    /// Rebinds `op`, returning the previous binding.
    pub fn set(&self, op: OperationName, f: ConsoleFn) -> Option<ConsoleFn> {
        self.0.borrow_mut().set(op, f)
    }

    /// Removes the binding for `op`.
    pub fn remove(&self, op: OperationName) -> Option<ConsoleFn> {
        self.0.borrow_mut().remove(op)
    }

    /// Replaces every binding at once, returning the previous table.
    pub fn replace(&self, console: Console) -> Console {
        self.0.replace(console)
    }

    /// Calls whatever is currently bound to `op`.
    pub fn call(&self, op: OperationName, args: &[Value]) -> Option<Value> {
        let f = self.get(op)?;
        Some(f.call(args))
    }

    /// Calls the currently bound `log` operation.
    pub fn log(&self, args: &[Value]) -> Option<Value> {
        self.call(OperationName::Log, args)
    }

    /// Calls the currently bound `info` operation.
    pub fn info(&self, args: &[Value]) -> Option<Value> {
        self.call(OperationName::Info, args)
    }

    /// Calls the currently bound `warn` operation.
    pub fn warn(&self, args: &[Value]) -> Option<Value> {
        self.call(OperationName::Warn, args)
    }

    /// Calls the currently bound `debug` operation.
    pub fn debug(&self, args: &[Value]) -> Option<Value> {
        self.call(OperationName::Debug, args)
    }

    /// Calls the currently bound `error` operation.
    pub fn error(&self, args: &[Value]) -> Option<Value> {
        self.call(OperationName::Error, args)
    }

    /// Reports whether both handles refer to the same live console.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl From<Console> for SharedConsole {
    fn from(console: Console) -> Self {
        Self::new(console)
    }
}

impl fmt::Debug for SharedConsole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SharedConsole").field(&*self.0.borrow()).finish()
    }
}

/// Renders call arguments the way console output joins them: strings
/// verbatim, other values as JSON, separated by single spaces.
#[must_use]
pub fn join_args(args: &[Value]) -> String {
    let mut out = String::new();
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        match arg {
            Value::String(s) => out.push_str(s),
            Value::Null => {}
            other => out.push_str(&other.to_string()),
        }
    }
    out
}
