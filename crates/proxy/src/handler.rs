//! crates/proxy/src/handler.rs
//! Handler types a proxy dispatches intercepted calls to.

use std::fmt;
use std::rc::Rc;

use serde_json::Value;
use sink::Console;

use crate::invocation::Invocation;

/// An invocation-aware handler.
#[derive(Clone)]
pub struct Handler(Rc<dyn Fn(&Invocation<'_>) -> Value>);

impl Handler {
    /// Wraps a closure as a handler.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Invocation<'_>) -> Value + 'static,
    {
        Self(Rc::new(f))
    }

    /// A handler that forwards every invocation to its original function.
    #[must_use]
    pub fn passthrough() -> Self {
        Self::new(|invocation| invocation.proceed())
    }

    /// Runs the handler.
    pub fn invoke(&self, invocation: &Invocation<'_>) -> Value {
        (self.0)(invocation)
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Handler(..)")
    }
}

/// What a proxy does with calls that have no per-operation handler.
#[derive(Clone, Debug, Default)]
pub enum DefaultHandler {
    /// Forward to the original function.
    #[default]
    Passthrough,
    /// Hand the invocation to a handler.
    Invocation(Handler),
    /// Call the replacement bound for the operation with the raw arguments;
    /// operations the table does not bind pass through.
    Replacements(Console),
}

impl DefaultHandler {
    /// Builds a [`DefaultHandler::Invocation`] from a closure.
    pub fn handler<F>(f: F) -> Self
    where
        F: Fn(&Invocation<'_>) -> Value + 'static,
    {
        Self::Invocation(Handler::new(f))
    }

    /// Builds a [`DefaultHandler::Replacements`] from a binding table.
    #[must_use]
    pub const fn replacements(console: Console) -> Self {
        Self::Replacements(console)
    }

    pub(crate) fn dispatch(&self, invocation: &Invocation<'_>) -> Value {
        match self {
            Self::Passthrough => invocation.proceed(),
            Self::Invocation(handler) => handler.invoke(invocation),
            Self::Replacements(console) => console
                .call(invocation.target_fn_name(), invocation.args())
                .unwrap_or_else(|| invocation.proceed()),
        }
    }
}

impl From<Handler> for DefaultHandler {
    fn from(handler: Handler) -> Self {
        Self::Invocation(handler)
    }
}

impl From<Console> for DefaultHandler {
    fn from(console: Console) -> Self {
        Self::Replacements(console)
    }
}

impl From<Option<Handler>> for DefaultHandler {
    fn from(handler: Option<Handler>) -> Self {
        handler.map_or(Self::Passthrough, Self::Invocation)
    }
}
