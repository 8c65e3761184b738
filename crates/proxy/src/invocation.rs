//! crates/proxy/src/invocation.rs
//! The record handed to a handler for each intercepted call.

use serde_json::Value;
use sink::{Console, ConsoleFn, OperationName};

/// One intercepted call.
///
/// An invocation borrows everything it describes and lives only for the
/// duration of the call that produced it. `target` and `target_fn` come from
/// the snapshot the proxy took at construction, never from the live console,
/// so [`Invocation::proceed`] always reaches the original function even
/// while the proxy is installed in the live console's place.
#[derive(Clone, Copy, Debug)]
pub struct Invocation<'a> {
    target: &'a Console,
    target_fn: &'a ConsoleFn,
    target_fn_name: OperationName,
    args: &'a [Value],
}

impl<'a> Invocation<'a> {
    pub(crate) const fn new(
        target: &'a Console,
        target_fn: &'a ConsoleFn,
        target_fn_name: OperationName,
        args: &'a [Value],
    ) -> Self {
        Self {
            target,
            target_fn,
            target_fn_name,
            args,
        }
    }

    /// The snapshot of the target console's original bindings.
    #[must_use]
    pub const fn target(&self) -> &'a Console {
        self.target
    }

    /// The original function for the invoked operation.
    #[must_use]
    pub const fn target_fn(&self) -> &'a ConsoleFn {
        self.target_fn
    }

    /// The invoked operation.
    #[must_use]
    pub const fn target_fn_name(&self) -> OperationName {
        self.target_fn_name
    }

    /// The call's arguments, in order.
    #[must_use]
    pub const fn args(&self) -> &'a [Value] {
        self.args
    }

    /// Forwards the call unchanged to the original function.
    pub fn proceed(&self) -> Value {
        self.target_fn.call(self.args)
    }
}
