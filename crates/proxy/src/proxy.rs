//! crates/proxy/src/proxy.rs
//! The interception proxy and its dispatch path.

use std::cell::RefCell;
use std::rc::Rc;

use serde_json::Value;
use sink::{Console, ConsoleFn, OperationName, SharedConsole, global_console};

use crate::error::ProxyError;
use crate::handler::{DefaultHandler, Handler};
use crate::invocation::Invocation;
use crate::token::UnregisterToken;

const PROXY_TARGET: &str = "console_redirect::proxy";

#[derive(Clone)]
struct Registration {
    id: u64,
    handler: Handler,
}

#[derive(Default)]
struct HandlerState {
    handlers: [Option<Registration>; OperationName::COUNT],
    default: DefaultHandler,
    next_id: u64,
}

pub(crate) struct ProxyInner {
    target: SharedConsole,
    snapshot: Console,
    state: RefCell<HandlerState>,
}

impl ProxyInner {
    fn dispatch(&self, op: OperationName, args: &[Value]) -> Value {
        // Resolve under a short borrow so handlers may reconfigure the proxy.
        let resolved = {
            let state = self.state.borrow();
            state.handlers[op.index()].as_ref().map_or_else(
                || state.default.clone(),
                |registration| DefaultHandler::Invocation(registration.handler.clone()),
            )
        };

        let Some(target_fn) = self.snapshot.get(op) else {
            // Substitutes are only built for operations in the snapshot.
            return Value::Null;
        };
        let invocation = Invocation::new(&self.snapshot, target_fn, op, args);
        resolved.dispatch(&invocation)
    }

    pub(crate) fn remove_handler(&self, op: OperationName, id: u64) -> bool {
        let mut state = self.state.borrow_mut();
        let slot = &mut state.handlers[op.index()];
        if slot.as_ref().is_some_and(|registration| registration.id == id) {
            *slot = None;
            tracing::debug!(target: PROXY_TARGET, operation = op.as_str(), "handler removed");
            true
        } else {
            false
        }
    }
}

/// Stands in for a console and routes each call through handlers.
///
/// At construction the proxy snapshots the target's bindings and builds one
/// substitute [`ConsoleFn`] for every registered operation the target binds.
/// Operations the target does not bind are absent from the proxy. Each
/// substitute resolves the per-operation handler for its operation, falling
/// back to the current [`DefaultHandler`], and passes it an [`Invocation`]
/// built from the snapshot.
///
/// Cloning a proxy yields another handle to the same handlers and
/// substitutes.
///
/// ```
/// use serde_json::{Value, json};
/// use proxy::{ConsoleProxy, Handler};
/// use sink::{Console, ConsoleFn, OperationName, SharedConsole};
///
/// let target = SharedConsole::new(
///     Console::new().with(OperationName::Log, ConsoleFn::from_fn(|_| unreachable!())),
/// );
/// let proxy = ConsoleProxy::passthrough(&target);
/// assert!(proxy.contains(OperationName::Log));
/// assert!(!proxy.contains(OperationName::Warn));
///
/// proxy
///     .set_function_handler(OperationName::Log, Handler::new(|inv| json!(inv.args().len())))
///     .unwrap();
/// assert_eq!(proxy.log(&[json!(1), json!(2)]), Some(json!(2)));
/// ```
#[derive(Clone)]
pub struct ConsoleProxy {
    inner: Rc<ProxyInner>,
    functions: Console,
}

impl ConsoleProxy {
    /// Builds a proxy over `target` with the given default handler.
    pub fn new(target: &SharedConsole, default: impl Into<DefaultHandler>) -> Self {
        let snapshot = target.snapshot();
        let inner = Rc::new(ProxyInner {
            target: target.clone(),
            snapshot,
            state: RefCell::new(HandlerState {
                default: default.into(),
                ..HandlerState::default()
            }),
        });

        let functions = inner
            .snapshot
            .operations()
            .map(|op| {
                let inner = Rc::clone(&inner);
                (op, ConsoleFn::new(move |args: &[Value]| inner.dispatch(op, args)))
            })
            .collect::<Console>();

        tracing::debug!(
            target: PROXY_TARGET,
            operations = functions.len(),
            "console proxy created"
        );

        Self { inner, functions }
    }

    /// Builds a proxy over `target` that passes everything through.
    #[must_use]
    pub fn passthrough(target: &SharedConsole) -> Self {
        Self::new(target, DefaultHandler::Passthrough)
    }

    /// Builds a passthrough proxy over this thread's ambient console.
    #[must_use]
    pub fn global() -> Self {
        Self::passthrough(&global_console())
    }

    /// Replaces the default handler.
    ///
    /// Calls already in flight keep the default they resolved.
    pub fn set_default_handler(&self, handler: impl Into<DefaultHandler>) {
        self.inner.state.borrow_mut().default = handler.into();
    }

    /// Resets the default handler to passthrough.
    pub fn reset_default_handler(&self) {
        self.set_default_handler(DefaultHandler::Passthrough);
    }

    /// Registers `handler` for the operation called `name`.
    ///
    /// Fails with [`ProxyError::InvalidOperation`] unless the live target
    /// console binds `name` at the time of the call. A later registration for
    /// the same operation replaces this one.
    ///
    /// An operation the target gained after the proxy was built can be
    /// registered but is never dispatched, since the proxy has no substitute
    /// for it.
    pub fn set_function_handler(
        &self,
        name: impl AsRef<str>,
        handler: Handler,
    ) -> Result<UnregisterToken, ProxyError> {
        let name = name.as_ref();
        let op = name
            .parse::<OperationName>()
            .ok()
            .filter(|op| self.inner.target.contains(*op))
            .ok_or_else(|| ProxyError::InvalidOperation {
                name: name.to_string(),
            })?;

        let id = {
            let mut state = self.inner.state.borrow_mut();
            let id = state.next_id;
            state.next_id += 1;
            state.handlers[op.index()] = Some(Registration { id, handler });
            id
        };
        if self.functions.contains(op) {
            tracing::debug!(target: PROXY_TARGET, operation = op.as_str(), "handler registered");
        } else {
            tracing::debug!(
                target: PROXY_TARGET,
                operation = op.as_str(),
                "handler registered for an operation the proxy does not expose"
            );
        }

        Ok(UnregisterToken::new(Rc::downgrade(&self.inner), op, id))
    }

    /// Reports whether a per-operation handler is registered for `op`.
    #[must_use]
    pub fn has_function_handler(&self, op: OperationName) -> bool {
        self.inner.state.borrow().handlers[op.index()].is_some()
    }

    /// The live target console as supplied at construction.
    #[must_use]
    pub fn target_console(&self) -> &SharedConsole {
        &self.inner.target
    }

    /// The target's bindings as captured when the proxy was built.
    ///
    /// Passthrough calls go to these functions, and swapping the proxy back
    /// out of its target restores them.
    #[must_use]
    pub fn original(&self) -> &Console {
        &self.inner.snapshot
    }

    /// The proxy's substitute functions.
    #[must_use]
    pub fn functions(&self) -> &Console {
        &self.functions
    }

    /// The substitute function for `op`, if the proxy exposes it.
    #[must_use]
    pub fn get(&self, op: OperationName) -> Option<&ConsoleFn> {
        self.functions.get(op)
    }

    /// Reports whether the proxy exposes `op`.
    #[must_use]
    pub fn contains(&self, op: OperationName) -> bool {
        self.functions.contains(op)
    }

    /// Calls the substitute for `op`; `None` when the proxy does not expose it.
    pub fn call(&self, op: OperationName, args: &[Value]) -> Option<Value> {
        self.functions.call(op, args)
    }

    /// Calls the substitute for `log`.
    pub fn log(&self, args: &[Value]) -> Option<Value> {
        self.call(OperationName::Log, args)
    }

    /// Calls the substitute for `info`.
    pub fn info(&self, args: &[Value]) -> Option<Value> {
        self.call(OperationName::Info, args)
    }

    /// Calls the substitute for `warn`.
    pub fn warn(&self, args: &[Value]) -> Option<Value> {
        self.call(OperationName::Warn, args)
    }

    /// Calls the substitute for `debug`.
    pub fn debug(&self, args: &[Value]) -> Option<Value> {
        self.call(OperationName::Debug, args)
    }

    /// Calls the substitute for `error`.
    pub fn error(&self, args: &[Value]) -> Option<Value> {
        self.call(OperationName::Error, args)
    }
}

impl std::fmt::Debug for ConsoleProxy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsoleProxy")
            .field("operations", &self.functions.operations().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}
