//! crates/control/src/control.rs
//! Swap control and scoped executor over a console proxy.

use std::rc::Rc;

use proxy::ConsoleProxy;
use sink::SharedConsole;

use crate::guard::ProxyGuard;

const CONTROL_TARGET: &str = "console_redirect::control";

#[derive(Debug)]
struct ControlInner {
    proxy: ConsoleProxy,
    target: SharedConsole,
}

/// Installs a proxy into its target console's bindings and restores them.
///
/// Every restore rebinds the proxy-exposed operations to the functions the
/// proxy captured when it was built ([`ConsoleProxy::original`]), no matter
/// when the control itself was created. Bindings changed by other code in the
/// meantime are not tracked and will be overwritten by a restore.
///
/// Cloning a control yields another handle to the same proxy and snapshot.
#[derive(Clone, Debug)]
pub struct ProxyControl {
    inner: Rc<ControlInner>,
}

impl ProxyControl {
    /// Builds a control that swaps `proxy` into the proxy's own target.
    #[must_use]
    pub fn new(proxy: ConsoleProxy) -> Self {
        let target = proxy.target_console().clone();
        Self {
            inner: Rc::new(ControlInner { proxy, target }),
        }
    }

    /// Builds a control over a passthrough proxy of this thread's ambient console.
    #[must_use]
    pub fn global() -> Self {
        Self::new(ConsoleProxy::global())
    }

    /// The controlled proxy.
    #[must_use]
    pub fn proxy(&self) -> &ConsoleProxy {
        &self.inner.proxy
    }

    /// The console whose bindings this control swaps.
    #[must_use]
    pub fn target(&self) -> &SharedConsole {
        &self.inner.target
    }

    /// Reports whether every operation the proxy exposes is currently bound to
    /// the proxy's substitute on the target.
    ///
    /// A proxy that exposes nothing is always enabled.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.inner.proxy.functions().iter().all(|(op, substitute)| {
            self.inner
                .target
                .get(op)
                .is_some_and(|bound| bound.ptr_eq(substitute))
        })
    }

    /// Installs the proxy unless it is already installed.
    ///
    /// The returned guard restores the original bindings when dropped. If the
    /// proxy was already installed the guard is inert.
    pub fn enable(&self) -> ProxyGuard {
        if self.is_enabled() {
            tracing::trace!(target: CONTROL_TARGET, "proxy already enabled");
            return ProxyGuard::inert();
        }
        self.bind();
        ProxyGuard::active(self.clone())
    }

    /// Installs the proxy persistently, or restores the original bindings.
    pub fn set_enabled(&self, enabled: bool) {
        if enabled {
            self.enable().keep_enabled();
        } else {
            self.restore();
        }
    }

    /// Runs `f` with the proxy installed.
    ///
    /// When the proxy is already installed `f` runs directly and the bindings
    /// are left as they are. Otherwise the original bindings are restored once
    /// `f` returns or unwinds. A `Result` returned by `f` passes through
    /// unchanged.
    pub fn exec_template<R>(&self, f: impl FnOnce() -> R) -> R {
        let _guard = self.enable();
        f()
    }

    /// Wraps `f` so that every call runs inside [`ProxyControl::exec_template`].
    pub fn bind_proxy<A, R, F>(&self, f: F) -> impl Fn(A) -> R + use<A, R, F>
    where
        F: Fn(A) -> R,
    {
        let control = self.clone();
        move |args| control.exec_template(|| f(args))
    }

    fn bind(&self) {
        for (op, substitute) in self.inner.proxy.functions().iter() {
            self.inner.target.set(op, substitute.clone());
        }
        tracing::trace!(
            target: CONTROL_TARGET,
            operations = self.inner.proxy.functions().len(),
            "proxy bound"
        );
    }

    pub(crate) fn restore(&self) {
        // The proxy exposes exactly the operations its snapshot binds.
        for (op, original) in self.inner.proxy.original().iter() {
            self.inner.target.set(op, original.clone());
        }
        tracing::trace!(target: CONTROL_TARGET, "original bindings restored");
    }
}
