//! crates/control/src/guard.rs
//! RAII disposer returned by [`ProxyControl::enable`].

use crate::control::ProxyControl;

/// Restores the original bindings when dropped.
///
/// A guard returned while the proxy was already installed is inert: it owns
/// no control and dropping it changes nothing, so an inner scope can never
/// undo an outer, still-active installation.
#[must_use = "dropping the guard immediately restores the original bindings"]
#[derive(Debug)]
pub struct ProxyGuard {
    control: Option<ProxyControl>,
}

impl ProxyGuard {
    pub(crate) const fn active(control: ProxyControl) -> Self {
        Self {
            control: Some(control),
        }
    }

    pub(crate) const fn inert() -> Self {
        Self { control: None }
    }

    /// Reports whether dropping this guard restores anything.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.control.is_some()
    }

    /// Restores the original bindings now.
    pub fn disable(self) {
        drop(self);
    }

    /// Consumes the guard and leaves the proxy installed.
    ///
    /// The bindings stay swapped until [`ProxyControl::set_enabled`] is called
    /// with `false` or another guard restores them.
    pub fn keep_enabled(mut self) {
        self.control = None;
    }
}

impl Drop for ProxyGuard {
    fn drop(&mut self) {
        if let Some(control) = self.control.take() {
            control.restore();
        }
    }
}
