//! crates/proxy/src/token.rs
//! Capability that removes one per-operation handler registration.

use std::rc::Weak;

use sink::OperationName;

use crate::proxy::ProxyInner;

/// Removes the handler registration that produced it.
///
/// Unregistering is idempotent. A token only ever removes its own
/// registration: once a later registration for the same operation has
/// superseded it, [`UnregisterToken::unregister`] does nothing. Dropping a
/// token leaves the handler in place.
#[derive(Clone, Debug)]
pub struct UnregisterToken {
    proxy: Weak<ProxyInner>,
    operation: OperationName,
    id: u64,
}

impl UnregisterToken {
    pub(crate) const fn new(proxy: Weak<ProxyInner>, operation: OperationName, id: u64) -> Self {
        Self {
            proxy,
            operation,
            id,
        }
    }

    /// The operation the registration was made for.
    #[must_use]
    pub const fn operation(&self) -> OperationName {
        self.operation
    }

    /// Removes the registration if it is still the active one.
    ///
    /// Returns `true` when a handler was removed.
    pub fn unregister(&self) -> bool {
        self.proxy
            .upgrade()
            .is_some_and(|inner| inner.remove_handler(self.operation, self.id))
    }
}
