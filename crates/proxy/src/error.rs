//! crates/proxy/src/error.rs
//! Errors raised by proxy configuration.

use thiserror::Error;

/// Errors returned by [`ConsoleProxy`](crate::ConsoleProxy) operations.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum ProxyError {
    /// A handler was registered for a name the target console does not bind.
    #[error("console doesn't have a function named {name}")]
    InvalidOperation {
        /// The rejected name.
        name: String,
    },
}
