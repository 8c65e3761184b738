#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! crates/proxy/src/lib.rs
//!
//! # Overview
//!
//! `proxy` builds a substitute console that intercepts calls per operation.
//! A [`ConsoleProxy`] exposes one substitute function for each registered
//! operation its target binds, and routes every call through a handler.
//!
//! # Design
//!
//! Handler resolution for a call to operation `op` with arguments `args`:
//!
//! 1. the per-operation [`Handler`] registered for `op`, if any;
//! 2. otherwise the proxy's current [`DefaultHandler`]:
//!    - [`DefaultHandler::Passthrough`] forwards to the original function,
//!    - [`DefaultHandler::Invocation`] receives the [`Invocation`],
//!    - [`DefaultHandler::Replacements`] calls the replacement bound for `op`
//!      with the raw `args`, or passes through when none is bound.
//!
//! Passthrough always uses the snapshot of the target taken at construction,
//! so a proxy installed in its own target's place never calls back into
//! itself.
//!
//! # Errors
//!
//! [`ConsoleProxy::set_function_handler`] fails with
//! [`ProxyError::InvalidOperation`] for names the live target does not bind.
//! Panics raised by handlers unwind to the caller untouched.
//!
//! # Examples
//!
//! ```
//! use serde_json::json;
//! use proxy::{ConsoleProxy, DefaultHandler};
//! use sink::{Console, ConsoleFn, OperationName, SharedConsole};
//!
//! let target = SharedConsole::new(
//!     Console::new()
//!         .with(OperationName::Log, ConsoleFn::new(|_| json!("original log")))
//!         .with(OperationName::Warn, ConsoleFn::new(|_| json!("original warn"))),
//! );
//! let replacements = Console::new().with(OperationName::Warn, ConsoleFn::new(|_| json!("replaced")));
//! let proxy = ConsoleProxy::new(&target, DefaultHandler::replacements(replacements));
//!
//! assert_eq!(proxy.warn(&[]), Some(json!("replaced")));
//! assert_eq!(proxy.log(&[]), Some(json!("original log")));
//! ```

mod error;
mod handler;
mod invocation;
mod proxy;
mod token;

pub use error::ProxyError;
pub use handler::{DefaultHandler, Handler};
pub use invocation::Invocation;
pub use proxy::ConsoleProxy;
pub use token::UnregisterToken;
