#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! crates/control/src/lib.rs
//!
//! # Overview
//!
//! `control` installs a [`proxy::ConsoleProxy`] into the bindings of its
//! target console for the duration of a scope, then restores the bindings
//! captured when the control was created.
//!
//! # Design
//!
//! Whether interception is active is never stored. [`ProxyControl::is_enabled`]
//! recomputes it on every call by comparing each operation the proxy exposes
//! against the function currently bound on the target, by identity. Nested
//! scopes therefore need no depth counter: [`ProxyControl::enable`] hands out
//! an inert [`ProxyGuard`] when the proxy is already installed, and only the
//! guard that actually installed it restores the originals.
//!
//! # Invariants
//!
//! - After [`ProxyControl::enable`] every exposed operation on the target is
//!   bound to the proxy's substitute.
//! - Dropping the active guard rebinds each exposed operation to the function
//!   captured at construction, including on unwind.
//!
//! # Examples
//!
//! ```
//! use serde_json::json;
//! use control::ProxyControl;
//! use proxy::{ConsoleProxy, Handler};
//! use sink::{Console, ConsoleFn, OperationName, SharedConsole};
//!
//! let target = SharedConsole::new(
//!     Console::new().with(OperationName::Log, ConsoleFn::new(|_| json!("original"))),
//! );
//! let proxy = ConsoleProxy::passthrough(&target);
//! proxy
//!     .set_function_handler(OperationName::Log, Handler::new(|_| json!("redirected")))
//!     .unwrap();
//! let control = ProxyControl::new(proxy);
//!
//! let inside = control.exec_template(|| target.log(&[]));
//! assert_eq!(inside, Some(json!("redirected")));
//! assert_eq!(target.log(&[]), Some(json!("original")));
//! ```

mod control;
mod guard;

pub use control::ProxyControl;
pub use guard::ProxyGuard;
