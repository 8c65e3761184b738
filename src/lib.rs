#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! src/lib.rs
//!
//! # Overview
//!
//! `console_redirect` redirects, filters and reformats individual console
//! logging calls without touching the call sites that hold the console.
//!
//! The workspace is split by concern:
//!
//! - [`sink`]: the operation registry, console binding tables, the per-thread
//!   ambient console backed by `tracing`, and the level enablement filter.
//! - [`proxy`]: the interception proxy and its handlers.
//! - [`control`]: scoped installation of a proxy into its target console.
//! - [`render`]: rendering of intercepted calls onto text surfaces.
//!
//! # Examples
//!
//! Redirect `warn` for the duration of a scope:
//!
//! ```
//! use console_redirect::prelude::*;
//! use serde_json::json;
//!
//! let target = SharedConsole::new(
//!     Console::new()
//!         .with(OperationName::Log, ConsoleFn::new(|_| json!("logged")))
//!         .with(OperationName::Warn, ConsoleFn::new(|_| json!("warned"))),
//! );
//! let proxy = ConsoleProxy::passthrough(&target);
//! proxy
//!     .set_function_handler("warn", Handler::new(|inv| json!(format!("caught {}", inv.args().len()))))
//!     .unwrap();
//!
//! let control = ProxyControl::new(proxy);
//! let (log, warn) = control.exec_template(|| (target.log(&[]), target.warn(&[json!(1)])));
//!
//! assert_eq!(log, Some(json!("logged")));
//! assert_eq!(warn, Some(json!("caught 1")));
//! assert_eq!(target.warn(&[]), Some(json!("warned")));
//! ```

pub use control;
pub use proxy;
pub use render;
pub use sink;

/// The types most call sites need.
pub mod prelude {
    pub use control::{ProxyControl, ProxyGuard};
    pub use proxy::{ConsoleProxy, DefaultHandler, Handler, Invocation, ProxyError, UnregisterToken};
    pub use render::{LogConfig, OutputSurface, RenderInterceptor, TextSurface};
    pub use sink::{
        Console, ConsoleFn, EnablementFilter, LevelEnablement, LevelSelector, LogLevel,
        OperationName, SharedConsole, global_console, install_global_console, registry,
    };
}
