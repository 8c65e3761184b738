#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! crates/render/src/lib.rs
//!
//! # Overview
//!
//! `render` turns intercepted severity-level calls into text appended to an
//! element of an [`OutputSurface`]. It plugs into a [`proxy::ConsoleProxy`]
//! through [`RenderInterceptor::into_handler`].
//!
//! # Design
//!
//! - [`LogFormat`] renders one [`LogEntry`]; [`SimpleLogFormat`],
//!   [`ListItemLogFormat`] and [`TemplateLogFormat`] cover plain lines, list
//!   items and surface-provided templates.
//! - [`Appender`] writes formatted text into a [`TextElement`].
//! - [`LogConfig`] bundles an appender, a format and the separator written
//!   between consecutive entries.
//! - [`OutputSurface`] resolves selectors to elements; [`TextSurface`] is the
//!   in-memory implementation.
//!
//! # Errors
//!
//! A selector that resolves to nothing is reported through the original
//! `error` operation of the console the interceptor was built over, and the
//! write is skipped.
//!
//! # Examples
//!
//! ```
//! use std::rc::Rc;
//! use proxy::ConsoleProxy;
//! use render::{RenderInterceptor, TextSurface};
//! use serde_json::json;
//! use sink::{SharedConsole, tracing_console};
//!
//! let surface = Rc::new(TextSurface::new().with_element("#console", ""));
//! let target = SharedConsole::new(tracing_console());
//! let proxy = ConsoleProxy::passthrough(&target);
//! let interceptor = RenderInterceptor::new(&target, surface.clone());
//! proxy.set_default_handler(interceptor.into_handler());
//!
//! proxy.log(&[json!("Log")]);
//! proxy.warn(&[json!("Warn")]);
//! assert_eq!(surface.text("#console").as_deref(), Some("LOG: Log\nWARN: Warn"));
//! ```

mod appender;
mod config;
mod entry;
mod format;
mod interceptor;
mod surface;

pub use appender::{Appender, TextAppender};
pub use config::LogConfig;
pub use entry::LogEntry;
pub use format::{
    ListItemLogFormat, LogFormat, MessageFactory, SimpleLogFormat, TemplateContext,
    TemplateLogFormat, escape_html, interpolate_template,
};
pub use interceptor::{DEFAULT_TARGET_SELECTOR, RenderInterceptor};
pub use surface::{OutputSurface, TextElement, TextSurface};
