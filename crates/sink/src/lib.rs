#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! crates/sink/src/lib.rs
//!
//! # Overview
//!
//! `sink` models the host console that the interception layer sits in front
//! of. A console is a binding table: for each operation in the fixed
//! [`registry`] it either binds a [`ConsoleFn`] or leaves the slot empty.
//! The crate also ships the host console used by default (every operation
//! becomes a `tracing` event) and the level enablement filter.
//!
//! # Design
//!
//! - [`OperationName`] is the closed, ordered registry of interceptable
//!   operations. Nothing outside it is ever bound or intercepted.
//! - [`Console`] is a value type. Cloning it copies bindings while keeping
//!   function identity, which makes it the snapshot type.
//! - [`SharedConsole`] is the live table that call sites hold and that the
//!   swap control rebinds. Each thread has an ambient one, reachable through
//!   [`global_console`].
//! - [`EnablementFilter`] wraps a console and gates the five severity levels
//!   behind a [`LevelEnablement`] configuration.
//!
//! # Invariants
//!
//! - [`ConsoleFn::ptr_eq`] is the only notion of function identity.
//! - Calls through a [`SharedConsole`] never hold a borrow of the table while
//!   the bound function runs.
//!
//! # Examples
//!
//! ```
//! use serde_json::json;
//! use sink::{Console, ConsoleFn, OperationName, SharedConsole};
//!
//! let console = SharedConsole::new(
//!     Console::new().with(OperationName::Log, ConsoleFn::new(|args| json!(args.len()))),
//! );
//! assert_eq!(console.log(&[json!("a"), json!("b")]), Some(json!(2)));
//! assert_eq!(console.warn(&[json!("a")]), None);
//! ```

mod config;
mod console;
mod filter;
mod global;
mod host;
mod registry;

pub use config::{LevelEnablement, LevelSelector, TokenError};
pub use console::{Console, ConsoleFn, SharedConsole, join_args};
pub use filter::EnablementFilter;
pub use global::{global_console, install_global_console};
pub use host::{HOST_TARGET, tracing_console, tracing_level};
pub use registry::{LogLevel, OperationName, UnknownOperation, registry};
