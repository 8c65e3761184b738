//! crates/sink/src/global.rs
//! Thread-local storage for the ambient console.
//!
//! Execution is single threaded and run-to-completion from the point of view
//! of a console, so the ambient console is tracked per thread rather than
//! behind a process-wide lock. Every component accepts an explicit
//! [`SharedConsole`]; this module only supplies the default one.

use crate::console::{Console, SharedConsole};
use crate::host::tracing_console;

thread_local! {
    static GLOBAL: SharedConsole = SharedConsole::new(tracing_console());
}

/// Returns a handle to this thread's ambient console.
///
/// All handles returned on one thread refer to the same binding table, so a
/// rebinding made through one is visible through the others.
#[must_use]
pub fn global_console() -> SharedConsole {
    GLOBAL.with(SharedConsole::clone)
}

/// Replaces every binding of this thread's ambient console, returning the
/// previous bindings.
///
/// Existing handles stay valid and observe the new bindings.
pub fn install_global_console(console: Console) -> Console {
    GLOBAL.with(|global| global.replace(console))
}
