//! crates/render/src/interceptor.rs
//! Routes intercepted console calls onto an output surface.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use proxy::{Handler, Invocation};
use serde_json::{Value, json};
use sink::{Console, ConsoleFn, LogLevel, OperationName, SharedConsole, global_console};

use crate::config::LogConfig;
use crate::entry::LogEntry;
use crate::surface::{OutputSurface, TextElement};

const RENDER_TARGET: &str = "console_redirect::render";

/// Selector used until [`RenderInterceptor::set_selector`] is called.
pub const DEFAULT_TARGET_SELECTOR: &str = "#console";

struct RenderState {
    surface: Rc<dyn OutputSurface>,
    selector: String,
    config: LogConfig,
    pending_separator: String,
}

struct RenderInner {
    originals: Console,
    state: RefCell<RenderState>,
}

/// Renders severity-level calls into an element of an output surface.
///
/// The five severity operations are formatted and appended to the element
/// the current selector resolves to; `clear` empties it. Every other
/// operation proceeds to the original function.
///
/// The separator is written before every entry except the first one after
/// the selector changes.
///
/// Cloning yields another handle to the same state.
#[derive(Clone)]
pub struct RenderInterceptor {
    inner: Rc<RenderInner>,
}

impl RenderInterceptor {
    /// Builds an interceptor that reports problems through `target`'s
    /// current `error` binding.
    pub fn new(target: &SharedConsole, surface: Rc<dyn OutputSurface>) -> Self {
        Self {
            inner: Rc::new(RenderInner {
                originals: target.snapshot(),
                state: RefCell::new(RenderState {
                    surface,
                    selector: DEFAULT_TARGET_SELECTOR.to_string(),
                    config: LogConfig::default(),
                    pending_separator: String::new(),
                }),
            }),
        }
    }

    /// Builds an interceptor that reports through this thread's ambient console.
    pub fn global(surface: Rc<dyn OutputSurface>) -> Self {
        Self::new(&global_console(), surface)
    }

    /// Renders onto a different surface.
    pub fn set_surface(&self, surface: Rc<dyn OutputSurface>) {
        self.inner.state.borrow_mut().surface = surface;
    }

    /// Renders into the element `selector` resolves to.
    ///
    /// The next entry is written without a leading separator.
    pub fn set_selector(&self, selector: impl Into<String>) {
        let mut state = self.inner.state.borrow_mut();
        state.selector = selector.into();
        state.pending_separator.clear();
    }

    /// The current target selector.
    #[must_use]
    pub fn selector(&self) -> String {
        self.inner.state.borrow().selector.clone()
    }

    /// Switches formatting, appending and separation.
    ///
    /// If an entry has already been written the next one is preceded by the
    /// new configuration's separator.
    pub fn set_config(&self, config: LogConfig) {
        let mut state = self.inner.state.borrow_mut();
        if !state.pending_separator.is_empty() {
            state.pending_separator.clone_from(&config.separator);
        }
        state.config = config;
    }

    /// Handles one intercepted call.
    pub fn invoke(&self, invocation: &Invocation<'_>) -> Value {
        let op = invocation.target_fn_name();
        if let Some(level) = op.log_level() {
            self.render(level, invocation.args());
            Value::Null
        } else if op == OperationName::Clear {
            self.clear();
            Value::Null
        } else {
            invocation.proceed()
        }
    }

    /// Formats and appends one entry.
    pub fn render(&self, level: LogLevel, args: &[Value]) {
        let (surface, config, separator) = {
            let state = self.inner.state.borrow();
            (
                Rc::clone(&state.surface),
                state.config.clone(),
                state.pending_separator.clone(),
            )
        };
        let Some(element) = self.resolve(surface.as_ref()) else {
            return;
        };

        let entry = LogEntry::new(level, args.to_vec());
        let formatted = config.format.format(&entry, surface.as_ref());
        config.appender.append(&element, &separator);
        config.appender.append(&element, &formatted);

        self.inner.state.borrow_mut().pending_separator = config.separator;
    }

    /// Empties the target element.
    pub fn clear(&self) {
        let (surface, appender) = {
            let state = self.inner.state.borrow();
            (Rc::clone(&state.surface), Rc::clone(&state.config.appender))
        };
        if let Some(element) = self.resolve(surface.as_ref()) {
            appender.clear(&element);
        }
    }

    /// Wraps the interceptor as a proxy handler.
    #[must_use]
    pub fn into_handler(self) -> Handler {
        Handler::new(move |invocation| self.invoke(invocation))
    }

    /// Severity operations and `clear` bound straight to this interceptor.
    ///
    /// The table can be installed as a replacement map or as a console of
    /// its own.
    #[must_use]
    pub fn functions(&self) -> Console {
        let mut console = LogLevel::ALL
            .into_iter()
            .map(|level| {
                let this = self.clone();
                (
                    level.operation(),
                    ConsoleFn::from_fn(move |args| this.render(level, args)),
                )
            })
            .collect::<Console>();
        let this = self.clone();
        console.set(OperationName::Clear, ConsoleFn::from_fn(move |_| this.clear()));
        console
    }

    fn resolve(&self, surface: &dyn OutputSurface) -> Option<TextElement> {
        let selector = self.selector();
        let element = surface.select(&selector);
        if element.is_none() {
            tracing::warn!(target: RENDER_TARGET, selector = %selector, "target element not found");
            let message = format!("Target element can not be selected using {selector}");
            self.inner.originals.error(&[json!(message)]);
        }
        element
    }
}

impl fmt::Debug for RenderInterceptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.state.borrow();
        f.debug_struct("RenderInterceptor")
            .field("selector", &state.selector)
            .field("config", &state.config)
            .finish_non_exhaustive()
    }
}
