//! crates/render/src/config.rs

use std::fmt;
use std::rc::Rc;

use crate::appender::{Appender, TextAppender};
use crate::format::{ListItemLogFormat, LogFormat, SimpleLogFormat, TemplateLogFormat};

/// How entries are formatted, written and separated.
#[derive(Clone)]
pub struct LogConfig {
    /// Writes formatted entries into the target element.
    pub appender: Rc<dyn Appender>,
    /// Formats each entry.
    pub format: Rc<dyn LogFormat>,
    /// Written between consecutive entries.
    pub separator: String,
}

impl LogConfig {
    /// Builds a configuration from its parts.
    pub fn new(
        appender: impl Appender + 'static,
        format: impl LogFormat + 'static,
        separator: impl Into<String>,
    ) -> Self {
        Self {
            appender: Rc::new(appender),
            format: Rc::new(format),
            separator: separator.into(),
        }
    }

    /// Plain `LEVEL: message` lines separated by newlines.
    #[must_use]
    pub fn value() -> Self {
        Self::new(TextAppender, SimpleLogFormat, "\n")
    }

    /// Plain `LEVEL: message` entries separated by `<br/>`.
    #[must_use]
    pub fn markup() -> Self {
        Self::new(TextAppender, SimpleLogFormat, "<br/>")
    }

    /// `<li>` entries separated by newlines.
    #[must_use]
    pub fn list() -> Self {
        Self::new(TextAppender, ListItemLogFormat, "\n")
    }

    /// Entries rendered from the `#logEntry` template, separated by newlines.
    #[must_use]
    pub fn template() -> Self {
        Self::new(TextAppender, TemplateLogFormat::default(), "\n")
    }

    /// Replaces the format, keeping the appender and separator.
    #[must_use]
    pub fn with_format(mut self, format: impl LogFormat + 'static) -> Self {
        self.format = Rc::new(format);
        self
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self::value()
    }
}

impl fmt::Debug for LogConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogConfig")
            .field("separator", &self.separator)
            .finish_non_exhaustive()
    }
}
