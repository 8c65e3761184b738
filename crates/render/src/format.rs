//! crates/render/src/format.rs
//! Log entry formats and the template helpers they use.

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use crate::entry::LogEntry;
use crate::surface::OutputSurface;

/// Renders one log entry to text.
///
/// The surface the entry is being written to is passed along so formats can
/// look up templates that live on it.
pub trait LogFormat {
    /// Formats `entry`.
    fn format(&self, entry: &LogEntry, surface: &dyn OutputSurface) -> String;
}

/// `LEVEL: message`.
#[derive(Clone, Copy, Debug, Default)]
pub struct SimpleLogFormat;

impl LogFormat for SimpleLogFormat {
    fn format(&self, entry: &LogEntry, _surface: &dyn OutputSurface) -> String {
        format!("{}: {}", entry.level_upper(), entry.message())
    }
}

/// `<li>LEVEL: message</li>`.
#[derive(Clone, Copy, Debug, Default)]
pub struct ListItemLogFormat;

impl LogFormat for ListItemLogFormat {
    fn format(&self, entry: &LogEntry, _surface: &dyn OutputSurface) -> String {
        format!("<li>{}: {}</li>", entry.level_upper(), entry.message())
    }
}

/// Builds the `message` placeholder value for a template.
pub type MessageFactory = Rc<dyn Fn(&LogEntry) -> String>;

/// Placeholder values keyed by name.
pub type TemplateContext = BTreeMap<String, String>;

const DEFAULT_TEMPLATE_SELECTOR: &str = "#logEntry";

const MISSING_TEMPLATE: &str =
    "<!-- Missing template \"${templateSelector}\": ${level}: ${message} -->";

/// Fills a template taken from the output surface.
///
/// The template is the text of the element `template_selector` resolves to.
/// Supported placeholders are `${level}`, `${level.upperCase}`, `${message}`
/// and `${templateSelector}`. When the selector resolves to nothing the entry
/// is rendered as an HTML comment naming the missing template.
#[derive(Clone)]
pub struct TemplateLogFormat {
    template_selector: String,
    message_factory: MessageFactory,
}

impl TemplateLogFormat {
    /// Uses the template under `template_selector` and HTML-escaped messages.
    #[must_use]
    pub fn new(template_selector: impl Into<String>) -> Self {
        Self {
            template_selector: template_selector.into(),
            message_factory: Rc::new(|entry: &LogEntry| escape_html(&entry.message())),
        }
    }

    /// Replaces the function that produces the `message` placeholder.
    #[must_use]
    pub fn with_message_factory<F>(mut self, factory: F) -> Self
    where
        F: Fn(&LogEntry) -> String + 'static,
    {
        self.message_factory = Rc::new(factory);
        self
    }

    /// The selector the template is read from.
    #[must_use]
    pub fn template_selector(&self) -> &str {
        &self.template_selector
    }
}

impl Default for TemplateLogFormat {
    fn default() -> Self {
        Self::new(DEFAULT_TEMPLATE_SELECTOR)
    }
}

impl fmt::Debug for TemplateLogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TemplateLogFormat")
            .field("template_selector", &self.template_selector)
            .finish_non_exhaustive()
    }
}

impl LogFormat for TemplateLogFormat {
    fn format(&self, entry: &LogEntry, surface: &dyn OutputSurface) -> String {
        let template = surface
            .select(&self.template_selector)
            .map_or_else(|| MISSING_TEMPLATE.to_string(), |element| element.text());

        let context = TemplateContext::from([
            ("level".to_string(), entry.level.as_str().to_string()),
            ("level.upperCase".to_string(), entry.level_upper()),
            ("message".to_string(), (self.message_factory)(entry)),
            (
                "templateSelector".to_string(),
                escape_html(&self.template_selector),
            ),
        ]);
        interpolate_template(&template, &context)
    }
}

/// Replaces every `${key}` in `template` with its value from `context`.
///
/// Keys run to the first `}` and never span lines. Keys missing from the
/// context are replaced with nothing; an unterminated `${` is kept verbatim.
#[must_use]
pub fn interpolate_template(template: &str, context: &TemplateContext) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find(['}', '\n']) {
            Some(end) if after.as_bytes()[end] == b'}' => {
                if let Some(value) = context.get(&after[..end]) {
                    out.push_str(value);
                }
                rest = &after[end + 1..];
            }
            _ => {
                out.push_str("${");
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

/// Escapes text for inclusion in markup.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            other => out.push(other),
        }
    }
    out
}
