//! crates/render/src/appender.rs

use crate::surface::TextElement;

/// Writes rendered text into an element.
pub trait Appender {
    /// Appends `text` to `element`.
    fn append(&self, element: &TextElement, text: &str);

    /// Removes everything previously written to `element`.
    fn clear(&self, element: &TextElement);
}

/// Appends to and clears the element's text directly.
#[derive(Clone, Copy, Debug, Default)]
pub struct TextAppender;

impl Appender for TextAppender {
    fn append(&self, element: &TextElement, text: &str) {
        element.push_str(text);
    }

    fn clear(&self, element: &TextElement) {
        element.clear();
    }
}
