//! crates/render/src/surface.rs
//! Output surfaces and the text elements they resolve selectors to.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

/// A shared, mutable piece of text on an output surface.
///
/// Clones refer to the same text.
#[derive(Clone, Default)]
pub struct TextElement(Rc<RefCell<String>>);

impl TextElement {
    /// Creates an element holding `text`.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self(Rc::new(RefCell::new(text.into())))
    }

    /// Copies the current text.
    #[must_use]
    pub fn text(&self) -> String {
        self.0.borrow().clone()
    }

    /// Appends `text` to the element.
    pub fn push_str(&self, text: &str) {
        self.0.borrow_mut().push_str(text);
    }

    /// Replaces the element's text.
    pub fn set_text(&self, text: impl Into<String>) {
        *self.0.borrow_mut() = text.into();
    }

    /// Empties the element.
    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    /// Reports whether both handles refer to the same element.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for TextElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TextElement").field(&*self.0.borrow()).finish()
    }
}

/// Resolves selectors to text elements.
pub trait OutputSurface {
    /// The element `selector` refers to, if any.
    fn select(&self, selector: &str) -> Option<TextElement>;
}

/// An in-memory surface whose selectors are exact element keys.
#[derive(Debug, Default)]
pub struct TextSurface {
    elements: RefCell<BTreeMap<String, TextElement>>,
}

impl TextSurface {
    /// Creates an empty surface.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an element and returns the surface.
    #[must_use]
    pub fn with_element(self, selector: impl Into<String>, text: impl Into<String>) -> Self {
        self.insert(selector, text);
        self
    }

    /// Adds or replaces the element under `selector`.
    pub fn insert(&self, selector: impl Into<String>, text: impl Into<String>) -> TextElement {
        let element = TextElement::new(text);
        self.elements
            .borrow_mut()
            .insert(selector.into(), element.clone());
        element
    }

    /// Removes the element under `selector`.
    pub fn remove(&self, selector: &str) -> Option<TextElement> {
        self.elements.borrow_mut().remove(selector)
    }

    /// The current text of the element under `selector`.
    #[must_use]
    pub fn text(&self, selector: &str) -> Option<String> {
        self.select(selector).map(|element| element.text())
    }
}

impl OutputSurface for TextSurface {
    fn select(&self, selector: &str) -> Option<TextElement> {
        self.elements.borrow().get(selector).cloned()
    }
}

impl<S: OutputSurface + ?Sized> OutputSurface for Rc<S> {
    fn select(&self, selector: &str) -> Option<TextElement> {
        (**self).select(selector)
    }
}
