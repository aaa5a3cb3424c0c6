//! Element and document capabilities.
//!
//! Components never hold a concrete DOM type. They are generic over
//! [`Element`], a cheap-to-clone handle with interior mutability (the same
//! shape as a live DOM element), and look elements up through [`Document`].
//! Class and attribute presence on these handles is the only UI state there is:
//! nothing else remembers whether the menu is open or the theme is dark.

use crate::error::PageError;

#[cfg(test)]
#[path = "dom_test.rs"]
mod dom_test;

/// A handle to one element in the page.
///
/// Mutating methods take `&self`; handles are shared references into the
/// document, so a change through one clone is visible through every other.
pub trait Element: Clone + 'static {
    /// Whether the element's class list contains `class`.
    fn has_class(&self, class: &str) -> bool;

    /// Add `class` to the class list. Adding a present class is a no-op.
    fn add_class(&self, class: &str);

    /// Remove `class` from the class list. Removing an absent class is a no-op.
    fn remove_class(&self, class: &str);

    /// Flip `class` and return whether it is present afterwards.
    fn toggle_class(&self, class: &str) -> bool;

    fn attribute(&self, name: &str) -> Option<String>;

    fn set_attribute(&self, name: &str, value: &str);

    /// Concatenated text content of the element and its descendants.
    fn text(&self) -> String;

    /// Replace all children with a single text node.
    fn set_text(&self, text: &str);

    /// Set an inline style property (CSS property name, e.g. `animation-delay`).
    fn set_style(&self, property: &str, value: &str);

    fn append_child(&self, child: &Self);

    /// Whether `other` is this element or one of its descendants.
    fn contains(&self, other: &Self) -> bool;

    /// First descendant matching `selector`.
    fn query(&self, selector: &str) -> Option<Self>;

    /// All descendants matching `selector`, in document order.
    fn query_all(&self, selector: &str) -> Vec<Self>;

    /// Current value of a form control; `None` for non-control elements.
    fn value(&self) -> Option<String>;

    /// Restore every control of a form element to its initial value.
    fn reset(&self);
}

/// Lookup and creation of elements in the page.
pub trait Document {
    type Element: Element;

    fn by_id(&self, id: &str) -> Option<Self::Element>;

    /// First element in the document matching `selector`.
    fn query(&self, selector: &str) -> Option<Self::Element>;

    /// All elements in the document matching `selector`, in document order.
    fn query_all(&self, selector: &str) -> Vec<Self::Element>;

    fn body(&self) -> Option<Self::Element>;

    /// Create a detached element with the given tag name.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::Js`] if the browser rejects the tag name.
    fn create_element(&self, tag: &str) -> Result<Self::Element, PageError>;
}

/// Single lookup by selector.
///
/// Plain `#id` selectors are routed through [`Document::by_id`].
pub fn select<D: Document>(doc: &D, selector: &str) -> Option<D::Element> {
    match plain_id(selector) {
        Some(id) => doc.by_id(id),
        None => doc.query(selector),
    }
}

/// Multi lookup by selector, in document order.
pub fn select_all<D: Document>(doc: &D, selector: &str) -> Vec<D::Element> {
    doc.query_all(selector)
}

/// Lookup scoped to the subtree below `root`.
pub fn select_within<E: Element>(root: &E, selector: &str) -> Option<E> {
    root.query(selector)
}

/// The id of a selector that is nothing but `#id`.
fn plain_id(selector: &str) -> Option<&str> {
    let id = selector.trim().strip_prefix('#')?;
    let is_plain = !id.is_empty() && id.chars().all(|c| c.is_alphanumeric() || c == '-' || c == '_');
    is_plain.then_some(id)
}
