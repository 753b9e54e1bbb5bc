//! The DOM seam.
//!
//! Every behavior is written against the [`Page`] trait rather than against
//! `web-sys` directly, so the same code drives a real browser document
//! (`web::WebPage`, wasm32 only) and the in-memory [`MemoryPage`] the tests
//! use. The trait covers exactly what the behaviors touch:
//!
//! | Concern | Methods |
//! |---|---|
//! | Lookup | [`query`](Page::query), [`query_all`](Page::query_all), [`query_within`](Page::query_within), [`element_by_id`](Page::element_by_id), [`body`](Page::body) |
//! | Structure | [`parent`](Page::parent), [`contains`](Page::contains) |
//! | Markers | [`has_class`](Page::has_class), [`add_class`](Page::add_class), [`remove_class`](Page::remove_class), [`set_class`](Page::set_class) |
//! | Attributes & style | [`attribute`](Page::attribute), [`set_attribute`](Page::set_attribute), [`set_style`](Page::set_style) |
//! | Forms | [`value`](Page::value), [`form_entries`](Page::form_entries), [`reset_form`](Page::reset_form) |
//! | Effects | [`scroll_into_view`](Page::scroll_into_view), [`alert`](Page::alert) |
//!
//! Methods are infallible: a backend that hits a host error logs it and
//! carries on, because no behavior treats a DOM failure as fatal.

pub mod memory;
pub mod selector;

pub use memory::{ElementSpec, MemoryPage, NodeId};
pub use selector::{Selector, SelectorError};

use std::fmt::Debug;

/// Inline style properties the behaviors write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StyleProperty {
    Display,
    Overflow,
    BorderColor,
}

impl StyleProperty {
    /// CSS property name, as passed to `style.setProperty`.
    pub fn css_name(self) -> &'static str {
        match self {
            StyleProperty::Display => "display",
            StyleProperty::Overflow => "overflow",
            StyleProperty::BorderColor => "border-color",
        }
    }
}

/// Access to a page's elements.
pub trait Page {
    /// Handle to one element. Cheap to clone; equality is element identity.
    type Node: Clone + PartialEq + Debug + 'static;

    /// First element in document order matching `selector`.
    fn query(&self, selector: &str) -> Option<Self::Node>;

    /// Every element matching `selector`, in document order.
    fn query_all(&self, selector: &str) -> Vec<Self::Node>;

    /// First descendant of `root` matching `selector`.
    fn query_within(&self, root: &Self::Node, selector: &str) -> Option<Self::Node>;

    fn element_by_id(&self, id: &str) -> Option<Self::Node>;

    fn body(&self) -> Option<Self::Node>;

    fn parent(&self, node: &Self::Node) -> Option<Self::Node>;

    /// True when `node` is `ancestor` or one of its descendants.
    fn contains(&self, ancestor: &Self::Node, node: &Self::Node) -> bool;

    fn has_class(&self, node: &Self::Node, class: &str) -> bool;

    fn add_class(&mut self, node: &Self::Node, class: &str);

    fn remove_class(&mut self, node: &Self::Node, class: &str);

    /// Add or remove `class` depending on `on`.
    fn set_class(&mut self, node: &Self::Node, class: &str, on: bool) {
        if on {
            self.add_class(node, class);
        } else {
            self.remove_class(node, class);
        }
    }

    /// Flip `class` and return whether it is now present.
    fn toggle_class(&mut self, node: &Self::Node, class: &str) -> bool {
        let on = !self.has_class(node, class);
        self.set_class(node, class, on);
        on
    }

    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;

    fn set_attribute(&mut self, node: &Self::Node, name: &str, value: &str);

    /// Set an inline style property. An empty `value` removes it.
    fn set_style(&mut self, node: &Self::Node, property: StyleProperty, value: &str);

    /// Current value of a form control; empty for anything else.
    fn value(&self, node: &Self::Node) -> String;

    /// Name/value pairs of every named control in `form`, in document order.
    fn form_entries(&self, form: &Self::Node) -> Vec<(String, String)>;

    fn reset_form(&mut self, form: &Self::Node);

    /// Smoothly scroll the viewport so `node`'s top edge is in view.
    fn scroll_into_view(&mut self, node: &Self::Node);

    /// Show a blocking acknowledgment to the visitor.
    fn alert(&mut self, message: &str);
}
