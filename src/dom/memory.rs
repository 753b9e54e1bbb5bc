//! In-memory page backend.
//!
//! [`MemoryPage`] is an arena of elements with just enough of the DOM to run
//! the site behaviors natively: classes, attributes, inline styles, form
//! control values, and a selector engine. It also records the side effects a
//! browser would show the visitor (alerts, scroll requests) so tests can
//! assert on them.
//!
//! ```rust
//! use sitewire::dom::{ElementSpec, MemoryPage, Page};
//!
//! let mut page = MemoryPage::new();
//! let body = page.body().unwrap();
//! let nav = page.append(&body, ElementSpec::new("nav"));
//! let toggle = page.append(&nav, ElementSpec::new("button").class("menu-toggle"));
//!
//! assert_eq!(page.query(".menu-toggle"), Some(toggle));
//! assert!(page.contains(&nav, &toggle));
//! ```

use super::selector::{Matchable, Selector};
use super::{Page, StyleProperty};
use std::collections::BTreeMap;

/// Handle to an element of a [`MemoryPage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// Description of an element to append.
#[derive(Debug, Clone, Default)]
pub struct ElementSpec {
    tag: String,
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    value: Option<String>,
}

impl ElementSpec {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            ..Self::default()
        }
    }

    pub fn id(self, id: &str) -> Self {
        self.attr("id", id)
    }

    pub fn class(mut self, class: &str) -> Self {
        self.classes.push(class.to_string());
        self
    }

    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }

    /// Initial value of a form control, as if typed by the visitor.
    pub fn value(mut self, value: &str) -> Self {
        self.value = Some(value.to_string());
        self
    }
}

#[derive(Debug, Clone)]
struct Element {
    tag: String,
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    styles: BTreeMap<StyleProperty, String>,
    value: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Element {
    fn is_form_control(&self) -> bool {
        matches!(self.tag.as_str(), "input" | "textarea" | "select")
    }

    fn push_class(&mut self, class: &str) {
        if !self.classes.iter().any(|c| c == class) {
            self.classes.push(class.to_string());
        }
    }

    /// Keep the `class` attribute in step with the class list. An element
    /// that never had one does not gain it from an empty list.
    fn sync_class_attribute(&mut self) {
        if self.classes.is_empty() && !self.attributes.contains_key("class") {
            return;
        }
        self.attributes.insert("class".to_string(), self.classes.join(" "));
    }
}

impl Matchable for Element {
    fn tag(&self) -> &str {
        &self.tag
    }

    fn id(&self) -> Option<&str> {
        self.attributes.get("id").map(String::as_str)
    }

    fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

/// An in-memory document rooted at `<html>` with a `<body>`.
#[derive(Debug, Clone)]
pub struct MemoryPage {
    elements: Vec<Element>,
    root: NodeId,
    body: NodeId,
    alerts: Vec<String>,
    scrolled: Vec<NodeId>,
}

impl Default for MemoryPage {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryPage {
    pub fn new() -> Self {
        let mut page = Self {
            elements: Vec::new(),
            root: NodeId(0),
            body: NodeId(0),
            alerts: Vec::new(),
            scrolled: Vec::new(),
        };
        let root = page.insert(None, ElementSpec::new("html"));
        page.root = root;
        page.body = page.insert(Some(root), ElementSpec::new("body"));
        page
    }

    /// The `<html>` element.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Append a new element as the last child of `parent`.
    pub fn append(&mut self, parent: &NodeId, spec: ElementSpec) -> NodeId {
        self.insert(Some(*parent), spec)
    }

    fn insert(&mut self, parent: Option<NodeId>, spec: ElementSpec) -> NodeId {
        let id = NodeId(self.elements.len());
        let value = spec
            .value
            .or_else(|| spec.attributes.get("value").cloned())
            .unwrap_or_default();
        let mut element = Element {
            tag: spec.tag,
            classes: Vec::new(),
            attributes: spec.attributes,
            styles: BTreeMap::new(),
            value,
            parent,
            children: Vec::new(),
        };
        let listed = element.attributes.get("class").cloned().unwrap_or_default();
        for class in listed.split_whitespace().chain(spec.classes.iter().map(String::as_str)) {
            element.push_class(class);
        }
        element.sync_class_attribute();
        self.elements.push(element);
        if let Some(parent) = parent {
            self.elements[parent.0].children.push(id);
        }
        id
    }

    fn element(&self, node: &NodeId) -> &Element {
        &self.elements[node.0]
    }

    fn element_mut(&mut self, node: &NodeId) -> &mut Element {
        &mut self.elements[node.0]
    }

    pub fn tag(&self, node: &NodeId) -> &str {
        &self.element(node).tag
    }

    pub fn classes(&self, node: &NodeId) -> &[String] {
        &self.element(node).classes
    }

    /// Inline style value, if set.
    pub fn style(&self, node: &NodeId, property: StyleProperty) -> Option<&str> {
        self.element(node).styles.get(&property).map(String::as_str)
    }

    /// Type into a form control.
    pub fn set_value(&mut self, node: &NodeId, value: &str) {
        self.element_mut(node).value = value.to_string();
    }

    /// Every alert shown so far, oldest first.
    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    pub fn take_alerts(&mut self) -> Vec<String> {
        std::mem::take(&mut self.alerts)
    }

    /// Every element scrolled into view so far, oldest first.
    pub fn scrolled(&self) -> &[NodeId] {
        &self.scrolled
    }

    /// Pre-order walk of `root`'s subtree, `root` included.
    fn subtree(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(self.element(&node).children.iter().rev().copied());
        }
        out
    }

    fn ancestors(&self, node: NodeId) -> impl Iterator<Item = &Element> + '_ {
        std::iter::successors(self.element(&node).parent, |p| self.element(p).parent)
            .map(|p| self.element(&p))
    }

    fn select(&self, root: NodeId, selector: &str, include_root: bool) -> Vec<NodeId> {
        let selector = match Selector::parse(selector) {
            Ok(s) => s,
            Err(e) => {
                tracing::warn!(%e, "ignoring malformed selector");
                return Vec::new();
            }
        };
        self.subtree(root)
            .into_iter()
            .filter(|node| include_root || *node != root)
            .filter(|node| selector.matches(self.element(node), self.ancestors(*node)))
            .collect()
    }
}

impl Page for MemoryPage {
    type Node = NodeId;

    fn query(&self, selector: &str) -> Option<NodeId> {
        self.select(self.root, selector, true).into_iter().next()
    }

    fn query_all(&self, selector: &str) -> Vec<NodeId> {
        self.select(self.root, selector, true)
    }

    fn query_within(&self, root: &NodeId, selector: &str) -> Option<NodeId> {
        self.select(*root, selector, false).into_iter().next()
    }

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.subtree(self.root)
            .into_iter()
            .find(|node| self.element(node).id() == Some(id))
    }

    fn body(&self) -> Option<NodeId> {
        Some(self.body)
    }

    fn parent(&self, node: &NodeId) -> Option<NodeId> {
        self.element(node).parent
    }

    fn contains(&self, ancestor: &NodeId, node: &NodeId) -> bool {
        std::iter::successors(Some(*node), |n| self.element(n).parent).any(|n| n == *ancestor)
    }

    fn has_class(&self, node: &NodeId, class: &str) -> bool {
        Matchable::has_class(self.element(node), class)
    }

    fn add_class(&mut self, node: &NodeId, class: &str) {
        let element = self.element_mut(node);
        element.push_class(class);
        element.sync_class_attribute();
    }

    fn remove_class(&mut self, node: &NodeId, class: &str) {
        let element = self.element_mut(node);
        element.classes.retain(|c| c != class);
        element.sync_class_attribute();
    }

    fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        self.element(node).attributes.get(name).cloned()
    }

    fn set_attribute(&mut self, node: &NodeId, name: &str, value: &str) {
        let element = self.element_mut(node);
        if name == "class" {
            element.classes.clear();
            for class in value.split_whitespace() {
                element.push_class(class);
            }
        }
        element.attributes.insert(name.to_string(), value.to_string());
    }

    fn set_style(&mut self, node: &NodeId, property: StyleProperty, value: &str) {
        let styles = &mut self.element_mut(node).styles;
        if value.is_empty() {
            styles.remove(&property);
        } else {
            styles.insert(property, value.to_string());
        }
    }

    fn value(&self, node: &NodeId) -> String {
        let element = self.element(node);
        if element.is_form_control() {
            element.value.clone()
        } else {
            String::new()
        }
    }

    fn form_entries(&self, form: &NodeId) -> Vec<(String, String)> {
        self.subtree(*form)
            .into_iter()
            .map(|node| self.element(&node))
            .filter(|el| el.is_form_control())
            .filter_map(|el| {
                let name = el.attributes.get("name")?;
                Some((name.clone(), el.value.clone()))
            })
            .collect()
    }

    fn reset_form(&mut self, form: &NodeId) {
        for node in self.subtree(*form) {
            let element = self.element_mut(&node);
            if element.is_form_control() {
                element.value = element.attributes.get("value").cloned().unwrap_or_default();
            }
        }
    }

    fn scroll_into_view(&mut self, node: &NodeId) {
        self.scrolled.push(*node);
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }
}
