//! An in-memory [`PickerPage`] for driving the engine without a browser.
//!
//! The page starts as `<html><body></body></html>`; elements are appended
//! under any existing node. Every side effect the picker performs is recorded
//! so callers can assert on overlays, banners, listeners, cursor and styles.

// Each test binary uses a different subset of the helpers.
#![allow(dead_code)]

use classpick_core::PickerConfig;
use classpick_core::dom::{ClassName, ElementTree, PickerPage, StyleProperty};
use std::cell::RefCell;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
struct MemoryElement {
    tag: String,
    id: String,
    class: ClassName,
    text: String,
    parent: Option<NodeId>,
    styles: HashMap<StyleProperty, String>,
}

#[derive(Debug)]
pub struct MemoryPage {
    elements: Vec<MemoryElement>,
    body: NodeId,
    overlays: usize,
    banners: usize,
    cursor: String,
    listeners: usize,
    style_writes: usize,
    alerts: RefCell<Vec<String>>,
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
            body: NodeId(0),
            overlays: 0,
            banners: 0,
            cursor: String::new(),
            listeners: 0,
            style_writes: 0,
            alerts: RefCell::new(Vec::new()),
        };
        let html = page.push("html", None);
        page.body = page.push("body", Some(html));
        page
    }

    fn push(&mut self, tag: &str, parent: Option<NodeId>) -> NodeId {
        self.elements.push(MemoryElement {
            tag: tag.to_uppercase(),
            id: String::new(),
            class: ClassName::Text(String::new()),
            text: String::new(),
            parent,
            styles: HashMap::new(),
        });
        NodeId(self.elements.len() - 1)
    }

    fn element(&self, node: NodeId) -> &MemoryElement {
        &self.elements[node.0]
    }

    fn element_mut(&mut self, node: NodeId) -> &mut MemoryElement {
        &mut self.elements[node.0]
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    pub fn append(&mut self, parent: NodeId, tag: &str) -> NodeId {
        self.push(tag, Some(parent))
    }

    pub fn set_id(&mut self, node: NodeId, id: &str) {
        self.element_mut(node).id = id.to_string();
    }

    pub fn set_class(&mut self, node: NodeId, class: &str) {
        self.element_mut(node).class = ClassName::Text(class.to_string());
    }

    /// Give `node` a non-string `className`, as SVG elements have.
    pub fn set_opaque_class(&mut self, node: NodeId) {
        self.element_mut(node).class = ClassName::Opaque;
    }

    pub fn set_text(&mut self, node: NodeId, text: &str) {
        self.element_mut(node).text = text.to_string();
    }

    /// Set an inline style as the page's own markup would, without counting it
    /// as a picker write.
    pub fn set_inline_style(&mut self, node: NodeId, property: StyleProperty, value: &str) {
        self.element_mut(node)
            .styles
            .insert(property, value.to_string());
    }

    pub fn inline_style(&self, node: NodeId, property: StyleProperty) -> String {
        self.element(node)
            .styles
            .get(&property)
            .cloned()
            .unwrap_or_default()
    }

    /// Chain of `depth` nested `<div>`s under `<body>`; returns the innermost.
    pub fn nest(&mut self, depth: usize) -> NodeId {
        let mut node = self.body;
        for _ in 0..depth {
            node = self.append(node, "div");
        }
        node
    }

    /// Simulate the page re-inserting a banner node on its own.
    pub fn recreate_banner(&mut self) {
        self.banners += 1;
    }

    pub fn overlay_count(&self) -> usize {
        self.overlays
    }

    pub fn banner_count(&self) -> usize {
        self.banners
    }

    pub fn listener_count(&self) -> usize {
        self.listeners
    }

    pub fn current_cursor(&self) -> &str {
        &self.cursor
    }

    /// Number of inline style writes performed through [`PickerPage::set_style`].
    pub fn style_writes(&self) -> usize {
        self.style_writes
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.borrow().clone()
    }

    fn children(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.elements
            .iter()
            .enumerate()
            .filter(move |(_, element)| element.parent == Some(node))
            .map(|(index, _)| NodeId(index))
    }
}

impl ElementTree for MemoryPage {
    type Node = NodeId;

    fn tag_name(&self, node: &NodeId) -> String {
        self.element(*node).tag.clone()
    }

    fn id(&self, node: &NodeId) -> String {
        self.element(*node).id.clone()
    }

    fn class_name(&self, node: &NodeId) -> ClassName {
        self.element(*node).class.clone()
    }

    fn parent(&self, node: &NodeId) -> Option<NodeId> {
        self.element(*node).parent
    }

    fn is_body(&self, node: &NodeId) -> bool {
        *node == self.body
    }

    fn text_content(&self, node: &NodeId) -> String {
        let mut text = self.element(*node).text.clone();
        for child in self.children(*node) {
            text.push_str(&self.text_content(&child));
        }
        text
    }
}

impl PickerPage for MemoryPage {
    fn style(&self, node: &NodeId, property: StyleProperty) -> String {
        self.inline_style(*node, property)
    }

    fn set_style(&mut self, node: &NodeId, property: StyleProperty, value: &str) {
        self.style_writes += 1;
        let styles = &mut self.element_mut(*node).styles;
        if value.is_empty() {
            styles.remove(&property);
        } else {
            styles.insert(property, value.to_string());
        }
    }

    fn install_overlay(&mut self, _config: &PickerConfig) {
        self.overlays += 1;
    }

    fn remove_overlay(&mut self) {
        self.overlays = 0;
    }

    fn show_banner(&mut self, _config: &PickerConfig) {
        self.banners += 1;
    }

    fn remove_banners(&mut self) {
        self.banners = 0;
    }

    fn cursor(&self) -> String {
        self.cursor.clone()
    }

    fn set_cursor(&mut self, cursor: &str) {
        self.cursor = cursor.to_string();
    }

    fn listen(&mut self) {
        self.listeners += 4;
    }

    fn unlisten(&mut self) {
        self.listeners = 0;
    }

    fn alert(&self, message: &str) {
        self.alerts.borrow_mut().push(message.to_string());
    }
}
