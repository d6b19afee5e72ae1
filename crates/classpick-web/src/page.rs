use crate::listeners::Listeners;
use crate::{BANNER_MARKER, MARKER_ATTRIBUTE, OVERLAY_MARKER, marker_selector};
use classpick_core::delivery::Delivery;
use classpick_core::dom::{ClassName, ElementTree, PickerPage, StyleProperty};
use classpick_core::{Picker, PickerConfig};
use js_sys::Reflect;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CssStyleDeclaration, Document, Element, Window};

pub type WebPicker = Picker<DomPage, Box<dyn Delivery>>;
pub type SharedPicker = Rc<RefCell<WebPicker>>;
pub type PickerHandle = Weak<RefCell<WebPicker>>;

/// The live document as seen by the picker engine.
pub struct DomPage {
    window: Window,
    document: Document,
    overlay: Option<Element>,
    banner: Option<Element>,
    listeners: Option<Listeners>,
    handle: PickerHandle,
}

impl DomPage {
    /// `handle` points back at the picker that owns this page; listeners
    /// dispatch through it.
    pub fn new(window: Window, document: Document, handle: PickerHandle) -> Self {
        Self {
            window,
            document,
            overlay: None,
            banner: None,
            listeners: None,
            handle,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Node new picker elements are appended to.
    fn mount_point(&self) -> Option<Element> {
        match self.document.body() {
            Some(body) => Some(body.into()),
            None => self.document.document_element(),
        }
    }

    fn insert_marked(&self, marker: &str, style: &str, text: Option<&str>) -> Option<Element> {
        let mount = self.mount_point()?;
        let node = self.document.create_element("div").ok()?;
        node.set_attribute(MARKER_ATTRIBUTE, marker).ok()?;
        node.set_attribute("style", style).ok()?;
        if let Some(text) = text {
            node.set_text_content(Some(text));
        }
        mount.append_child(&node).ok()?;
        Some(node)
    }

    /// Remove every node carrying `marker`, wherever the page moved it.
    fn sweep(&self, marker: &str) {
        let Ok(nodes) = self.document.query_selector_all(&marker_selector(marker)) else {
            return;
        };
        for index in 0..nodes.length() {
            if let Some(element) = nodes.item(index).and_then(|n| n.dyn_into::<Element>().ok()) {
                element.remove();
            }
        }
    }

    fn body_style(&self) -> Option<CssStyleDeclaration> {
        self.document.body().map(|body| body.style())
    }
}

/// Inline style of any element, HTML or SVG.
fn inline_style(node: &Element) -> Option<CssStyleDeclaration> {
    Reflect::get(node, &JsValue::from_str("style"))
        .ok()?
        .dyn_into::<CssStyleDeclaration>()
        .ok()
}

impl ElementTree for DomPage {
    type Node = Element;

    fn tag_name(&self, node: &Element) -> String {
        node.tag_name()
    }

    fn id(&self, node: &Element) -> String {
        node.id()
    }

    fn class_name(&self, node: &Element) -> ClassName {
        Reflect::get(node, &JsValue::from_str("className"))
            .ok()
            .and_then(|value| value.as_string())
            .map(ClassName::Text)
            .unwrap_or(ClassName::Opaque)
    }

    fn parent(&self, node: &Element) -> Option<Element> {
        node.parent_element()
    }

    fn is_body(&self, node: &Element) -> bool {
        self.document
            .body()
            .is_some_and(|body| AsRef::<Element>::as_ref(&body) == node)
    }

    fn text_content(&self, node: &Element) -> String {
        node.text_content().unwrap_or_default()
    }
}

impl PickerPage for DomPage {
    fn style(&self, node: &Element, property: StyleProperty) -> String {
        inline_style(node)
            .and_then(|style| style.get_property_value(property.css_name()).ok())
            .unwrap_or_default()
    }

    fn set_style(&mut self, node: &Element, property: StyleProperty, value: &str) {
        let Some(style) = inline_style(node) else {
            return;
        };
        let result = if value.is_empty() {
            style.remove_property(property.css_name()).map(|_| ())
        } else {
            style.set_property(property.css_name(), value)
        };
        if let Err(e) = result {
            web_sys::console::warn_2(&JsValue::from_str("classpick: style update failed"), &e);
        }
    }

    fn install_overlay(&mut self, config: &PickerConfig) {
        self.overlay = self.insert_marked(OVERLAY_MARKER, &config.overlay_style(), None);
    }

    fn remove_overlay(&mut self) {
        if let Some(overlay) = self.overlay.take() {
            overlay.remove();
        }
        self.sweep(OVERLAY_MARKER);
    }

    fn show_banner(&mut self, config: &PickerConfig) {
        self.banner = self.insert_marked(
            BANNER_MARKER,
            &config.banner_style(),
            Some(&config.banner_text),
        );
    }

    fn remove_banners(&mut self) {
        if let Some(banner) = self.banner.take() {
            banner.remove();
        }
        self.sweep(BANNER_MARKER);
    }

    fn cursor(&self) -> String {
        self.body_style()
            .and_then(|style| style.get_property_value("cursor").ok())
            .unwrap_or_default()
    }

    fn set_cursor(&mut self, cursor: &str) {
        let Some(style) = self.body_style() else {
            return;
        };
        let result = if cursor.is_empty() {
            style.remove_property("cursor").map(|_| ())
        } else {
            style.set_property("cursor", cursor)
        };
        if let Err(e) = result {
            web_sys::console::warn_2(&JsValue::from_str("classpick: cursor update failed"), &e);
        }
    }

    fn listen(&mut self) {
        if self.listeners.is_some() {
            return;
        }
        match Listeners::attach(self.document.clone().into(), self.handle.clone()) {
            Ok(listeners) => self.listeners = Some(listeners),
            Err(e) => web_sys::console::error_2(
                &JsValue::from_str("classpick: failed to register listeners"),
                &e,
            ),
        }
    }

    fn unlisten(&mut self) {
        if let Some(listeners) = self.listeners.take() {
            listeners.detach();
        }
    }

    fn alert(&self, message: &str) {
        let _ = self.window.alert_with_message(message);
    }
}
