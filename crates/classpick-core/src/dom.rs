//! Abstractions over the document the picker instruments.
//!
//! The engine never touches a browser directly. Read-only structure lives in
//! [`ElementTree`]; everything the picker mutates during a session (inline
//! styles, the overlay, the banner, the cursor and the event listeners) lives
//! in [`PickerPage`].

use crate::config::PickerConfig;
use classpick_common::ElementInfo;

/// The value of an element's `className`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassName {
    Text(String),
    /// `className` is not a plain string (SVG elements expose an animated value).
    Opaque,
}

impl ClassName {
    /// Whitespace-separated class tokens; empty for [`ClassName::Opaque`].
    pub fn tokens(&self) -> Vec<&str> {
        match self {
            ClassName::Text(raw) => raw.split_whitespace().collect(),
            ClassName::Opaque => Vec::new(),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ClassName::Text(raw) => raw,
            ClassName::Opaque => "",
        }
    }
}

pub trait ElementTree {
    type Node: Clone + PartialEq;

    /// Tag name as reported by the document (any case).
    fn tag_name(&self, node: &Self::Node) -> String;

    /// The `id` attribute, empty when absent.
    fn id(&self, node: &Self::Node) -> String;

    fn class_name(&self, node: &Self::Node) -> ClassName;

    fn parent(&self, node: &Self::Node) -> Option<Self::Node>;

    fn is_body(&self, node: &Self::Node) -> bool;

    fn text_content(&self, node: &Self::Node) -> String;
}

/// Inline style properties the highlight overrides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleProperty {
    Outline,
    BackgroundColor,
    Position,
    ZIndex,
}

impl StyleProperty {
    pub const ALL: [StyleProperty; 4] = [
        StyleProperty::Outline,
        StyleProperty::BackgroundColor,
        StyleProperty::Position,
        StyleProperty::ZIndex,
    ];

    /// CSS property name.
    pub fn css_name(self) -> &'static str {
        match self {
            StyleProperty::Outline => "outline",
            StyleProperty::BackgroundColor => "background-color",
            StyleProperty::Position => "position",
            StyleProperty::ZIndex => "z-index",
        }
    }
}

/// A document the picker can instrument for the length of one session.
///
/// Every removal operation must tolerate the target already being gone.
pub trait PickerPage: ElementTree {
    /// Current inline value, empty string when unset.
    fn style(&self, node: &Self::Node, property: StyleProperty) -> String;

    /// Set an inline value; an empty string clears it.
    fn set_style(&mut self, node: &Self::Node, property: StyleProperty, value: &str);

    fn install_overlay(&mut self, config: &PickerConfig);

    fn remove_overlay(&mut self);

    fn show_banner(&mut self, config: &PickerConfig);

    /// Remove every banner node, including ones recreated by the page.
    fn remove_banners(&mut self);

    fn cursor(&self) -> String;

    fn set_cursor(&mut self, cursor: &str);

    /// Register the pointer-enter, pointer-leave, click and key listeners.
    fn listen(&mut self);

    fn unlisten(&mut self);

    /// Blocking notice shown to the operator.
    fn alert(&self, message: &str);
}

/// Collect the attributes reported back to an embedded host.
pub fn element_info<T: ElementTree + ?Sized>(
    tree: &T,
    node: &T::Node,
    preview_chars: usize,
) -> ElementInfo {
    ElementInfo {
        tag_name: tree.tag_name(node),
        class_name: tree.class_name(node).as_str().to_string(),
        id: tree.id(node),
        text_content: tree.text_content(node).chars().take(preview_chars).collect(),
    }
}
