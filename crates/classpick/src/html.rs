//! Class-path derivation over a parsed HTML document, for previewing
//! selectors without a browser.

use classpick_common::ElementSelection;
use classpick_core::dom::{ClassName, ElementTree, element_info};
use classpick_core::{PickerConfig, derive_class_path};
use scraper::{ElementRef, Html, Selector};
use thiserror::Error;

const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

#[derive(Debug, Error)]
pub enum DeriveError {
    #[error("Invalid CSS selector {selector:?}: {reason}")]
    Selector { selector: String, reason: String },
}

/// A parsed document viewed through the engine's [`ElementTree`].
pub struct HtmlTree<'a> {
    document: &'a Html,
}

fn is_svg(node: &ElementRef<'_>) -> bool {
    &*node.value().name.ns == SVG_NAMESPACE
}

impl<'a> HtmlTree<'a> {
    pub fn new(document: &'a Html) -> Self {
        Self { document }
    }

    pub fn select(&self, selector: &str) -> Result<Vec<ElementRef<'a>>, DeriveError> {
        let parsed = Selector::parse(selector).map_err(|e| DeriveError::Selector {
            selector: selector.to_string(),
            reason: e.to_string(),
        })?;
        Ok(self.document.select(&parsed).collect())
    }
}

impl<'a> ElementTree for HtmlTree<'a> {
    type Node = ElementRef<'a>;

    /// As `Element.tagName` reports it: upper-case for HTML, as written for SVG.
    fn tag_name(&self, node: &Self::Node) -> String {
        let name = node.value().name();
        if is_svg(node) {
            name.to_string()
        } else {
            name.to_ascii_uppercase()
        }
    }

    fn id(&self, node: &Self::Node) -> String {
        node.value().id().unwrap_or_default().to_string()
    }

    /// SVG elements expose `className` as an animated value, not a string.
    fn class_name(&self, node: &Self::Node) -> ClassName {
        if is_svg(node) {
            return ClassName::Opaque;
        }
        ClassName::Text(node.value().attr("class").unwrap_or_default().to_string())
    }

    fn parent(&self, node: &Self::Node) -> Option<Self::Node> {
        node.parent().and_then(ElementRef::wrap)
    }

    fn is_body(&self, node: &Self::Node) -> bool {
        node.value().name() == "body"
    }

    fn text_content(&self, node: &Self::Node) -> String {
        node.text().collect()
    }
}

/// The selection a click on each element matching `selector` would produce.
pub fn derive_selections(
    html: &str,
    selector: &str,
    config: &PickerConfig,
) -> Result<Vec<ElementSelection>, DeriveError> {
    let document = Html::parse_document(html);
    let tree = HtmlTree::new(&document);

    let selections = tree
        .select(selector)?
        .iter()
        .map(|node| ElementSelection {
            class_path: derive_class_path(&tree, node, config.max_depth).to_string(),
            element: element_info(&tree, node, config.text_preview_chars),
        })
        .collect();
    Ok(selections)
}
