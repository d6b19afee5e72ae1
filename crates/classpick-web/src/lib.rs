//! Browser bindings for the element picker.
//!
//! Built with `wasm-pack build --target no-modules`, the bundle exposes three
//! functions on the global `wasm_bindgen` object:
//!
//! ```ignore
//! // Standalone (bookmarklet): pick in the current page, show a prompt.
//! wasm_bindgen.runStandalone();
//!
//! // Embedded: wait for START_ELEMENT_SELECTION, then post
//! // ELEMENT_SELECTED back to window.opener.
//! wasm_bindgen.listenForActivation();
//! wasm_bindgen.installEngine({ max_depth: 3 });
//! ```

#[cfg(target_arch = "wasm32")]
mod dialogs;
#[cfg(target_arch = "wasm32")]
mod entry;
#[cfg(target_arch = "wasm32")]
mod listeners;
#[cfg(target_arch = "wasm32")]
mod opener;
#[cfg(target_arch = "wasm32")]
pub mod page;

#[cfg(target_arch = "wasm32")]
pub use entry::*;

/// Data attribute marking nodes the picker inserted into the page.
pub const MARKER_ATTRIBUTE: &str = "data-classpick";
pub const OVERLAY_MARKER: &str = "overlay";
pub const BANNER_MARKER: &str = "banner";

/// CSS selector matching every inserted node carrying `marker`.
pub fn marker_selector(marker: &str) -> String {
    format!("[{}=\"{}\"]", MARKER_ATTRIBUTE, marker)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_selector_is_attribute_match() {
        assert_eq!(marker_selector(BANNER_MARKER), r#"[data-classpick="banner"]"#);
    }
}
