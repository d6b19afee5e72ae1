use crate::error::ProtocolError;
use serde::{Deserialize, Serialize};

/// Messages exchanged between a host window and the picker window.
///
/// The JSON shape is `{"type": "START_ELEMENT_SELECTION"}` and
/// `{"type": "ELEMENT_SELECTED", "classPath": ..., "elementInfo": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PickerMessage {
    /// Sent by the host to begin a picking session.
    StartElementSelection,
    /// Sent by the picker to its opener once an element was clicked.
    ElementSelected {
        #[serde(rename = "classPath")]
        class_path: String,
        #[serde(rename = "elementInfo")]
        element_info: ElementInfo,
    },
}

impl PickerMessage {
    pub fn from_json(raw: &str) -> Result<Self, ProtocolError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn to_json(&self) -> Result<String, ProtocolError> {
        Ok(serde_json::to_string(self)?)
    }
}

impl From<ElementSelection> for PickerMessage {
    fn from(selection: ElementSelection) -> Self {
        PickerMessage::ElementSelected {
            class_path: selection.class_path,
            element_info: selection.element,
        }
    }
}

/// Raw attributes of the selected element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementInfo {
    /// Tag name as the DOM reports it (upper-case for HTML elements).
    pub tag_name: String,
    /// Class attribute; empty when the element has none or it is not a plain string.
    #[serde(default)]
    pub class_name: String,
    #[serde(default)]
    pub id: String,
    /// Leading characters of the element's text content.
    #[serde(default)]
    pub text_content: String,
}

/// The outcome of a pick: the derived class path and the element it describes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementSelection {
    pub class_path: String,
    #[serde(rename = "elementInfo")]
    pub element: ElementInfo,
}
