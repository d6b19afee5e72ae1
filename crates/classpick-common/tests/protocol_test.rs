use classpick_common::protocol::{ElementInfo, ElementSelection, PickerMessage};
use serde_json::json;

fn sample_selection() -> ElementSelection {
    ElementSelection {
        class_path: "div.container > div.row > section#hero".to_string(),
        element: ElementInfo {
            tag_name: "SECTION".to_string(),
            class_name: "banner large".to_string(),
            id: "hero".to_string(),
            text_content: "Welcome".to_string(),
        },
    }
}

#[test]
fn test_element_selected_wire_shape() {
    let message = PickerMessage::from(sample_selection());
    let value = serde_json::to_value(&message).unwrap();

    assert_eq!(
        value,
        json!({
            "type": "ELEMENT_SELECTED",
            "classPath": "div.container > div.row > section#hero",
            "elementInfo": {
                "tagName": "SECTION",
                "className": "banner large",
                "id": "hero",
                "textContent": "Welcome"
            }
        })
    );
}

#[test]
fn test_parse_host_start_message() {
    let message = PickerMessage::from_json(r#"{"type":"START_ELEMENT_SELECTION"}"#).unwrap();
    assert_eq!(message, PickerMessage::StartElementSelection);
}

#[test]
fn test_parse_selected_with_missing_optional_fields() {
    let raw = r#"{"type":"ELEMENT_SELECTED","classPath":"p","elementInfo":{"tagName":"P"}}"#;
    match PickerMessage::from_json(raw).unwrap() {
        PickerMessage::ElementSelected {
            class_path,
            element_info,
        } => {
            assert_eq!(class_path, "p");
            assert_eq!(element_info.tag_name, "P");
            assert!(element_info.id.is_empty());
            assert!(element_info.class_name.is_empty());
        }
        other => panic!("Expected ElementSelected, got {:?}", other),
    }
}

#[test]
fn test_foreign_messages_are_errors() {
    assert!(PickerMessage::from_json(r#"{"source":"react-devtools"}"#).is_err());
    assert!(PickerMessage::from_json("not json").is_err());
}

#[test]
fn test_selection_serializes_camel_case() {
    let value = serde_json::to_value(sample_selection()).unwrap();
    assert_eq!(value["classPath"], "div.container > div.row > section#hero");
    assert_eq!(value["elementInfo"]["tagName"], "SECTION");
}
