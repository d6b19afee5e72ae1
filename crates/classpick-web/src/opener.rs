use classpick_common::{DeliveryError, PickerMessage};
use classpick_core::delivery::MessagePort;
use serde::Serialize;
use wasm_bindgen::JsCast;
use web_sys::Window;

/// `window.opener.postMessage(message, "*")`.
///
/// The target origin is not restricted: the picker only runs when a host
/// opened this window and injected it.
pub struct OpenerPort {
    window: Window,
}

impl OpenerPort {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl MessagePort for OpenerPort {
    fn post(&self, message: &PickerMessage) -> Result<(), DeliveryError> {
        let opener = self
            .window
            .opener()
            .map_err(|e| DeliveryError::Transport(format!("{:?}", e)))?;
        if opener.is_null() || opener.is_undefined() {
            return Err(DeliveryError::NoOpener);
        }

        let payload = message
            .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
            .map_err(|e| DeliveryError::Encode(e.to_string()))?;

        opener
            .unchecked_into::<Window>()
            .post_message(&payload, "*")
            .map_err(|e| DeliveryError::Transport(format!("{:?}", e)))
    }
}
