//! Result delivery strategies.
//!
//! Delivery is fire-and-forget: nothing waits for the host to acknowledge a
//! selection, and a failed delivery never prevents the session from being torn
//! down.

use classpick_common::{DeliveryError, ElementSelection, PickerMessage};
use std::rc::Rc;
use tracing::{debug, warn};

pub const PROMPT_MESSAGE: &str = "Class path (edit if needed, then confirm to copy):";
pub const COPIED_NOTICE: &str = "Class path copied to clipboard!";
pub const COPY_FAILED_NOTICE: &str =
    "Could not copy to clipboard. The class path is still shown in the dialog.";

pub trait Delivery {
    fn deliver(&mut self, selection: &ElementSelection) -> Result<(), DeliveryError>;
}

impl<D: Delivery + ?Sized> Delivery for Box<D> {
    fn deliver(&mut self, selection: &ElementSelection) -> Result<(), DeliveryError> {
        (**self).deliver(selection)
    }
}

/// Shows a blocking notice to the operator.
pub trait Notifier {
    fn notify(&self, message: &str);
}

/// Completion callback of an asynchronous clipboard write.
pub type ClipboardCallback = Box<dyn FnOnce(Result<(), String>)>;

pub trait Clipboard {
    /// Start writing `text`; `done` runs once the write settles.
    fn write_text(&self, text: &str, done: ClipboardCallback);
}

/// Capabilities of the page a standalone picker runs in.
pub trait DialogHost {
    /// Blocking prompt seeded with `initial`. `None` when dismissed.
    fn prompt(&self, message: &str, initial: &str) -> Option<String>;

    fn notifier(&self) -> Rc<dyn Notifier>;

    /// `None` when the page offers no clipboard access.
    fn clipboard(&self) -> Option<Box<dyn Clipboard>>;
}

/// Standalone delivery: show the path in a prompt and copy what the operator confirms.
pub struct DialogDelivery<H> {
    host: H,
}

impl<H: DialogHost> DialogDelivery<H> {
    pub fn new(host: H) -> Self {
        Self { host }
    }

    pub fn host(&self) -> &H {
        &self.host
    }
}

impl<H: DialogHost> Delivery for DialogDelivery<H> {
    fn deliver(&mut self, selection: &ElementSelection) -> Result<(), DeliveryError> {
        let Some(value) = self.host.prompt(PROMPT_MESSAGE, &selection.class_path) else {
            debug!("Class path prompt dismissed");
            return Ok(());
        };
        if value.is_empty() {
            return Ok(());
        }

        let Some(clipboard) = self.host.clipboard() else {
            debug!("No clipboard available; class path shown in prompt only");
            return Ok(());
        };

        let notifier = self.host.notifier();
        clipboard.write_text(
            &value,
            Box::new(move |result| match result {
                Ok(()) => notifier.notify(COPIED_NOTICE),
                Err(e) => {
                    warn!("Clipboard write failed: {}", e);
                    notifier.notify(COPY_FAILED_NOTICE);
                }
            }),
        );
        Ok(())
    }
}

/// Channel to the window that opened the picker.
pub trait MessagePort {
    fn post(&self, message: &PickerMessage) -> Result<(), DeliveryError>;
}

/// Embedded delivery: post `ELEMENT_SELECTED` to the opener.
pub struct OpenerDelivery<P> {
    port: P,
}

impl<P: MessagePort> OpenerDelivery<P> {
    pub fn new(port: P) -> Self {
        Self { port }
    }

    pub fn port(&self) -> &P {
        &self.port
    }
}

impl<P: MessagePort> Delivery for OpenerDelivery<P> {
    fn deliver(&mut self, selection: &ElementSelection) -> Result<(), DeliveryError> {
        self.port.post(&PickerMessage::from(selection.clone()))
    }
}
