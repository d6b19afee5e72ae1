use classpick_core::delivery::{Clipboard, ClipboardCallback, DialogHost, Notifier};
use js_sys::{Function, Promise, Reflect};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::Window;

/// `window.prompt`, `window.alert` and the async clipboard of the current page.
pub struct WindowDialogs {
    window: Window,
}

impl WindowDialogs {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl DialogHost for WindowDialogs {
    fn prompt(&self, message: &str, initial: &str) -> Option<String> {
        self.window
            .prompt_with_message_and_default(message, initial)
            .ok()
            .flatten()
    }

    fn notifier(&self) -> Rc<dyn Notifier> {
        Rc::new(WindowNotifier {
            window: self.window.clone(),
        })
    }

    fn clipboard(&self) -> Option<Box<dyn Clipboard>> {
        NavigatorClipboard::detect(&self.window).map(|c| Box::new(c) as Box<dyn Clipboard>)
    }
}

struct WindowNotifier {
    window: Window,
}

impl Notifier for WindowNotifier {
    fn notify(&self, message: &str) {
        let _ = self.window.alert_with_message(message);
    }
}

/// `navigator.clipboard.writeText`, looked up dynamically because insecure
/// contexts and older browsers do not expose it.
struct NavigatorClipboard {
    clipboard: JsValue,
    write_text: Function,
}

impl NavigatorClipboard {
    fn detect(window: &Window) -> Option<Self> {
        let navigator = Reflect::get(window, &JsValue::from_str("navigator")).ok()?;
        let clipboard = Reflect::get(&navigator, &JsValue::from_str("clipboard")).ok()?;
        if clipboard.is_undefined() || clipboard.is_null() {
            return None;
        }
        let write_text = Reflect::get(&clipboard, &JsValue::from_str("writeText"))
            .ok()?
            .dyn_into::<Function>()
            .ok()?;
        Some(Self {
            clipboard,
            write_text,
        })
    }
}

impl Clipboard for NavigatorClipboard {
    fn write_text(&self, text: &str, done: ClipboardCallback) {
        let promise = match self.write_text.call1(&self.clipboard, &JsValue::from_str(text)) {
            Ok(value) => Promise::resolve(&value),
            Err(e) => {
                done(Err(describe(&e)));
                return;
            }
        };
        wasm_bindgen_futures::spawn_local(async move {
            let result = JsFuture::from(promise)
                .await
                .map(|_| ())
                .map_err(|e| describe(&e));
            if let Err(e) = &result {
                web_sys::console::warn_1(&JsValue::from_str(&format!(
                    "classpick: clipboard write failed: {}",
                    e
                )));
            }
            done(result);
        });
    }
}

fn describe(error: &JsValue) -> String {
    error
        .as_string()
        .or_else(|| {
            error
                .dyn_ref::<js_sys::Error>()
                .map(|e| String::from(e.message()))
        })
        .unwrap_or_else(|| format!("{:?}", error))
}
