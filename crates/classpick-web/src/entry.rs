use crate::dialogs::WindowDialogs;
use crate::opener::OpenerPort;
use crate::page::{DomPage, SharedPicker};
use classpick_core::activation::{ActivationGate, GateAction};
use classpick_core::delivery::{Delivery, DialogDelivery, OpenerDelivery};
use classpick_core::{Picker, PickerConfig, PickerMessage};
use std::cell::RefCell;
use std::rc::Rc;
use std::thread::LocalKey;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{MessageEvent, Window};

/// How a picker hands its selection back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Prompt and clipboard in the current page.
    Standalone,
    /// `postMessage` to `window.opener`.
    Embedded,
}

thread_local! {
    /// One picker per mode; a bookmarklet and a host may both load the bundle
    /// into the same page.
    static STANDALONE: RefCell<Option<SharedPicker>> = const { RefCell::new(None) };
    static EMBEDDED: RefCell<Option<SharedPicker>> = const { RefCell::new(None) };
    static GATE: RefCell<Option<ActivationGate>> = const { RefCell::new(None) };
    static MESSAGE_LISTENER: RefCell<Option<Closure<dyn FnMut(MessageEvent)>>> =
        const { RefCell::new(None) };
}

fn slot(mode: Mode) -> &'static LocalKey<RefCell<Option<SharedPicker>>> {
    match mode {
        Mode::Standalone => &STANDALONE,
        Mode::Embedded => &EMBEDDED,
    }
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
}

fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("No global window"))
}

fn parse_config(config: JsValue) -> Result<PickerConfig, JsValue> {
    if config.is_undefined() || config.is_null() {
        return Ok(PickerConfig::default());
    }
    serde_wasm_bindgen::from_value(config)
        .map_err(|e| JsValue::from_str(&format!("Invalid picker config: {}", e)))
}

/// The picker installed for `mode`, if any.
pub fn installed(mode: Mode) -> Option<SharedPicker> {
    slot(mode).with(|slot| slot.borrow().clone())
}

/// A picker is busy while its session is live or one of its handlers runs.
fn is_busy(picker: &SharedPicker) -> bool {
    picker
        .try_borrow()
        .map(|picker| picker.is_active())
        .unwrap_or(true)
}

/// The picker whose session is live, whatever its mode.
fn busy_picker() -> Option<SharedPicker> {
    [Mode::Standalone, Mode::Embedded]
        .into_iter()
        .filter_map(installed)
        .find(is_busy)
}

/// Return the picker for `mode`, building it with `delivery` when none exists
/// or the installed one was configured differently.
///
/// An existing picker is never replaced while its session is live.
fn install_with<F>(mode: Mode, config: PickerConfig, delivery: F) -> Result<SharedPicker, JsValue>
where
    F: FnOnce(Window) -> Box<dyn Delivery>,
{
    if let Some(picker) = installed(mode) {
        let unchanged = picker
            .try_borrow()
            .is_ok_and(|picker| picker.config() == &config);
        if unchanged {
            return Ok(picker);
        }
        if is_busy(&picker) {
            return Err(JsValue::from_str(&format!(
                "classpick: cannot reconfigure the {:?} picker during a session",
                mode
            )));
        }
    }

    let window = window()?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("Window has no document"))?;
    let delivery = delivery(window.clone());
    let picker: SharedPicker = Rc::new_cyclic(|handle| {
        let page = DomPage::new(window, document, handle.clone());
        RefCell::new(Picker::new(page, delivery, config))
    });

    slot(mode).with(|slot| *slot.borrow_mut() = Some(picker.clone()));
    Ok(picker)
}

/// Start a session on `picker`, unless any picker already has one; that
/// picker then shows the "already active" notice.
fn activate(picker: &SharedPicker) {
    let target = busy_picker().unwrap_or_else(|| picker.clone());
    // A refused activation has already shown its notice.
    if let Ok(mut target) = target.try_borrow_mut() {
        let _ = target.activate();
    }
}

/// Start picking in the current page; the result is shown in a prompt.
#[wasm_bindgen(js_name = runStandalone)]
pub fn run_standalone(config: JsValue) -> Result<(), JsValue> {
    if let Some(active) = busy_picker() {
        activate(&active);
        return Ok(());
    }
    let config = parse_config(config)?;
    let picker = install_with(Mode::Standalone, config, |window| {
        Box::new(DialogDelivery::new(WindowDialogs::new(window))) as Box<dyn Delivery>
    })?;
    activate(&picker);
    Ok(())
}

/// Install the engine for embedded use; selections go to `window.opener`.
#[wasm_bindgen(js_name = installEngine)]
pub fn install_engine(config: JsValue) -> Result<(), JsValue> {
    let config = parse_config(config)?;
    install_with(Mode::Embedded, config, |window| {
        Box::new(OpenerDelivery::new(OpenerPort::new(window))) as Box<dyn Delivery>
    })?;
    Ok(())
}

/// Listen for `START_ELEMENT_SELECTION` from the host window.
///
/// May run before [`install_engine`]; an early request is retried once.
#[wasm_bindgen(js_name = listenForActivation)]
pub fn listen_for_activation(config: JsValue) -> Result<(), JsValue> {
    if MESSAGE_LISTENER.with(|slot| slot.borrow().is_some()) {
        return Ok(());
    }
    let config = parse_config(config)?;
    GATE.with(|gate| *gate.borrow_mut() = Some(ActivationGate::from_config(&config)));

    let listener = Closure::wrap(Box::new(|event: MessageEvent| {
        let Ok(message) = serde_wasm_bindgen::from_value::<PickerMessage>(event.data()) else {
            return;
        };
        if message == PickerMessage::StartElementSelection {
            on_start_request();
        }
    }) as Box<dyn FnMut(MessageEvent)>);

    window()?.add_event_listener_with_callback("message", listener.as_ref().unchecked_ref())?;
    MESSAGE_LISTENER.with(|slot| *slot.borrow_mut() = Some(listener));
    Ok(())
}

fn gate_step(step: impl FnOnce(&mut ActivationGate, bool) -> GateAction) -> GateAction {
    let ready = installed(Mode::Embedded).is_some();
    GATE.with(|gate| match gate.borrow_mut().as_mut() {
        Some(gate) => step(gate, ready),
        None => GateAction::Drop,
    })
}

fn on_start_request() {
    match gate_step(ActivationGate::on_request) {
        GateAction::Activate => {
            if let Some(picker) = installed(Mode::Embedded) {
                activate(&picker);
            }
        }
        GateAction::RetryAfter(delay) => schedule_retry(delay.as_millis() as i32),
        GateAction::Drop => {}
    }
}

fn schedule_retry(delay_ms: i32) {
    let retry = Closure::once_into_js(|| {
        if gate_step(ActivationGate::on_retry) == GateAction::Activate {
            if let Some(picker) = installed(Mode::Embedded) {
                activate(&picker);
            }
        }
    });
    let scheduled = window().and_then(|window| {
        window.set_timeout_with_callback_and_timeout_and_arguments_0(
            retry.unchecked_ref(),
            delay_ms,
        )
    });
    if let Err(e) = scheduled {
        web_sys::console::warn_2(&JsValue::from_str("classpick: retry not scheduled"), &e);
    }
}
