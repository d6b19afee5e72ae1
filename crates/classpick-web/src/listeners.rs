use crate::page::PickerHandle;
use classpick_core::{Disposition, PickerEvent};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, EventTarget, KeyboardEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EventKind {
    PointerEnter,
    PointerLeave,
    Click,
    KeyDown,
}

impl EventKind {
    const ALL: [EventKind; 4] = [
        EventKind::PointerEnter,
        EventKind::PointerLeave,
        EventKind::Click,
        EventKind::KeyDown,
    ];

    /// `mouseover`/`mouseout` bubble, so one document-level listener sees
    /// every element.
    fn event_name(self) -> &'static str {
        match self {
            EventKind::PointerEnter => "mouseover",
            EventKind::PointerLeave => "mouseout",
            EventKind::Click => "click",
            EventKind::KeyDown => "keydown",
        }
    }

    fn translate(self, event: &Event) -> Option<PickerEvent<Element>> {
        if self == EventKind::KeyDown {
            return event
                .dyn_ref::<KeyboardEvent>()
                .map(|key| PickerEvent::KeyDown(key.key()));
        }
        let target = event.target()?.dyn_into::<Element>().ok()?;
        Some(match self {
            EventKind::PointerEnter => PickerEvent::PointerEnter(target),
            EventKind::PointerLeave => PickerEvent::PointerLeave(target),
            _ => PickerEvent::Click(target),
        })
    }
}

type Callback = Closure<dyn FnMut(Event)>;

/// The four capture-phase listeners of one session.
pub struct Listeners {
    target: EventTarget,
    registered: Vec<(EventKind, Callback)>,
}

impl Listeners {
    pub fn attach(target: EventTarget, handle: PickerHandle) -> Result<Self, JsValue> {
        let mut listeners = Self {
            target,
            registered: Vec::with_capacity(EventKind::ALL.len()),
        };
        for kind in EventKind::ALL {
            let callback = dispatcher(kind, handle.clone());
            if let Err(e) = listeners.target.add_event_listener_with_callback_and_bool(
                kind.event_name(),
                callback.as_ref().unchecked_ref(),
                true,
            ) {
                listeners.detach();
                return Err(e);
            }
            listeners.registered.push((kind, callback));
        }
        Ok(listeners)
    }

    pub fn detach(self) {
        for (kind, callback) in &self.registered {
            let _ = self.target.remove_event_listener_with_callback_and_bool(
                kind.event_name(),
                callback.as_ref().unchecked_ref(),
                true,
            );
        }
        // Detaching usually happens inside one of these callbacks; free them
        // once it has returned.
        let registered = self.registered;
        wasm_bindgen_futures::spawn_local(async move {
            drop(registered);
        });
    }
}

fn dispatcher(kind: EventKind, handle: PickerHandle) -> Callback {
    Closure::wrap(Box::new(move |event: Event| {
        let Some(picker) = handle.upgrade() else {
            return;
        };
        let Some(picker_event) = kind.translate(&event) else {
            return;
        };
        let disposition = match picker.try_borrow_mut() {
            Ok(mut picker) => picker.handle(picker_event),
            Err(_) => return,
        };
        if disposition == Disposition::Consume {
            event.prevent_default();
            event.stop_propagation();
        }
    }) as Box<dyn FnMut(Event)>)
}
