//! The picking session state machine.
//!
//! One [`Picker`] owns the page adapter, the delivery strategy and at most one
//! live session. A session starts with [`Picker::activate`] and ends with
//! [`Picker::cleanup`], which runs after a click has been delivered or when
//! Escape is pressed. Cleanup may run any number of times.

use crate::config::PickerConfig;
use crate::delivery::Delivery;
use crate::dom::{PickerPage, element_info};
use crate::highlight::Highlight;
use crate::selector::derive_class_path;
use classpick_common::{ElementSelection, PickerError};
use tracing::{debug, info, warn};

pub const ALREADY_ACTIVE_NOTICE: &str = "Element selector is already active!";
pub const CROSSHAIR_CURSOR: &str = "crosshair";
pub const CANCEL_KEY: &str = "Escape";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerEvent<N> {
    PointerEnter(N),
    PointerLeave(N),
    Click(N),
    KeyDown(String),
}

/// What the adapter should do with the native event after the picker saw it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Let the page handle it as usual.
    Pass,
    /// Prevent the default action and stop propagation.
    Consume,
}

#[derive(Debug)]
struct Session<N> {
    highlight: Highlight<N>,
    prior_cursor: String,
}

pub struct Picker<P: PickerPage, D> {
    page: P,
    delivery: D,
    config: PickerConfig,
    session: Option<Session<P::Node>>,
}

impl<P: PickerPage, D: Delivery> Picker<P, D> {
    pub fn new(page: P, delivery: D, config: PickerConfig) -> Self {
        Self {
            page,
            delivery,
            config,
            session: None,
        }
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut P {
        &mut self.page
    }

    pub fn delivery(&self) -> &D {
        &self.delivery
    }

    pub fn config(&self) -> &PickerConfig {
        &self.config
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn highlighted(&self) -> Option<&P::Node> {
        self.session
            .as_ref()
            .and_then(|session| session.highlight.current())
    }

    /// Start a session: overlay, banner, crosshair cursor and listeners.
    ///
    /// A second activation while a session is live only shows a notice.
    pub fn activate(&mut self) -> Result<(), PickerError> {
        if self.session.is_some() {
            debug!("Activation ignored: session already active");
            self.page.alert(ALREADY_ACTIVE_NOTICE);
            return Err(PickerError::AlreadyActive);
        }

        let prior_cursor = self.page.cursor();
        self.page.install_overlay(&self.config);
        self.page.show_banner(&self.config);
        self.page.set_cursor(CROSSHAIR_CURSOR);
        self.page.listen();
        self.session = Some(Session {
            highlight: Highlight::new(),
            prior_cursor,
        });
        info!("Element picker activated");
        Ok(())
    }

    /// Returns `true` when the highlight moved to `node`.
    pub fn pointer_enter(&mut self, node: &P::Node) -> bool {
        match self.session.as_mut() {
            Some(session) => session.highlight.enter(&mut self.page, node, &self.config),
            None => false,
        }
    }

    /// Returns `true` when `node` was highlighted and has been restored.
    pub fn pointer_leave(&mut self, node: &P::Node) -> bool {
        match self.session.as_mut() {
            Some(session) => session.highlight.leave(&mut self.page, node),
            None => false,
        }
    }

    /// Derive the class path of `node`, deliver it and end the session.
    pub fn click(&mut self, node: &P::Node) -> Option<ElementSelection> {
        self.session.as_ref()?;

        let selection = ElementSelection {
            class_path: derive_class_path(&self.page, node, self.config.max_depth).to_string(),
            element: element_info(&self.page, node, self.config.text_preview_chars),
        };
        info!(class_path = %selection.class_path, "Element selected");

        if let Err(e) = self.delivery.deliver(&selection) {
            warn!("Failed to deliver selection: {}", e);
        }
        self.cleanup();
        Some(selection)
    }

    /// Escape cancels the session without delivering anything.
    pub fn key_down(&mut self, key: &str) -> bool {
        if key != CANCEL_KEY || self.session.is_none() {
            return false;
        }
        info!("Element picker cancelled");
        self.cleanup();
        true
    }

    /// Tear down every side effect of the session.
    ///
    /// Restores a highlight that never received its pointer-leave. Safe to call
    /// when no session is active.
    pub fn cleanup(&mut self) {
        let session = self.session.take();

        self.page.remove_overlay();
        self.page.remove_banners();
        self.page.unlisten();

        if let Some(mut session) = session {
            session.highlight.clear(&mut self.page);
            self.page.set_cursor(&session.prior_cursor);
            debug!("Picker session cleaned up");
        }
    }

    pub fn handle(&mut self, event: PickerEvent<P::Node>) -> Disposition {
        match event {
            PickerEvent::PointerEnter(node) => {
                self.pointer_enter(&node);
                Disposition::Pass
            }
            PickerEvent::PointerLeave(node) => {
                self.pointer_leave(&node);
                Disposition::Pass
            }
            PickerEvent::Click(node) => match self.click(&node) {
                Some(_) => Disposition::Consume,
                None => Disposition::Pass,
            },
            PickerEvent::KeyDown(key) => {
                self.key_down(&key);
                Disposition::Pass
            }
        }
    }
}
