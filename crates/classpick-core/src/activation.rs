//! Activation of an embedded picker.
//!
//! A host may ask for a session before the picker engine has been installed in
//! the target window. Such a request is retried exactly once after a short
//! delay; if the engine is still missing the request is dropped without
//! telling the host.

use crate::config::PickerConfig;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateAction {
    Activate,
    /// Check again once after the delay, then call [`ActivationGate::on_retry`].
    RetryAfter(Duration),
    Drop,
}

#[derive(Debug, Clone)]
pub struct ActivationGate {
    retry_delay: Duration,
    retry_pending: bool,
}

impl ActivationGate {
    pub fn new(retry_delay: Duration) -> Self {
        Self {
            retry_delay,
            retry_pending: false,
        }
    }

    pub fn from_config(config: &PickerConfig) -> Self {
        Self::new(Duration::from_millis(config.activation_retry_ms))
    }

    pub fn retry_pending(&self) -> bool {
        self.retry_pending
    }

    /// A start request arrived; `ready` tells whether the engine is installed.
    pub fn on_request(&mut self, ready: bool) -> GateAction {
        if ready {
            return GateAction::Activate;
        }
        if self.retry_pending {
            debug!("Start request dropped: a retry is already scheduled");
            return GateAction::Drop;
        }
        self.retry_pending = true;
        GateAction::RetryAfter(self.retry_delay)
    }

    /// The deferred check of a request that arrived too early.
    pub fn on_retry(&mut self, ready: bool) -> GateAction {
        self.retry_pending = false;
        if ready {
            GateAction::Activate
        } else {
            debug!("Start request dropped: picker engine never installed");
            GateAction::Drop
        }
    }
}
