//! The embedded-mode host.
//!
//! The host page (an `about:blank` tab) opens the target URL as a popup so
//! that the picker has a `window.opener` to report to. A CDP binding on the
//! host page turns the `ELEMENT_SELECTED` message into an event we can await.

use crate::cdp::{CdpClient, forward_console};
use crate::config::ClasspickConfig;
use crate::error::HostError;
use crate::inject::{Bundle, inject_picker};
use async_trait::async_trait;
use chromiumoxide::Page;
use chromiumoxide::cdp::browser_protocol::page::SetBypassCspParams;
use chromiumoxide::cdp::browser_protocol::target::TargetId;
use chromiumoxide::cdp::js_protocol::runtime::{
    AddBindingParams, EvaluateParams, EventBindingCalled,
};
use chromiumoxide::listeners::EventStream;
use classpick_common::{ElementSelection, PickerMessage};
use futures::StreamExt;
use std::collections::HashSet;
use std::time::Duration;
use tracing::{debug, info};

pub const RESULT_BINDING: &str = "__classpickResult";
const TARGET_HANDLE: &str = "__classpickTarget";

const POPUP_POLL_INTERVAL: Duration = Duration::from_millis(100);
const POPUP_POLL_ATTEMPTS: u32 = 100;

#[async_trait]
pub trait PickerHost: Send {
    async fn launch(&mut self) -> Result<(), HostError>;

    async fn close(&mut self) -> Result<(), HostError>;

    /// Open `url`, let the operator pick an element and return it.
    async fn pick(&mut self, url: &str) -> Result<ElementSelection, HostError>;
}

pub struct CdpHost {
    config: ClasspickConfig,
    client: Option<CdpClient>,
    bundle: Option<Bundle>,
}

impl CdpHost {
    pub fn new(config: ClasspickConfig) -> Self {
        Self {
            config,
            client: None,
            bundle: None,
        }
    }

    pub fn config(&self) -> &ClasspickConfig {
        &self.config
    }

    pub fn pick_timeout(&self) -> Duration {
        Duration::from_millis(self.config.host.pick_timeout_ms)
    }

    /// Open `url` with the picker installed and started.
    pub async fn open(&mut self, url: &str) -> Result<PickSession, HostError> {
        let bundle = self.bundle.as_ref().ok_or(HostError::NotReady)?;
        let client = self.client.as_ref().ok_or(HostError::NotReady)?;
        let host_page = &client.host_page;

        host_page.execute(AddBindingParams::new(RESULT_BINDING)).await?;
        let events = host_page.event_listener::<EventBindingCalled>().await?;
        host_page.evaluate(host_listener_script()).await?;

        let known: HashSet<TargetId> = client
            .browser
            .pages()
            .await?
            .iter()
            .map(|page| page.target_id().clone())
            .collect();

        info!("Opening {}", url);
        let open = EvaluateParams::builder()
            .expression(open_popup_script(url)?)
            .user_gesture(true)
            .build()
            .map_err(HostError::Cdp)?;
        host_page
            .evaluate(open)
            .await
            .map_err(|e| HostError::Navigation(e.to_string()))?;

        let target = wait_for_popup(client, &known).await?;
        target.wait_for_navigation().await?;

        // Injected wasm must not be blocked by the site's CSP; the bypass
        // applies from the next load on.
        target.execute(SetBypassCspParams::new(true)).await?;
        target
            .reload()
            .await
            .map_err(|e| HostError::Navigation(e.to_string()))?;
        forward_console(&target).await?;

        inject_picker(&target, bundle, &self.config.picker).await?;

        host_page.evaluate(start_script()?).await?;
        debug!("Sent START_ELEMENT_SELECTION");

        Ok(PickSession {
            target,
            events,
        })
    }
}

#[async_trait]
impl PickerHost for CdpHost {
    async fn launch(&mut self) -> Result<(), HostError> {
        let host = &self.config.host;
        let bundle = Bundle::load(&host.bundle_dir, &host.bundle_name).await?;
        info!("Launching Chromium host...");
        let client = CdpClient::launch(host).await?;
        self.bundle = Some(bundle);
        self.client = Some(client);
        Ok(())
    }

    async fn close(&mut self) -> Result<(), HostError> {
        if let Some(client) = self.client.take() {
            client.close().await?;
        }
        Ok(())
    }

    async fn pick(&mut self, url: &str) -> Result<ElementSelection, HostError> {
        let timeout = self.pick_timeout();
        let session = self.open(url).await?;
        session.wait(timeout).await
    }
}

/// A picker running in a popup, waiting for the operator.
pub struct PickSession {
    target: Page,
    events: EventStream<EventBindingCalled>,
}

impl PickSession {
    /// The page the operator picks from.
    pub fn target(&self) -> &Page {
        &self.target
    }

    pub async fn wait(mut self, timeout: Duration) -> Result<ElementSelection, HostError> {
        let events = &mut self.events;
        let selection = tokio::time::timeout(timeout, async move {
            while let Some(event) = events.next().await {
                if event.name != RESULT_BINDING {
                    continue;
                }
                match PickerMessage::from_json(&event.payload)? {
                    PickerMessage::ElementSelected {
                        class_path,
                        element_info,
                    } => {
                        return Ok(ElementSelection {
                            class_path,
                            element: element_info,
                        });
                    }
                    PickerMessage::StartElementSelection => continue,
                }
            }
            Err(HostError::Closed)
        })
        .await
        .map_err(|_| HostError::Timeout(timeout))??;

        info!(class_path = %selection.class_path, "Selection received");
        Ok(selection)
    }
}

async fn wait_for_popup(client: &CdpClient, known: &HashSet<TargetId>) -> Result<Page, HostError> {
    for _ in 0..POPUP_POLL_ATTEMPTS {
        let pages = client.browser.pages().await?;
        if let Some(page) = pages
            .into_iter()
            .find(|page| !known.contains(page.target_id()))
        {
            return Ok(page);
        }
        tokio::time::sleep(POPUP_POLL_INTERVAL).await;
    }
    Err(HostError::Navigation(
        "Popup window never appeared (blocked?)".to_string(),
    ))
}

/// Forwards `ELEMENT_SELECTED` messages from the popup to the CDP binding.
fn host_listener_script() -> String {
    format!(
        r#"(() => {{
    window.addEventListener("message", (event) => {{
        if (event.data && event.data.type === "ELEMENT_SELECTED") {{
            window.{binding}(JSON.stringify(event.data));
        }}
    }});
    return true;
}})()"#,
        binding = RESULT_BINDING
    )
}

fn open_popup_script(url: &str) -> Result<String, HostError> {
    let url_json = serde_json::to_string(url).map_err(|e| HostError::Navigation(e.to_string()))?;
    Ok(format!(
        "(() => {{ window.{handle} = window.open({url_json}, \"_blank\"); return window.{handle} !== null; }})()",
        handle = TARGET_HANDLE
    ))
}

fn start_script() -> Result<String, HostError> {
    let message = PickerMessage::StartElementSelection.to_json()?;
    Ok(format!(
        "(() => {{ window.{handle}.postMessage({message}, \"*\"); return true; }})()",
        handle = TARGET_HANDLE
    ))
}
