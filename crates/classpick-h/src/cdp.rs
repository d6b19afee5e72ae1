use crate::config::HostConfig;
use crate::error::HostError;
use chromiumoxide::cdp::js_protocol::runtime::{EventConsoleApiCalled, RemoteObject};
use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::StreamExt;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Overrides the throwaway Chromium profile, e.g. to stay logged in.
pub const PROFILE_DIR_ENV: &str = "CLASSPICK_USER_DATA_DIR";

/// The Chromium user-data directory of one host run.
#[derive(Debug)]
struct ProfileDir {
    path: PathBuf,
    /// Created by us, so removed on close.
    ephemeral: bool,
}

impl ProfileDir {
    fn resolve() -> Result<Self, HostError> {
        let (path, ephemeral) = match std::env::var(PROFILE_DIR_ENV) {
            Ok(dir) => (PathBuf::from(dir), false),
            Err(_) => {
                let stamp = SystemTime::now()
                    .duration_since(UNIX_EPOCH)
                    .map_err(|e| HostError::Launch(format!("System clock error: {}", e)))?
                    .as_nanos();
                let name = format!("classpick-profile-{}-{}", std::process::id(), stamp);
                (std::env::temp_dir().join(name), true)
            }
        };
        std::fs::create_dir_all(&path).map_err(|e| HostError::Launch(e.to_string()))?;
        debug!(ephemeral, "Chromium profile at {}", path.display());
        Ok(Self { path, ephemeral })
    }

    fn remove(&self) {
        if !self.ephemeral {
            return;
        }
        if let Err(e) = std::fs::remove_dir_all(&self.path) {
            debug!("Could not remove profile {}: {}", self.path.display(), e);
        }
    }
}

/// A Chromium instance plus the host page the picker reports back to.
pub struct CdpClient {
    pub browser: Browser,
    pub handler_task: JoinHandle<()>,
    pub host_page: Page,
    profile: ProfileDir,
}

impl CdpClient {
    pub async fn launch(config: &HostConfig) -> Result<Self, HostError> {
        let profile = ProfileDir::resolve()?;
        let browser_config = browser_config(config, &profile)?;

        let (browser, mut handler) = Browser::launch(browser_config)
            .await
            .map_err(|e| HostError::Launch(e.to_string()))?;

        // The handler drives the CDP connection; nothing works unless it is polled.
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    warn!("CDP handler error: {}", e);
                }
            }
            debug!("CDP handler finished");
        });

        let host_page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| HostError::Launch(format!("Failed to open host page: {}", e)))?;

        Ok(Self {
            browser,
            handler_task,
            host_page,
            profile,
        })
    }

    pub async fn close(mut self) -> Result<(), HostError> {
        self.browser.close().await?;
        let joined = self.handler_task.await;
        self.profile.remove();
        joined.map_err(|e| HostError::Cdp(format!("CDP handler panicked: {}", e)))
    }
}

fn browser_config(config: &HostConfig, profile: &ProfileDir) -> Result<BrowserConfig, HostError> {
    let mut builder = BrowserConfig::builder()
        .no_sandbox()
        .user_data_dir(&profile.path);

    // The operator has to see the page to pick from it.
    if config.visible {
        builder = builder.with_head();
    }
    info!(visible = config.visible, "Launching Chromium");

    if let Some(bin) = config
        .chrome_bin
        .clone()
        .or_else(|| std::env::var("CHROME_BIN").ok())
    {
        info!("Chromium binary: {}", bin);
        builder = builder.chrome_executable(bin);
    }

    builder
        .build()
        .map_err(|e| HostError::Launch(format!("Invalid browser config: {}", e)))
}

/// Mirror the page's console into our log; the picker reports clipboard and
/// listener failures there.
pub async fn forward_console(page: &Page) -> Result<(), HostError> {
    let mut events = page.event_listener::<EventConsoleApiCalled>().await?;

    tokio::spawn(async move {
        while let Some(event) = events.next().await {
            let line = event
                .args
                .iter()
                .map(describe)
                .collect::<Vec<_>>()
                .join(" ");
            debug!(target: "classpick::page", "[{:?}] {}", event.r#type, line);
        }
    });
    Ok(())
}

fn describe(arg: &RemoteObject) -> String {
    if let Some(description) = &arg.description {
        return description.clone();
    }
    match &arg.value {
        Some(value) => value.to_string(),
        None => "undefined".to_string(),
    }
}
