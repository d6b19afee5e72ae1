use crate::error::HostError;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use chromiumoxide::Page;
use classpick_core::PickerConfig;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Global set once the bundle has been initialised in a page.
pub const INSTALLED_FLAG: &str = "__classpickInstalled";

const MAX_CONTEXT_RETRIES: u32 = 10;
const CONTEXT_RETRY_DELAY: Duration = Duration::from_millis(100);

/// The `wasm-pack --target no-modules` output of `classpick-web`.
#[derive(Debug, Clone)]
pub struct Bundle {
    pub glue_js: String,
    pub wasm: Vec<u8>,
}

impl Bundle {
    pub fn glue_path(dir: &Path, name: &str) -> PathBuf {
        dir.join(format!("{}.js", name))
    }

    pub fn wasm_path(dir: &Path, name: &str) -> PathBuf {
        dir.join(format!("{}_bg.wasm", name))
    }

    pub async fn load(dir: &Path, name: &str) -> Result<Self, HostError> {
        let glue_path = Self::glue_path(dir, name);
        let glue_js = tokio::fs::read_to_string(&glue_path)
            .await
            .map_err(|source| HostError::Bundle {
                path: glue_path,
                source,
            })?;

        let wasm_path = Self::wasm_path(dir, name);
        let wasm = tokio::fs::read(&wasm_path)
            .await
            .map_err(|source| HostError::Bundle {
                path: wasm_path,
                source,
            })?;

        Ok(Self { glue_js, wasm })
    }

    /// A self-contained expression that initialises the bundle, starts
    /// listening for the host and installs the engine. Resolves to `true`.
    pub fn injection_script(&self, config: &PickerConfig) -> Result<String, HostError> {
        let config_json =
            serde_json::to_string(config).map_err(|e| HostError::Injection(e.to_string()))?;
        let wasm_b64 = STANDARD.encode(&self.wasm);

        Ok(format!(
            r#"(async () => {{
    if (window.{flag}) {{ return true; }}
{glue}
    const bytes = Uint8Array.from(atob("{wasm_b64}"), (c) => c.charCodeAt(0));
    await wasm_bindgen({{ module_or_path: bytes }});
    wasm_bindgen.listenForActivation({config_json});
    wasm_bindgen.installEngine({config_json});
    window.{flag} = true;
    return true;
}})()"#,
            flag = INSTALLED_FLAG,
            glue = self.glue_js,
        ))
    }
}

/// Errors Chromium reports while the page is between documents.
fn is_context_error(err: &str) -> bool {
    const MARKERS: [&str; 3] = [
        "Cannot find context",
        "Execution context was destroyed",
        "-32000",
    ];
    MARKERS.iter().any(|marker| err.contains(marker))
}

/// Run `attempt` until it succeeds, retrying only while the page is
/// navigating.
async fn retry_on_context_error<T, E, F, Fut>(what: &str, mut attempt: F) -> Result<T, HostError>
where
    E: std::fmt::Display,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let mut last = String::new();
    for n in 1..=MAX_CONTEXT_RETRIES {
        let err = match attempt().await {
            Ok(value) => return Ok(value),
            Err(e) => e.to_string(),
        };
        if !is_context_error(&err) {
            return Err(HostError::Injection(err));
        }
        tracing::debug!("{}: no execution context ({}/{})", what, n, MAX_CONTEXT_RETRIES);
        last = err;
        tokio::time::sleep(CONTEXT_RETRY_DELAY).await;
    }
    Err(HostError::Injection(format!(
        "{} gave up after {} attempts: {}",
        what, MAX_CONTEXT_RETRIES, last
    )))
}

pub async fn inject_picker(
    page: &Page,
    bundle: &Bundle,
    config: &PickerConfig,
) -> Result<(), HostError> {
    let script = bundle.injection_script(config)?;
    retry_on_context_error("Picker injection", || try_inject_picker(page, &script)).await
}

async fn try_inject_picker(page: &Page, script: &str) -> Result<(), HostError> {
    let installed: bool = page
        .evaluate(format!("window.{} === true", INSTALLED_FLAG))
        .await?
        .into_value()
        .map_err(|e| HostError::Injection(format!("Unexpected install flag: {}", e)))?;
    if installed {
        return Ok(());
    }

    tracing::info!("Injecting picker bundle ({} bytes)", script.len());
    page.evaluate(script).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_errors_are_recognised() {
        assert!(is_context_error("Execution context was destroyed."));
        assert!(is_context_error("Cannot find context with specified id"));
        assert!(!is_context_error("ReferenceError: wasm_bindgen is not defined"));
    }
}
