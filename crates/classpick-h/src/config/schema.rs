use classpick_core::PickerConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClasspickConfig {
    #[serde(default)]
    pub picker: PickerConfig,
    #[serde(default)]
    pub host: HostConfig,
    #[serde(default)]
    pub bookmarklet: BookmarkletConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostConfig {
    /// Output directory of `wasm-pack build --target no-modules`.
    #[serde(default = "default_bundle_dir")]
    pub bundle_dir: PathBuf,
    #[serde(default = "default_bundle_name")]
    pub bundle_name: String,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default = "default_pick_timeout_ms")]
    pub pick_timeout_ms: u64,
    /// Falls back to the `CHROME_BIN` environment variable.
    #[serde(default)]
    pub chrome_bin: Option<String>,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            bundle_dir: default_bundle_dir(),
            bundle_name: default_bundle_name(),
            visible: default_visible(),
            pick_timeout_ms: default_pick_timeout_ms(),
            chrome_bin: None,
        }
    }
}

fn default_bundle_dir() -> PathBuf {
    PathBuf::from("./pkg")
}

fn default_bundle_name() -> String {
    "classpick_web".to_string()
}

fn default_visible() -> bool {
    true
}

fn default_pick_timeout_ms() -> u64 {
    300_000
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookmarkletConfig {
    /// Where the bundle is published, e.g. `https://cdn.example.com/classpick/`.
    #[serde(default)]
    pub base_url: Option<String>,
}
