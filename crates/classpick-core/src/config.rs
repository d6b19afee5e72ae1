use serde::{Deserialize, Serialize};

/// Appearance and limits of a picking session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickerConfig {
    /// Number of segments in a class path, target included.
    pub max_depth: usize,
    pub accent_color: String,
    pub highlight_background: String,
    pub overlay_background: String,
    pub overlay_z_index: i32,
    /// Must stay above `overlay_z_index` so the highlighted element shows through.
    pub highlight_z_index: i32,
    pub banner_z_index: i32,
    pub banner_text: String,
    pub text_preview_chars: usize,
    /// Delay before the single retry of an activation that arrived too early.
    pub activation_retry_ms: u64,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            max_depth: crate::selector::DEFAULT_MAX_DEPTH,
            accent_color: "#007bff".to_string(),
            highlight_background: "rgba(0, 123, 255, 0.1)".to_string(),
            overlay_background: "rgba(0, 0, 0, 0.1)".to_string(),
            overlay_z_index: 999_998,
            highlight_z_index: 999_999,
            banner_z_index: 1_000_000,
            banner_text: "Click on an element to select it. Press ESC to cancel.".to_string(),
            text_preview_chars: 100,
            activation_retry_ms: 500,
        }
    }
}

impl PickerConfig {
    /// Inline style for the full-page overlay. It never intercepts the pointer.
    pub fn overlay_style(&self) -> String {
        format!(
            "position: fixed; top: 0; left: 0; width: 100%; height: 100%; \
             background: {}; z-index: {}; pointer-events: none;",
            self.overlay_background, self.overlay_z_index
        )
    }

    pub fn banner_style(&self) -> String {
        format!(
            "position: fixed; top: 10px; left: 50%; transform: translateX(-50%); \
             background: {}; color: white; padding: 10px 20px; border-radius: 5px; \
             z-index: {}; font-family: Arial, sans-serif; font-size: 14px; \
             box-shadow: 0 2px 10px rgba(0, 0, 0, 0.3); pointer-events: none;",
            self.accent_color, self.banner_z_index
        )
    }
}
