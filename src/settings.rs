use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Overlay configuration, read-only for the controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlaySettings {
    /// Activate the overlay as soon as the facade is bootstrapped.
    #[serde(default = "default_true")]
    pub auto_initialize: bool,
    /// Verbose logging and the debug panel readouts.
    #[serde(default)]
    pub debug_mode: bool,
    #[serde(default = "default_true")]
    pub always_on_top: bool,
    /// Pixels with alpha below this let clicks through. Range `[0, 1]`.
    #[serde(default = "default_click_through_threshold")]
    pub click_through_threshold: f32,
    #[serde(default = "default_target_fps")]
    pub target_fps: u32,
    /// Preferred monitor; clamped to the connected displays on use.
    #[serde(default)]
    pub target_display: i32,
    /// How long activation waits for a camera before giving up.
    #[serde(default = "default_camera_timeout_secs")]
    pub camera_timeout_secs: f32,
    /// Ask the host to convert UI roots discovered after a scene change.
    #[serde(default)]
    pub auto_convert_ui_roots: bool,
}

fn default_true() -> bool {
    true
}

fn default_click_through_threshold() -> f32 {
    0.1
}

fn default_target_fps() -> u32 {
    60
}

fn default_camera_timeout_secs() -> f32 {
    5.0
}

impl Default for OverlaySettings {
    fn default() -> Self {
        Self {
            auto_initialize: true,
            debug_mode: false,
            always_on_top: true,
            click_through_threshold: default_click_through_threshold(),
            target_fps: default_target_fps(),
            target_display: 0,
            camera_timeout_secs: default_camera_timeout_secs(),
            auto_convert_ui_roots: false,
        }
    }
}

impl OverlaySettings {
    /// Load settings from a JSON file. A missing or empty file yields the
    /// defaults.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path).unwrap_or_default();
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let settings: Self = serde_json::from_str(&content)?;
        Ok(settings.normalized())
    }

    pub fn save(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Clamp values into their valid ranges.
    pub fn normalized(mut self) -> Self {
        self.click_through_threshold = if self.click_through_threshold.is_nan() {
            default_click_through_threshold()
        } else {
            self.click_through_threshold.clamp(0.0, 1.0)
        };
        self.target_fps = self.target_fps.max(1);
        if !self.camera_timeout_secs.is_finite() || self.camera_timeout_secs < 0.0 {
            self.camera_timeout_secs = default_camera_timeout_secs();
        }
        self
    }

    pub fn camera_timeout(&self) -> Duration {
        Duration::from_secs_f32(self.camera_timeout_secs.max(0.0))
    }
}
