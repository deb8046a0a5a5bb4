use std::env;

use serde::{Deserialize, Serialize};

fn default_marker_size() -> u32 {
    25
}

fn default_display_ms() -> u64 {
    5000
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct UiConfig {
    /// Marker side length in pixels
    #[serde(default = "default_marker_size")]
    pub marker_size: u32,
    /// How long markers stay on screen
    #[serde(default = "default_display_ms")]
    pub display_ms: u64,
}

impl UiConfig {
    pub fn new() -> Self {
        let display_ms = env::var("OVERLAY_DISPLAY_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_display_ms);

        UiConfig {
            display_ms,
            ..Default::default()
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            marker_size: default_marker_size(),
            display_ms: default_display_ms(),
        }
    }
}
