use std::env;

use serde::{Deserialize, Serialize};

use self::extractor::ExtractorConfig;
use self::ocr::OcrConfig;
use self::ui::UiConfig;

pub mod extractor;
pub mod ocr;
pub mod ui;

#[derive(Serialize, Deserialize)]
pub struct Config {
    pub extractor: ExtractorConfig,
    pub ocr: OcrConfig,
    pub ui: UiConfig,

    /// Hotkey poll interval for the watcher loop
    pub poll_interval_ms: u64,
}

impl Config {
    pub fn new() -> Self {
        let poll_interval_ms = env::var("POLL_INTERVAL_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(50); // 50ms default

        Config {
            extractor: ExtractorConfig::new(),
            ocr: OcrConfig::new(),
            ui: UiConfig::new(),

            poll_interval_ms,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
