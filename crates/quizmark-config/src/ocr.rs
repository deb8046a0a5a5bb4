use std::env;

use quizmark_types::CaptureRegion;
use serde::{Deserialize, Serialize};

fn default_language() -> String {
    "eng".to_string()
}

fn default_psm() -> i32 {
    3 // full page segmentation
}

fn default_oem() -> i32 {
    3 // LSTM engine
}

fn default_grayscale() -> bool {
    true
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct OcrConfig {
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_psm")]
    pub page_seg_mode: i32,
    #[serde(default = "default_oem")]
    pub engine_mode: i32,
    /// Collapse to a single intensity channel before recognition
    #[serde(default = "default_grayscale")]
    pub grayscale: bool,
    /// Restrict capture to a region instead of the primary screen
    pub capture_region: Option<CaptureRegion>,
}

impl OcrConfig {
    pub fn new() -> Self {
        let language = env::var("OCR_LANGUAGE").unwrap_or_else(|_| default_language());

        let grayscale = env::var("OCR_GRAYSCALE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(true);

        OcrConfig {
            language,
            grayscale,
            ..Default::default()
        }
    }
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
            page_seg_mode: default_psm(),
            engine_mode: default_oem(),
            grayscale: default_grayscale(),
            capture_region: None,
        }
    }
}
