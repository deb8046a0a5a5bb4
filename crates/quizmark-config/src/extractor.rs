use std::env;

use serde::{Deserialize, Serialize};

fn default_api_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent"
        .to_string()
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct ExtractorConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(skip_serializing)]
    pub api_key: String,
}

impl ExtractorConfig {
    pub fn new() -> Self {
        let api_key = env::var("GEMINI_API_KEY").unwrap_or_default();
        let api_url = env::var("GEMINI_API_URL").unwrap_or_else(|_| default_api_url());

        ExtractorConfig { api_url, api_key }
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            api_key: String::new(),
        }
    }
}
