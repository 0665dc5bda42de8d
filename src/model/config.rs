use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Configuration from chanview.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub nav: NavConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub site: SiteConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavConfig {
    /// Links whose tops differ by at most this much share a row
    #[serde(default = "default_row_tolerance")]
    pub row_tolerance: f32,
    /// Quick-jump result cap
    #[serde(default = "default_max_results")]
    pub max_results: usize,
    /// Enable the quick-jump overlay on the home screen
    #[serde(default = "default_true")]
    pub quick_jump: bool,
}

impl Default for NavConfig {
    fn default() -> Self {
        NavConfig {
            row_tolerance: default_row_tolerance(),
            max_results: default_max_results(),
            quick_jump: true,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_row_tolerance() -> f32 {
    6.0
}

fn default_max_results() -> usize {
    5
}

/// Live API settings, used with `--remote`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Cached API responses kept in memory
    #[serde(default = "default_cache_size")]
    pub cache_size: usize,
    /// Minimum gap between requests
    #[serde(default = "default_min_interval_ms")]
    pub min_interval_ms: u64,
}

impl Default for SiteConfig {
    fn default() -> Self {
        SiteConfig {
            api_url: default_api_url(),
            timeout_secs: default_timeout_secs(),
            cache_size: default_cache_size(),
            min_interval_ms: default_min_interval_ms(),
        }
    }
}

fn default_api_url() -> String {
    "https://a.4cdn.org".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_cache_size() -> usize {
    100
}

fn default_min_interval_ms() -> u64 {
    1000
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UiConfig {
    #[serde(default)]
    pub show_key_hints: bool,
    /// Hex color overrides keyed by theme slot (e.g. `highlight = "#FB4196"`)
    #[serde(default)]
    pub colors: HashMap<String, String>,
}
