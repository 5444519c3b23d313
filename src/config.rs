//! Admin Configuration
//!
//! Build-time settings baked in through `option_env!`, provided to the app via context.

use log::LevelFilter;

/// Auto-close delay for success/error status modals
pub const STATUS_DISMISS_MS: u32 = 3000;

/// Debounce window for the quiz-attempt search box
pub const SEARCH_DEBOUNCE_MS: u32 = 400;

const DEFAULT_API_URL: &str = "http://localhost:5000/api";
const DEFAULT_CDN_URL: &str = "https://cdn.zaitoon.app";
const DEFAULT_PAGE_SIZE: u32 = 10;

/// Runtime view of the admin settings
#[derive(Debug, Clone, PartialEq)]
pub struct AdminConfig {
    /// REST API base, without trailing slash
    pub api_base_url: String,
    /// CDN base used when rewriting media URLs
    pub cdn_base_url: String,
    /// Raw storage origin whose URLs get rewritten to the CDN
    pub storage_origin: Option<String>,
    /// Default list page size
    pub page_size: u32,
    pub log_level: LevelFilter,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl AdminConfig {
    /// Settings captured at compile time
    pub fn from_env() -> Self {
        Self::from_lookup(|key| {
            let value = match key {
                "ZAI_TOON_API_URL" => option_env!("ZAI_TOON_API_URL"),
                "ZAI_TOON_CDN_URL" => option_env!("ZAI_TOON_CDN_URL"),
                "ZAI_TOON_STORAGE_ORIGIN" => option_env!("ZAI_TOON_STORAGE_ORIGIN"),
                "ZAI_TOON_PAGE_SIZE" => option_env!("ZAI_TOON_PAGE_SIZE"),
                "ZAI_TOON_LOG_LEVEL" => option_env!("ZAI_TOON_LOG_LEVEL"),
                _ => None,
            };
            value.map(str::to_string)
        })
    }

    /// Build from an arbitrary key lookup; blank values count as unset
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let api_base_url = get("ZAI_TOON_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let cdn_base_url = get("ZAI_TOON_CDN_URL").unwrap_or_else(|| DEFAULT_CDN_URL.to_string());
        let storage_origin = get("ZAI_TOON_STORAGE_ORIGIN").map(|v| v.trim_end_matches('/').to_string());
        let page_size = get("ZAI_TOON_PAGE_SIZE")
            .and_then(|v| v.parse::<u32>().ok())
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_PAGE_SIZE);
        let log_level = get("ZAI_TOON_LOG_LEVEL")
            .and_then(|v| v.parse::<LevelFilter>().ok())
            .unwrap_or(LevelFilter::Info);

        Self {
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            cdn_base_url: cdn_base_url.trim_end_matches('/').to_string(),
            storage_origin,
            page_size,
            log_level,
        }
    }
}
