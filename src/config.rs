use serde::{Deserialize, Serialize};

// Query generation
pub const EXPECTED_QUERY_COUNT: usize = 5;

// Truncation of context snippets and response previews
pub const SNIPPET_CHARS: usize = 50;
pub const ELLIPSIS: &str = "...";

// Citation pages without a title
pub const NO_TITLE: &str = "No Title";

// Provider defaults
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;

// Environment variables holding the provider credential, in lookup order
pub const API_KEY_ENV_VARS: [&str; 2] = ["GEMINI_API_KEY", "GOOGLE_API_KEY"];

// Dashboard form defaults
pub const DEFAULT_CATEGORY: &str = "CRM Software";
pub const DEFAULT_BRANDS: &str = "Salesforce, HubSpot, Pipedrive";

/// Application settings, extracted from Rocket's figment
/// (`Rocket.toml` merged with `ROCKET_*` environment variables).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    pub gemini_model: String,
    pub gemini_api_base: String,
    pub request_timeout_secs: u64,
    /// Run the visibility and citation passes concurrently.
    pub concurrent_scorers: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            gemini_model: DEFAULT_MODEL.to_string(),
            gemini_api_base: DEFAULT_API_BASE.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            concurrent_scorers: false,
        }
    }
}

/// Read the provider API key from the process environment.
/// Blank values count as absent.
pub fn api_key_from_env() -> Option<String> {
    API_KEY_ENV_VARS
        .iter()
        .filter_map(|name| std::env::var(name).ok())
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
}
