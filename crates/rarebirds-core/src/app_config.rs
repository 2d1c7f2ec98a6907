use std::path::PathBuf;

/// Fallback eBird token used when `EBIRD_API_KEY` is unset.
///
/// Not a working credential. Requests made with it are rejected by eBird, so
/// a run without a configured key fails at the fetch stage.
pub const PLACEHOLDER_EBIRD_API_KEY: &str = "unset-ebird-api-key";

#[derive(Clone)]
pub struct AppConfig {
    pub ebird_api_key: String,
    pub ebird_base_url: String,
    pub wiki_base_url: String,
    pub region_code: String,
    pub region_name: String,
    pub days_back: u32,
    pub output_path: PathBuf,
    pub image_limit: usize,
    pub image_delay_ms: u64,
    pub request_timeout_secs: u64,
    pub image_timeout_secs: u64,
    pub user_agent: String,
    pub log_level: String,
}

impl AppConfig {
    /// True when no real eBird key was configured.
    #[must_use]
    pub fn uses_placeholder_key(&self) -> bool {
        self.ebird_api_key == PLACEHOLDER_EBIRD_API_KEY
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("ebird_api_key", &"[redacted]")
            .field("ebird_base_url", &self.ebird_base_url)
            .field("wiki_base_url", &self.wiki_base_url)
            .field("region_code", &self.region_code)
            .field("region_name", &self.region_name)
            .field("days_back", &self.days_back)
            .field("output_path", &self.output_path)
            .field("image_limit", &self.image_limit)
            .field("image_delay_ms", &self.image_delay_ms)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("image_timeout_secs", &self.image_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("log_level", &self.log_level)
            .finish()
    }
}
