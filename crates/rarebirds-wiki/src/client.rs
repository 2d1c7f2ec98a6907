//! Best-effort thumbnail lookup against the Wikipedia action API.

use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::WikiError;
use crate::name::clean_name;
use crate::types::PageImagesResponse;

const DEFAULT_BASE_URL: &str = "https://en.wikipedia.org/w/api.php";
const THUMBNAIL_WIDTH_PX: u32 = 400;
const DISAMBIGUATION_SUFFIX: &str = " (bird)";

/// Client for Wikipedia page-image queries.
///
/// Stateless and uncached: every [`WikiClient::lookup_image`] call hits the
/// network.
pub struct WikiClient {
    client: Client,
    base_url: Url,
}

impl WikiClient {
    /// Creates a client pointed at English Wikipedia.
    ///
    /// # Errors
    ///
    /// Returns [`WikiError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, WikiError> {
        Self::with_base_url(timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom API endpoint (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`WikiError::Http`] if the `reqwest::Client` cannot be built, or
    /// [`WikiError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, WikiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(user_agent)
            .build()?;
        let base_url = Url::parse(base_url).map_err(|e| WikiError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self { client, base_url })
    }

    /// Finds a thumbnail URL for a bird's common name.
    ///
    /// Tries the cleaned name first, then `"<cleaned> (bird)"` to get past
    /// non-avian articles with the same title. Any failure counts as "no image"
    /// for that attempt and is only logged.
    pub async fn lookup_image(&self, common_name: &str) -> Option<String> {
        let cleaned = clean_name(common_name);
        if cleaned.is_empty() {
            tracing::debug!(common_name, "name empty after cleaning; skipping lookup");
            return None;
        }

        let fallback = format!("{cleaned}{DISAMBIGUATION_SUFFIX}");
        for title in [cleaned.as_str(), fallback.as_str()] {
            match self.fetch_thumbnail(title).await {
                Ok(Some(url)) => {
                    tracing::debug!(title, url = %url, "thumbnail found");
                    return Some(url);
                }
                Ok(None) => {
                    tracing::debug!(title, "no thumbnail for title");
                }
                Err(e) => {
                    tracing::debug!(title, error = %e, "image lookup failed");
                }
            }
        }

        None
    }

    /// Queries one title and returns its thumbnail source, if the page has one.
    ///
    /// # Errors
    ///
    /// Returns [`WikiError::Http`] on network failure, timeout, or non-2xx
    /// status, and [`WikiError::Deserialize`] on a malformed body.
    pub async fn fetch_thumbnail(&self, title: &str) -> Result<Option<String>, WikiError> {
        let url = self.build_url(title);
        let response = self.client.get(url).send().await?.error_for_status()?;
        let body = response.text().await?;
        let parsed: PageImagesResponse =
            serde_json::from_str(&body).map_err(|e| WikiError::Deserialize {
                context: format!("pageimages(title={title})"),
                source: e,
            })?;
        Ok(parsed.thumbnail_source().map(str::to_string))
    }

    fn build_url(&self, title: &str) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("action", "query")
            .append_pair("titles", title)
            .append_pair("prop", "pageimages")
            .append_pair("format", "json")
            .append_pair("pithumbsize", &THUMBNAIL_WIDTH_PX.to_string())
            .append_pair("redirects", "1");
        url
    }
}
