//! HTTP client for the eBird 2.0 observation API.
//!
//! Only the "recent notable observations" endpoint is used. Authentication is
//! the `X-eBirdApiToken` header; the key never appears in URLs or logs.

use std::time::Duration;

use rarebirds_core::{Observation, MAX_DAYS_BACK};
use reqwest::{Client, Url};

use crate::error::EbirdError;

const DEFAULT_BASE_URL: &str = "https://api.ebird.org/v2";
const API_TOKEN_HEADER: &str = "X-eBirdApiToken";

/// Client for the eBird REST API.
///
/// Use [`EbirdClient::new`] for production or [`EbirdClient::with_base_url`]
/// to point at a mock server in tests.
pub struct EbirdClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl EbirdClient {
    /// Creates a new client pointed at the production eBird API.
    ///
    /// # Errors
    ///
    /// Returns [`EbirdError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, EbirdError> {
        Self::with_base_url(api_key, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`EbirdError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`EbirdError::InvalidArgument`] if
    /// `base_url` is not a valid absolute URL.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, EbirdError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let base_url = Url::parse(base_url).map_err(|e| {
            EbirdError::InvalidArgument(format!("invalid base URL '{base_url}': {e}"))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(EbirdError::InvalidArgument(format!(
                "base URL '{base_url}' cannot carry a path"
            )));
        }

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
        })
    }

    /// Fetches recent notable observations for a region.
    ///
    /// Issues exactly one `GET {base}/data/obs/{region}/recent/notable` with
    /// `back`, `detail=full`, and `hotspot=false`. There is no retry.
    ///
    /// # Errors
    ///
    /// - [`EbirdError::InvalidArgument`] if `region_code` is empty or
    ///   `days_back` is outside `1..=30`.
    /// - [`EbirdError::Http`] on network failure.
    /// - [`EbirdError::UnexpectedStatus`] on a non-2xx response.
    /// - [`EbirdError::Deserialize`] if the body is not an observation list.
    pub async fn recent_notable(
        &self,
        region_code: &str,
        days_back: u32,
    ) -> Result<Vec<Observation>, EbirdError> {
        if region_code.trim().is_empty() {
            return Err(EbirdError::InvalidArgument(
                "region code must not be empty".to_string(),
            ));
        }
        if !(1..=MAX_DAYS_BACK).contains(&days_back) {
            return Err(EbirdError::InvalidArgument(format!(
                "days_back {days_back} is outside 1..={MAX_DAYS_BACK}"
            )));
        }

        let url = self.notable_url(region_code, days_back);
        tracing::debug!(url = %url, "requesting notable observations");

        let response = self
            .client
            .get(url.clone())
            .header(API_TOKEN_HEADER, &self.api_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), url = %url, "eBird request failed");
            return Err(EbirdError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        let observations: Vec<Observation> =
            serde_json::from_str(&body).map_err(|e| EbirdError::Deserialize {
                context: format!("recent notable observations for {region_code}"),
                source: e,
            })?;

        tracing::info!(
            region = region_code,
            days_back,
            count = observations.len(),
            "fetched notable observations"
        );
        Ok(observations)
    }

    /// Builds the notable-observations URL with percent-encoded path and query.
    fn notable_url(&self, region_code: &str, days_back: u32) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["data", "obs", region_code, "recent", "notable"]);
        }
        url.query_pairs_mut()
            .append_pair("back", &days_back.to_string())
            .append_pair("detail", "full")
            .append_pair("hotspot", "false");
        url
    }
}
