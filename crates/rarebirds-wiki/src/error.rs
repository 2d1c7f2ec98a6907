use thiserror::Error;

/// Failures while querying the Wikipedia page-image API.
///
/// [`crate::WikiClient::lookup_image`] never returns these; they are logged and
/// treated as "no image".
#[derive(Debug, Error)]
pub enum WikiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL \"{url}\": {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}
