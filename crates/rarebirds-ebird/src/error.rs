use thiserror::Error;

/// Errors returned by the eBird API client.
#[derive(Debug, Error)]
pub enum EbirdError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// eBird answered with a non-2xx status (bad token, unknown region, ...).
    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// The response body was not a JSON array of observations.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// A request parameter was rejected before anything was sent.
    #[error("invalid request: {0}")]
    InvalidArgument(String),
}
