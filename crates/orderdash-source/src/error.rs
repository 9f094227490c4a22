use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("rate limited by {url} (retry after {retry_after_secs}s)")]
    RateLimited { url: String, retry_after_secs: u64 },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("order source {url} returned an empty document")]
    EmptyDocument { url: String },

    #[error("invalid source URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("invalid request header \"{name}\": {reason}")]
    InvalidHeader { name: String, reason: String },
}
