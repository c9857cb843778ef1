use dopc_core::VenueSourceError;
use thiserror::Error;

/// Errors returned by the venue data client.
#[derive(Debug, Error)]
pub enum VenueError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Upstream answered with a non-2xx status.
    #[error("unexpected HTTP status {status} from {url}: {body}")]
    UnexpectedStatus {
        status: u16,
        url: String,
        body: String,
    },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The body parsed but holds values no venue can have.
    #[error("invalid {context}: {reason}")]
    InvalidPayload { context: String, reason: String },

    #[error("invalid base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}

impl From<VenueError> for VenueSourceError {
    fn from(err: VenueError) -> Self {
        match err {
            VenueError::Http(e) => VenueSourceError::Gateway {
                status: e.status().map(|s| s.as_u16()),
                message: e.to_string(),
            },
            VenueError::UnexpectedStatus { status, url, body } => {
                VenueSourceError::Gateway {
                    status: Some(status),
                    message: format!("{url} returned {status}: {body}"),
                }
            }
            VenueError::Deserialize { context, source } => VenueSourceError::InvalidPayload {
                context,
                reason: source.to_string(),
            },
            VenueError::InvalidPayload { context, reason } => {
                VenueSourceError::InvalidPayload { context, reason }
            }
            invalid @ VenueError::InvalidBaseUrl { .. } => VenueSourceError::Gateway {
                status: None,
                message: invalid.to_string(),
            },
        }
    }
}
