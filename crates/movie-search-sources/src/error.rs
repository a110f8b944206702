use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{provider} returned HTTP {status}: {body}")]
    Status {
        provider: String,
        status: u16,
        body: String,
    },

    #[error("Failed to decode {provider} response: {source}")]
    Decode {
        provider: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Missing API key for {0}")]
    MissingCredentials(String),

    #[error("{provider} did not answer within {seconds}s")]
    Timeout { provider: String, seconds: u64 },
}

impl SourceError {
    pub fn decode(provider: &str, source: serde_json::Error) -> Self {
        Self::Decode {
            provider: provider.to_string(),
            source,
        }
    }
}
