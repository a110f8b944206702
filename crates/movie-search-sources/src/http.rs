use crate::error::SourceError;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::trace;

const USER_AGENT: &str = concat!("moviefinder/", env!("CARGO_PKG_VERSION"));

/// Create the reqwest Client shared by every request of one source
pub fn create_http_client(timeout: Duration) -> Client {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// Send `request` and decode a JSON body, mapping failures to `SourceError`
pub async fn fetch_json<T: DeserializeOwned>(provider: &str, request: RequestBuilder) -> Result<T, SourceError> {
    let response = request
        .header("Accept", "application/json")
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let error_text = response.text().await.unwrap_or_default();
        return Err(SourceError::Status {
            provider: provider.to_string(),
            status: status.as_u16(),
            body: error_text,
        });
    }

    let body = response.text().await?;
    trace!("{} response: {} bytes", provider, body.len());
    serde_json::from_str(&body).map_err(|e| SourceError::decode(provider, e))
}

/// Treat empty strings from catalog APIs as missing values
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}
