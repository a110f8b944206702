use crate::error::SourceError;
use crate::http::create_http_client;
use crate::serpapi::api;
use crate::traits::LinkSource;
use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

#[derive(Clone)]
pub struct SerpApiClient {
    client: Arc<Client>,
    api_key: String,
    base_url: String,
}

impl SerpApiClient {
    pub fn new(api_key: String, timeout: Duration) -> Self {
        Self {
            client: Arc::new(create_http_client(timeout)),
            api_key,
            base_url: api::DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }
}

#[async_trait]
impl LinkSource for SerpApiClient {
    fn source_name(&self) -> &str {
        "serpapi"
    }

    async fn top_link(&self, query: &str, site: Option<&str>) -> Result<Option<String>, SourceError> {
        let q = api::site_query(query, site);
        if q.is_empty() {
            return Ok(None);
        }

        let link = api::search_top_link(&self.client, &self.base_url, &self.api_key, &q).await?;
        debug!("SerpApi: '{}' -> {:?}", q, link);
        Ok(link)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_top_link_with_site_restriction() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search.json"))
            .and(query_param("q", "site:rezka.ag Начало"))
            .and(query_param("api_key", "serp-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "search_metadata": {"status": "Success"},
                "organic_results": [
                    {"position": 1, "link": "https://rezka.ag/films/inception.html"},
                    {"position": 2, "link": "https://rezka.ag/other.html"}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = SerpApiClient::new("serp-key".to_string(), Duration::from_secs(2)).with_base_url(server.uri());
        let link = client.top_link("Начало", Some("rezka.ag")).await.unwrap();
        assert_eq!(link.as_deref(), Some("https://rezka.ag/films/inception.html"));
    }

    #[tokio::test]
    async fn test_no_organic_results_is_none() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "search_information": {"organic_results_state": "Fully empty"}
            })))
            .mount(&server)
            .await;

        let client = SerpApiClient::new("serp-key".to_string(), Duration::from_secs(2)).with_base_url(server.uri());
        assert!(client.top_link("zzzz", Some("kinogo.biz")).await.unwrap().is_none());
    }
}
