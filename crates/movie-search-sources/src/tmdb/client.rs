use crate::error::SourceError;
use crate::http::create_http_client;
use crate::tmdb::api;
use crate::traits::MovieProvider;
use async_trait::async_trait;
use movie_search_models::MovieRecord;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

#[derive(Clone)]
pub struct TmdbClient {
    client: Arc<Client>,
    api_key: String,
    base_url: String,
    image_base_url: String,
    language: Option<String>,
}

impl TmdbClient {
    pub fn new(api_key: String, timeout: Duration) -> Self {
        Self {
            client: Arc::new(create_http_client(timeout)),
            api_key,
            base_url: api::DEFAULT_BASE_URL.to_string(),
            image_base_url: api::DEFAULT_IMAGE_BASE_URL.to_string(),
            language: None,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_image_base_url(mut self, image_base_url: impl Into<String>) -> Self {
        self.image_base_url = image_base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_language(mut self, language: Option<String>) -> Self {
        self.language = language.filter(|l| !l.trim().is_empty());
        self
    }
}

#[async_trait]
impl MovieProvider for TmdbClient {
    fn provider_name(&self) -> &str {
        "tmdb"
    }

    async fn search_movie(&self, query: &str) -> Result<Option<MovieRecord>, SourceError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(None);
        }

        let language = self.language.as_deref();
        let Some(movie_id) =
            api::search_top_movie_id(&self.client, &self.base_url, &self.api_key, language, query).await?
        else {
            debug!("TMDB: no results for '{}'", query);
            return Ok(None);
        };

        let movie = api::get_movie(&self.client, &self.base_url, &self.api_key, language, movie_id).await?;
        let record = movie.into_movie_record(&self.image_base_url);
        debug!(
            "TMDB: '{}' resolved to {:?} (tmdb={}, imdb={:?})",
            query, record.title, movie_id, record.id_imdb
        );
        Ok(Some(record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_search_then_fetch_details_with_language() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search/movie"))
            .and(query_param("query", "inception"))
            .and(query_param("api_key", "tmdb-key"))
            .and(query_param("language", "ru-RU"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "page": 1,
                "results": [{"id": 27205, "title": "Начало"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/movie/27205"))
            .and(query_param("api_key", "tmdb-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 27205,
                "imdb_id": "tt1375666",
                "title": "Начало",
                "original_title": "Inception",
                "poster_path": "/poster.jpg"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = TmdbClient::new("tmdb-key".to_string(), Duration::from_secs(2))
            .with_base_url(server.uri())
            .with_image_base_url("https://img.example/w500/")
            .with_language(Some("ru-RU".to_string()));

        let movie = client.search_movie("inception").await.unwrap().unwrap();
        assert_eq!(movie.id_tmdb, Some(27205));
        assert_eq!(movie.poster.as_deref(), Some("https://img.example/w500/poster.jpg"));
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search/movie"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let client = TmdbClient::new("k".to_string(), Duration::from_secs(2)).with_base_url(server.uri());
        let err = client.search_movie("heat").await.unwrap_err();
        assert!(matches!(err, SourceError::Decode { .. }), "Expected Decode, got: {err:?}");
    }

    #[tokio::test]
    async fn test_missing_results_is_none() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search/movie"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"page": 1, "total_results": 0})))
            .mount(&server)
            .await;

        let client = TmdbClient::new("k".to_string(), Duration::from_secs(2)).with_base_url(server.uri());
        assert!(client.search_movie("nothing").await.unwrap().is_none());
    }
}
