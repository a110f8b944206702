use crate::error::SourceError;
use crate::http::create_http_client;
use crate::kinopoisk::api;
use crate::traits::MovieProvider;
use async_trait::async_trait;
use movie_search_models::MovieRecord;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

#[derive(Clone)]
pub struct KinopoiskClient {
    client: Arc<Client>,
    api_key: String,
    base_url: String,
}

impl KinopoiskClient {
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
impl MovieProvider for KinopoiskClient {
    fn provider_name(&self) -> &str {
        "kinopoisk"
    }

    async fn search_movie(&self, query: &str) -> Result<Option<MovieRecord>, SourceError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(None);
        }

        let Some(film_id) = api::search_top_film_id(&self.client, &self.base_url, &self.api_key, query).await? else {
            debug!("Kinopoisk: no films found for '{}'", query);
            return Ok(None);
        };

        let film = api::get_film(&self.client, &self.base_url, &self.api_key, film_id).await?;
        let movie = film.into_movie_record();
        debug!(
            "Kinopoisk: '{}' resolved to {:?} (kp={}, imdb={:?})",
            query, movie.title, film_id, movie.id_imdb
        );
        Ok(Some(movie))
    }
}
