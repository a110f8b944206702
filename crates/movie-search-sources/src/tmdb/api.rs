use crate::error::SourceError;
use crate::http::{fetch_json, non_empty};
use movie_search_models::MovieRecord;
use reqwest::Client;
use serde::Deserialize;

// TMDB API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

const PROVIDER: &str = "tmdb";

#[derive(Debug, Deserialize)]
struct TmdbSearchResponse {
    results: Option<Vec<TmdbSearchResult>>,
}

#[derive(Debug, Deserialize)]
struct TmdbSearchResult {
    id: Option<u64>,
}

/// Movie details from `/movie/{id}`
#[derive(Debug, Deserialize)]
pub struct TmdbMovie {
    pub id: Option<u64>,
    pub imdb_id: Option<String>,
    pub title: Option<String>,
    pub original_title: Option<String>,
    pub overview: Option<String>,
    pub poster_path: Option<String>,
}

impl TmdbMovie {
    pub fn into_movie_record(self, image_base_url: &str) -> MovieRecord {
        let poster = non_empty(self.poster_path).map(|path| format!("{}{}", image_base_url, path));

        MovieRecord {
            title: non_empty(self.title),
            original_title: non_empty(self.original_title),
            description: non_empty(self.overview),
            poster,
            id_kp: None,
            id_tmdb: self.id,
            id_imdb: non_empty(self.imdb_id),
            rating_kp: None,
            rating_imdb: None,
            link_kp: None,
            links_to_watch: Vec::new(),
        }
    }
}

fn base_params<'a>(api_key: &'a str, language: Option<&'a str>) -> Vec<(&'static str, &'a str)> {
    let mut params = vec![("api_key", api_key)];
    if let Some(language) = language {
        params.push(("language", language));
    }
    params
}

/// Search movies by text and return the TMDB id of the top result
pub async fn search_top_movie_id(
    client: &Client,
    base_url: &str,
    api_key: &str,
    language: Option<&str>,
    query: &str,
) -> Result<Option<u64>, SourceError> {
    let url = format!("{}/search/movie", base_url);
    let mut params = base_params(api_key, language);
    params.push(("query", query));
    params.push(("page", "1"));

    let response: TmdbSearchResponse = fetch_json(PROVIDER, client.get(&url).query(&params)).await?;

    Ok(response
        .results
        .unwrap_or_default()
        .into_iter()
        .next()
        .and_then(|result| result.id))
}

/// Fetch movie details by TMDB id
pub async fn get_movie(
    client: &Client,
    base_url: &str,
    api_key: &str,
    language: Option<&str>,
    movie_id: u64,
) -> Result<TmdbMovie, SourceError> {
    let url = format!("{}/movie/{}", base_url, movie_id);
    let params = base_params(api_key, language);
    fetch_json(PROVIDER, client.get(&url).query(&params)).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movie_mapping_builds_poster_url() {
        let movie: TmdbMovie = serde_json::from_value(serde_json::json!({
            "id": 27205,
            "imdb_id": "tt1375666",
            "title": "Inception",
            "original_title": "Inception",
            "overview": "Cobb, a skilled thief...",
            "poster_path": "/9gk7adHYeDvHkCSEqAvQNLV5Uge.jpg",
            "vote_average": 8.4
        }))
        .unwrap();

        let record = movie.into_movie_record(DEFAULT_IMAGE_BASE_URL);
        assert_eq!(record.id_tmdb, Some(27205));
        assert_eq!(record.id_imdb.as_deref(), Some("tt1375666"));
        assert_eq!(
            record.poster.as_deref(),
            Some("https://image.tmdb.org/t/p/w500/9gk7adHYeDvHkCSEqAvQNLV5Uge.jpg")
        );
        assert!(record.rating_imdb.is_none());
    }

    #[test]
    fn test_movie_mapping_without_poster() {
        let movie: TmdbMovie = serde_json::from_value(serde_json::json!({
            "id": 1,
            "title": "Obscure",
            "poster_path": null,
            "imdb_id": ""
        }))
        .unwrap();

        let record = movie.into_movie_record(DEFAULT_IMAGE_BASE_URL);
        assert!(record.poster.is_none());
        assert!(record.id_imdb.is_none());
    }
}
