use crate::error::SourceError;
use crate::http::{fetch_json, non_empty};
use movie_search_models::MovieRecord;
use reqwest::Client;
use serde::Deserialize;

// Kinopoisk unofficial API base URL
pub const DEFAULT_BASE_URL: &str = "https://kinopoiskapiunofficial.tech";

const PROVIDER: &str = "kinopoisk";

#[derive(Debug, Deserialize)]
struct KpSearchResponse {
    films: Option<Vec<KpSearchFilm>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct KpSearchFilm {
    film_id: Option<u64>,
}

/// Film details from `/api/v2.2/films/{id}`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KpFilm {
    pub kinopoisk_id: Option<u64>,
    pub imdb_id: Option<String>,
    pub name_ru: Option<String>,
    pub name_en: Option<String>,
    pub name_original: Option<String>,
    pub poster_url: Option<String>,
    pub rating_kinopoisk: Option<f64>,
    pub rating_imdb: Option<f64>,
    pub web_url: Option<String>,
    pub description: Option<String>,
}

impl KpFilm {
    pub fn into_movie_record(self) -> MovieRecord {
        MovieRecord {
            // Russian title first, English as a fallback
            title: non_empty(self.name_ru).or_else(|| non_empty(self.name_en)),
            original_title: non_empty(self.name_original),
            description: non_empty(self.description),
            poster: non_empty(self.poster_url),
            id_kp: self.kinopoisk_id,
            id_tmdb: None,
            id_imdb: non_empty(self.imdb_id),
            rating_kp: self.rating_kinopoisk,
            rating_imdb: self.rating_imdb,
            link_kp: non_empty(self.web_url),
            links_to_watch: Vec::new(),
        }
    }
}

/// Search films by keyword and return the id of the top hit
pub async fn search_top_film_id(
    client: &Client,
    base_url: &str,
    api_key: &str,
    keyword: &str,
) -> Result<Option<u64>, SourceError> {
    let url = format!("{}/api/v2.1/films/search-by-keyword", base_url);
    let request = client
        .get(&url)
        .header("X-API-KEY", api_key)
        .query(&[("keyword", keyword), ("page", "1")]);

    let response: KpSearchResponse = fetch_json(PROVIDER, request).await?;

    Ok(response
        .films
        .unwrap_or_default()
        .into_iter()
        .next()
        .and_then(|film| film.film_id))
}

/// Fetch full film details by Kinopoisk id
pub async fn get_film(
    client: &Client,
    base_url: &str,
    api_key: &str,
    film_id: u64,
) -> Result<KpFilm, SourceError> {
    let url = format!("{}/api/v2.2/films/{}", base_url, film_id);
    let request = client.get(&url).header("X-API-KEY", api_key);
    fetch_json(PROVIDER, request).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_film_mapping_prefers_russian_title() {
        let film: KpFilm = serde_json::from_value(serde_json::json!({
            "kinopoiskId": 447301,
            "imdbId": "tt1375666",
            "nameRu": "Начало",
            "nameEn": null,
            "nameOriginal": "Inception",
            "posterUrl": "https://kinopoiskapiunofficial.tech/images/posters/kp/447301.jpg",
            "ratingKinopoisk": 8.7,
            "ratingImdb": 8.8,
            "webUrl": "https://www.kinopoisk.ru/film/447301/",
            "description": "Кобб – талантливый вор"
        }))
        .unwrap();

        let movie = film.into_movie_record();
        assert_eq!(movie.title.as_deref(), Some("Начало"));
        assert_eq!(movie.original_title.as_deref(), Some("Inception"));
        assert_eq!(movie.id_kp, Some(447301));
        assert_eq!(movie.id_imdb.as_deref(), Some("tt1375666"));
        assert_eq!(movie.rating_kp, Some(8.7));
        assert_eq!(movie.link_kp.as_deref(), Some("https://www.kinopoisk.ru/film/447301/"));
        assert!(movie.id_tmdb.is_none());
    }

    #[test]
    fn test_film_mapping_falls_back_to_english_title() {
        let film: KpFilm = serde_json::from_value(serde_json::json!({
            "kinopoiskId": 1,
            "nameRu": "",
            "nameEn": "Heat",
            "imdbId": null
        }))
        .unwrap();

        let movie = film.into_movie_record();
        assert_eq!(movie.title.as_deref(), Some("Heat"));
        assert!(movie.id_imdb.is_none());
    }
}
