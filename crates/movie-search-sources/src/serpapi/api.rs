use crate::error::SourceError;
use crate::http::{fetch_json, non_empty};
use reqwest::Client;
use serde::Deserialize;

// SerpApi (Google search results) base URL
pub const DEFAULT_BASE_URL: &str = "https://serpapi.com";

const PROVIDER: &str = "serpapi";

#[derive(Debug, Deserialize)]
struct SerpSearchResponse {
    organic_results: Option<Vec<SerpOrganicResult>>,
}

#[derive(Debug, Deserialize)]
struct SerpOrganicResult {
    link: Option<String>,
}

/// Build the search query, restricted to one site when given
pub fn site_query(query: &str, site: Option<&str>) -> String {
    match site.map(str::trim).filter(|s| !s.is_empty()) {
        Some(site) => format!("site:{} {}", site, query.trim()),
        None => query.trim().to_string(),
    }
}

/// Run a Google search through SerpApi and return the first organic link
pub async fn search_top_link(
    client: &Client,
    base_url: &str,
    api_key: &str,
    q: &str,
) -> Result<Option<String>, SourceError> {
    let url = format!("{}/search.json", base_url);
    let request = client.get(&url).query(&[("q", q), ("api_key", api_key)]);

    let response: SerpSearchResponse = fetch_json(PROVIDER, request).await?;

    Ok(response
        .organic_results
        .unwrap_or_default()
        .into_iter()
        .next()
        .and_then(|result| non_empty(result.link)))
}
