use async_trait::async_trait;
use movie_search_models::MovieRecord;
use crate::error::SourceError;

/// A movie catalog that can be searched by free text
#[async_trait]
pub trait MovieProvider: Send + Sync {
    /// Config key of the catalog ("kinopoisk", "tmdb")
    fn provider_name(&self) -> &str;

    /// Best guess for `query`: the top search hit with its details fetched.
    /// `Ok(None)` for a blank query or when the catalog has no hits.
    async fn search_movie(&self, query: &str) -> Result<Option<MovieRecord>, SourceError>;
}

/// A generic web search used to find watch-online pages
#[async_trait]
pub trait LinkSource: Send + Sync {
    fn source_name(&self) -> &str;

    /// Link of the top organic result for `query`, restricted to `site` when given
    async fn top_link(&self, query: &str, site: Option<&str>) -> Result<Option<String>, SourceError>;
}
