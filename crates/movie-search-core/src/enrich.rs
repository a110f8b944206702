use futures::future::join_all;
use movie_search_models::MovieRecord;
use movie_search_sources::LinkSource;
use std::sync::Arc;
use tracing::{debug, warn};

/// Looks up one watch-online link per site for a resolved movie
#[derive(Clone)]
pub struct LinkEnricher {
    source: Arc<dyn LinkSource>,
}

impl LinkEnricher {
    pub fn new(source: Arc<dyn LinkSource>) -> Self {
        Self { source }
    }

    /// One slot per site, in site order
    ///
    /// Lookups run concurrently. A failed lookup only empties its own slot.
    pub async fn enrich(&self, title: &str, sites: &[String]) -> Vec<Option<String>> {
        let lookups = sites.iter().map(|site| async move {
            match self.source.top_link(title, Some(site.as_str())).await {
                Ok(link) => {
                    debug!("{} link for '{}' on {}: {:?}", self.source.source_name(), title, site, link);
                    link
                }
                Err(e) => {
                    warn!("Link lookup for '{}' on {} failed: {}", title, site, e);
                    None
                }
            }
        });

        join_all(lookups).await
    }

    /// Fill `links_to_watch` of `movie`, leaving every other field untouched
    ///
    /// A movie without any title gets empty slots and no lookups.
    pub async fn enrich_movie(&self, movie: &mut MovieRecord, sites: &[String]) {
        let title = movie.display_title().trim().to_string();
        if title.is_empty() {
            debug!("Movie has no title, skipping link lookups");
            movie.links_to_watch = vec![None; sites.len()];
            return;
        }
        movie.links_to_watch = self.enrich(&title, sites).await;
    }
}
