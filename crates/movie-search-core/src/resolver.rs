use crate::enrich::LinkEnricher;
use crate::merge::merge_ranked;
use futures::future::join_all;
use movie_search_models::MovieRecord;
use movie_search_sources::{MovieProvider, SourceError};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Fans a query out to every catalog, reconciles the answers and adds watch links
///
/// Built once at startup and shared read-only between requests. Dropping a
/// `resolve` future abandons its in-flight lookups.
pub struct ResolutionCoordinator {
    providers: Vec<Arc<dyn MovieProvider>>,
    enricher: Option<LinkEnricher>,
    sites: Vec<String>,
    request_timeout: Duration,
}

impl ResolutionCoordinator {
    /// `providers` must be in priority order, highest first
    pub fn new(providers: Vec<Arc<dyn MovieProvider>>, sites: Vec<String>, request_timeout: Duration) -> Self {
        Self {
            providers,
            enricher: None,
            sites,
            request_timeout,
        }
    }

    pub fn with_enricher(mut self, enricher: LinkEnricher) -> Self {
        self.enricher = Some(enricher);
        self
    }

    pub fn provider_names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.provider_name()).collect()
    }

    pub fn sites(&self) -> &[String] {
        &self.sites
    }

    /// Resolve a free-text query into one movie, or None when nothing was found
    pub async fn resolve(&self, query: &str) -> Option<MovieRecord> {
        if query.trim().is_empty() {
            debug!("Blank query, skipping provider lookups");
            return None;
        }

        let answers = join_all(self.providers.iter().map(|provider| self.ask(provider.as_ref(), query))).await;
        let mut movie = merge_ranked(answers)?;

        match &self.enricher {
            Some(enricher) => enricher.enrich_movie(&mut movie, &self.sites).await,
            None => movie.links_to_watch = vec![None; self.sites.len()],
        }

        info!("Resolved '{}' to '{}'", query.trim(), movie.display_title());
        Some(movie)
    }

    /// One provider lookup with its failures degraded to "no answer"
    async fn ask(&self, provider: &dyn MovieProvider, query: &str) -> Option<MovieRecord> {
        let name = provider.provider_name();
        let result = match tokio::time::timeout(self.request_timeout, provider.search_movie(query)).await {
            Ok(result) => result,
            Err(_) => Err(SourceError::Timeout {
                provider: name.to_string(),
                seconds: self.request_timeout.as_secs(),
            }),
        };

        match result {
            Ok(Some(movie)) => {
                debug!("{} answered '{}' with '{}'", name, query, movie.display_title());
                Some(movie)
            }
            Ok(None) => {
                debug!("{} has no match for '{}'", name, query);
                None
            }
            Err(e) => {
                warn!("{} lookup for '{}' failed: {}", name, query, e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use movie_search_sources::LinkSource;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Instant;

    enum Answer {
        Movie(MovieRecord),
        Nothing,
        Fail,
    }

    struct FakeProvider {
        name: &'static str,
        answer: Answer,
        delay: Duration,
        calls: AtomicUsize,
    }

    impl FakeProvider {
        fn new(name: &'static str, answer: Answer) -> Self {
            Self {
                name,
                answer,
                delay: Duration::ZERO,
                calls: AtomicUsize::new(0),
            }
        }

        fn delayed(mut self, delay: Duration) -> Self {
            self.delay = delay;
            self
        }
    }

    #[async_trait]
    impl MovieProvider for FakeProvider {
        fn provider_name(&self) -> &str {
            self.name
        }

        async fn search_movie(&self, _query: &str) -> Result<Option<MovieRecord>, SourceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            match &self.answer {
                Answer::Movie(movie) => Ok(Some(movie.clone())),
                Answer::Nothing => Ok(None),
                Answer::Fail => Err(SourceError::Status {
                    provider: self.name.to_string(),
                    status: 503,
                    body: "unavailable".to_string(),
                }),
            }
        }
    }

    struct EchoLinks;

    #[async_trait]
    impl LinkSource for EchoLinks {
        fn source_name(&self) -> &str {
            "echo"
        }

        async fn top_link(&self, query: &str, site: Option<&str>) -> Result<Option<String>, SourceError> {
            match site {
                Some("broken.example") => Err(SourceError::MissingCredentials("echo".to_string())),
                Some(site) => Ok(Some(format!("https://{}/{}", site, query))),
                None => Ok(None),
            }
        }
    }

    fn sites() -> Vec<String> {
        vec!["kinogo.biz".to_string(), "rezka.ag".to_string()]
    }

    fn coordinator(a: Answer, b: Answer) -> ResolutionCoordinator {
        ResolutionCoordinator::new(
            vec![Arc::new(FakeProvider::new("kinopoisk", a)), Arc::new(FakeProvider::new("tmdb", b))],
            sites(),
            Duration::from_secs(5),
        )
    }

    fn movie(title: &str, imdb: &str) -> MovieRecord {
        MovieRecord::new().with_title(title).with_imdb_id(imdb)
    }

    #[tokio::test]
    async fn test_both_absent_is_no_result() {
        assert!(coordinator(Answer::Nothing, Answer::Nothing).resolve("x").await.is_none());
        assert!(coordinator(Answer::Fail, Answer::Fail).resolve("x").await.is_none());
        assert!(coordinator(Answer::Fail, Answer::Nothing).resolve("x").await.is_none());
    }

    #[tokio::test]
    async fn test_single_answer_wins_unmodified() {
        let only_first = coordinator(Answer::Movie(movie("Начало", "tt1")), Answer::Nothing)
            .resolve("начало")
            .await
            .unwrap();
        assert_eq!(only_first.title.as_deref(), Some("Начало"));

        let only_second = coordinator(Answer::Fail, Answer::Movie(movie("Inception", "tt1")))
            .resolve("inception")
            .await
            .unwrap();
        assert_eq!(only_second.title.as_deref(), Some("Inception"));
        assert_eq!(only_second.id_imdb.as_deref(), Some("tt1"));
    }

    #[tokio::test]
    async fn test_shared_imdb_id_merges() {
        let b = MovieRecord {
            rating_imdb: Some(8.8),
            ..movie("Inception", "tt100")
        };
        let resolved = coordinator(Answer::Movie(movie("Начало", "tt100")), Answer::Movie(b))
            .resolve("inception")
            .await
            .unwrap();

        assert_eq!(resolved.title.as_deref(), Some("Начало"));
        assert_eq!(resolved.rating_imdb, Some(8.8));
    }

    #[tokio::test]
    async fn test_different_imdb_ids_keep_priority_answer() {
        let resolved = coordinator(Answer::Movie(movie("A", "tt1")), Answer::Movie(movie("B", "tt2")))
            .resolve("q")
            .await
            .unwrap();

        assert_eq!(resolved.title.as_deref(), Some("A"));
        assert_eq!(resolved.id_imdb.as_deref(), Some("tt1"));
    }

    #[tokio::test]
    async fn test_blank_query_skips_providers() {
        let provider = Arc::new(FakeProvider::new("kinopoisk", Answer::Movie(movie("A", "tt1"))));
        let shared: Arc<dyn MovieProvider> = provider.clone();
        let coordinator = ResolutionCoordinator::new(vec![shared], sites(), Duration::from_secs(5));

        assert!(coordinator.resolve("   ").await.is_none());
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_providers_are_queried_concurrently() {
        let delay = Duration::from_millis(200);
        let coordinator = ResolutionCoordinator::new(
            vec![
                Arc::new(FakeProvider::new("kinopoisk", Answer::Movie(movie("A", "tt1"))).delayed(delay)),
                Arc::new(FakeProvider::new("tmdb", Answer::Movie(movie("B", "tt1"))).delayed(delay)),
            ],
            sites(),
            Duration::from_secs(5),
        );

        let started = Instant::now();
        assert!(coordinator.resolve("q").await.is_some());
        assert!(started.elapsed() < delay * 2, "took {:?}", started.elapsed());
    }

    #[tokio::test]
    async fn test_slow_provider_times_out_to_absent() {
        let coordinator = ResolutionCoordinator::new(
            vec![
                Arc::new(FakeProvider::new("kinopoisk", Answer::Movie(movie("Slow", "tt1"))).delayed(Duration::from_secs(5))),
                Arc::new(FakeProvider::new("tmdb", Answer::Movie(movie("Fast", "tt2")))),
            ],
            sites(),
            Duration::from_millis(50),
        );

        let resolved = coordinator.resolve("q").await.unwrap();
        assert_eq!(resolved.title.as_deref(), Some("Fast"));
    }

    #[tokio::test]
    async fn test_without_enricher_links_are_empty_slots() {
        let resolved = coordinator(Answer::Movie(movie("A", "tt1")), Answer::Nothing)
            .resolve("q")
            .await
            .unwrap();
        assert_eq!(resolved.links_to_watch, vec![None, None]);
    }

    #[tokio::test]
    async fn test_enricher_fills_links_in_site_order() {
        let coordinator = ResolutionCoordinator::new(
            vec![Arc::new(FakeProvider::new("tmdb", Answer::Movie(movie("Heat", "tt0113277"))))],
            vec!["broken.example".to_string(), "rezka.ag".to_string()],
            Duration::from_secs(5),
        )
        .with_enricher(LinkEnricher::new(Arc::new(EchoLinks)));

        let resolved = coordinator.resolve("heat").await.unwrap();
        assert_eq!(resolved.links_to_watch, vec![None, Some("https://rezka.ag/Heat".to_string())]);
        assert_eq!(coordinator.provider_names(), vec!["tmdb"]);
    }
}
