//! Service context shared by every request
//!
//! Assembled once at startup from configuration and passed explicitly to the
//! chat and CLI layers. Nothing in it changes after construction except the
//! history store's contents.

use crate::banner::BannerFormatter;
use crate::commands::BotCommand;
use crate::enrich::LinkEnricher;
use crate::history::{HistoryError, HistoryStore};
use crate::messages;
use crate::resolver::ResolutionCoordinator;
use anyhow::Result;
use chrono::Utc;
use movie_search_config::{Config, CredentialStore};
use movie_search_models::{BannerPayload, MovieRecord, SearchRecord, StatsRecord};
use movie_search_sources::SourceFactoryRegistry;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

const HISTORY_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Result of one `/search`
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SearchOutcome {
    NoResult,
    Found {
        movie: MovieRecord,
        banner: BannerPayload,
        /// False when the history write failed; the banner is still valid
        recorded: bool,
    },
}

/// What the chat layer should send back
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Text(String),
    Banner { banner: BannerPayload, recorded: bool },
}

pub struct MovieSearchService {
    coordinator: ResolutionCoordinator,
    formatter: BannerFormatter,
    history: Arc<dyn HistoryStore>,
}

impl MovieSearchService {
    pub fn new(coordinator: ResolutionCoordinator, history: Arc<dyn HistoryStore>) -> Self {
        let formatter = BannerFormatter::new(coordinator.sites().to_vec());
        Self {
            coordinator,
            formatter,
            history,
        }
    }

    /// Build providers and the link source from configuration
    pub fn from_config(config: &Config, credentials: &CredentialStore, history: Arc<dyn HistoryStore>) -> Result<Self> {
        config.validate()?;

        let registry = SourceFactoryRegistry::new();
        let providers = registry.create_providers(config, credentials)?;
        let mut coordinator = ResolutionCoordinator::new(
            providers,
            config.watch_sites(),
            Duration::from_secs(config.resolution.request_timeout_seconds),
        );
        if let Some(source) = registry.create_link_source(config, credentials) {
            coordinator = coordinator.with_enricher(LinkEnricher::new(source));
        }

        info!(
            "Movie search ready with providers {:?} and {} watch site(s)",
            coordinator.provider_names(),
            coordinator.sites().len()
        );
        Ok(Self::new(coordinator, history))
    }

    pub fn coordinator(&self) -> &ResolutionCoordinator {
        &self.coordinator
    }

    /// Resolve `query`, render the banner and record the search
    ///
    /// Nothing is recorded when no movie is found. A failed history write is
    /// logged and reported through `recorded`, it never hides the result.
    pub async fn search(&self, requester_id: i64, query: &str) -> SearchOutcome {
        let Some(movie) = self.coordinator.resolve(query).await else {
            return SearchOutcome::NoResult;
        };

        let banner = self.formatter.render(&movie);
        let record = SearchRecord::new(requester_id, query.trim(), movie.display_title(), Utc::now())
            .with_ids(movie.id_kp, movie.id_tmdb);

        let recorded = match self.history.append(record).await {
            Ok(()) => true,
            Err(e) => {
                error!("Failed to record search '{}' for {}: {}", query.trim(), requester_id, e);
                false
            }
        };

        SearchOutcome::Found {
            movie,
            banner,
            recorded,
        }
    }

    pub async fn history(&self, requester_id: i64) -> Result<Vec<SearchRecord>, HistoryError> {
        self.history.history(requester_id).await
    }

    pub async fn stats(&self, requester_id: i64) -> Result<Vec<StatsRecord>, HistoryError> {
        self.history.stats(requester_id).await
    }

    /// `{time}: {query} -> "{title}"` per search, newest first
    pub async fn history_text(&self, requester_id: i64) -> Result<String, HistoryError> {
        let records = self.history(requester_id).await?;
        if records.is_empty() {
            return Ok(messages::EMPTY_HISTORY_MESSAGE.to_string());
        }

        Ok(records
            .iter()
            .map(|r| format!("{}: {} -> \"{}\"", r.searched_at.format(HISTORY_TIME_FORMAT), r.query, r.title))
            .collect::<Vec<_>>()
            .join("\n"))
    }

    /// `{title}: {count}` per title, most searched first
    pub async fn stats_text(&self, requester_id: i64) -> Result<String, HistoryError> {
        let stats = self.stats(requester_id).await?;
        if stats.is_empty() {
            return Ok(messages::EMPTY_STATS_MESSAGE.to_string());
        }

        Ok(stats
            .iter()
            .map(|s| format!("{}: {}", s.title, s.count))
            .collect::<Vec<_>>()
            .join("\n"))
    }

    /// Answer one chat command
    pub async fn handle_command(&self, requester_id: i64, command: BotCommand) -> Result<Reply, HistoryError> {
        let reply = match command {
            BotCommand::Start => Reply::Text(messages::START_MESSAGE.to_string()),
            BotCommand::Help => Reply::Text(messages::HELP_MESSAGE.to_string()),
            BotCommand::Unknown(_) => Reply::Text(messages::UNKNOWN_COMMAND_MESSAGE.to_string()),
            BotCommand::Search(query) if query.trim().is_empty() => {
                Reply::Text(messages::EMPTY_QUERY_MESSAGE.to_string())
            }
            BotCommand::Search(query) => match self.search(requester_id, &query).await {
                SearchOutcome::NoResult => Reply::Text(messages::NO_RESULT_MESSAGE.to_string()),
                SearchOutcome::Found { banner, recorded, .. } => Reply::Banner { banner, recorded },
            },
            BotCommand::History => Reply::Text(self.history_text(requester_id).await?),
            BotCommand::Stats => Reply::Text(self.stats_text(requester_id).await?),
        };
        Ok(reply)
    }
}
