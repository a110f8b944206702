pub mod merge;
pub mod enrich;
pub mod resolver;
pub mod banner;
pub mod history;
pub mod messages;
pub mod commands;
pub mod service;

pub use merge::{first_present, merge_movies, merge_ranked};
pub use enrich::LinkEnricher;
pub use resolver::ResolutionCoordinator;
pub use banner::BannerFormatter;
pub use history::{aggregate_stats, HistoryError, HistoryStore, JsonlHistoryStore, MemoryHistoryStore};
pub use commands::BotCommand;
pub use service::{MovieSearchService, Reply, SearchOutcome};
