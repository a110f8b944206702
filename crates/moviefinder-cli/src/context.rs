use color_eyre::Result;
use movie_search_config::{Config, CredentialStore, PathManager};
use movie_search_core::{JsonlHistoryStore, MovieSearchService};
use std::sync::Arc;

/// Environment variable holding the default requester id
pub const REQUESTER_ENV: &str = "MOVIEFINDER_REQUESTER";

/// Requester id from the command line, else `MOVIEFINDER_REQUESTER`, else 0
pub fn resolve_requester(arg: Option<i64>) -> i64 {
    arg.or_else(|| {
        std::env::var(REQUESTER_ENV)
            .ok()
            .and_then(|v| v.trim().parse().ok())
    })
    .unwrap_or(0)
}

pub fn load_config(path_manager: &PathManager) -> Result<Config> {
    let config_file = path_manager.config_file();
    Config::load_or_default(&config_file)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load config from {}: {}", config_file.display(), e))
}

/// Credentials file with environment overrides applied
pub fn load_credentials(path_manager: &PathManager) -> Result<CredentialStore> {
    let credentials_file = path_manager.credentials_file();
    let mut cred_store = CredentialStore::new(credentials_file.clone());
    cred_store
        .load()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load credentials from {}: {}", credentials_file.display(), e))?;
    cred_store.apply_env_overrides();
    Ok(cred_store)
}

/// Assemble the search service for one process run
pub fn build_service() -> Result<MovieSearchService> {
    let path_manager = PathManager::default();
    let config = load_config(&path_manager)?;
    let cred_store = load_credentials(&path_manager)?;

    let history_path = config.history_path(path_manager.history_file());
    tracing::debug!("Using history file {}", history_path.display());
    let history = Arc::new(JsonlHistoryStore::new(history_path));

    MovieSearchService::from_config(&config, &cred_store, history)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to set up movie search: {}", e))
}
