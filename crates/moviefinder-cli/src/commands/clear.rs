use crate::context;
use crate::output::Output;
use color_eyre::Result;
use movie_search_config::PathManager;
use movie_search_core::{HistoryStore, JsonlHistoryStore};
use std::fs;

pub async fn run_clear(all: bool, history: bool, credentials: bool, output: &Output) -> Result<()> {
    let path_manager = PathManager::default();

    if all {
        clear_history(&path_manager, output).await?;
        clear_credentials(&path_manager, output)?;
        output.success("History and credentials cleared");
        return Ok(());
    }

    if history {
        clear_history(&path_manager, output).await?;
    }
    if credentials {
        clear_credentials(&path_manager, output)?;
    }

    if !history && !credentials {
        output.warn("No clear option specified. Use --history, --credentials, or --all");
        output.info("\nExample: moviefinder clear --history");
    }

    Ok(())
}

async fn clear_history(path_manager: &PathManager, output: &Output) -> Result<()> {
    let config = context::load_config(path_manager)?;
    let store = JsonlHistoryStore::new(config.history_path(path_manager.history_file()));

    if !store.path().exists() {
        output.info("No search history found to clear");
        return Ok(());
    }

    store
        .clear()
        .await
        .map_err(|e| color_eyre::eyre::eyre!("Failed to remove history at {}: {}", store.path().display(), e))?;
    output.success(format!("Cleared search history: {}", store.path().display()));
    Ok(())
}

fn clear_credentials(path_manager: &PathManager, output: &Output) -> Result<()> {
    let credentials_file = path_manager.credentials_file();

    if credentials_file.exists() {
        fs::remove_file(&credentials_file).map_err(|e| {
            color_eyre::eyre::eyre!("Failed to remove credentials file at {}: {}", credentials_file.display(), e)
        })?;
        output.success(format!("Cleared credentials: {}", credentials_file.display()));
    } else {
        output.info("No credentials file found to clear");
    }

    Ok(())
}
