use crate::context;
use crate::output::Output;
use color_eyre::Result;
use indicatif::{ProgressBar, ProgressStyle};
use movie_search_core::{messages, SearchOutcome};
use serde_json::json;
use std::io::IsTerminal;
use std::time::Duration;

pub async fn run_search(query: &str, requester_id: i64, output: &Output) -> Result<()> {
    tracing::debug!("Search command started for requester {}", requester_id);

    if query.trim().is_empty() {
        output.warn(messages::EMPTY_QUERY_MESSAGE);
        return Ok(());
    }

    let service = context::build_service()?;

    let spinner = search_spinner(query, output);
    let outcome = service.search(requester_id, query).await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    if !output.is_human() {
        output.json(&json!({
            "type": "search",
            "query": query,
            "requester": requester_id,
            "result": serde_json::to_value(&outcome)?,
        }));
        return Ok(());
    }

    match outcome {
        SearchOutcome::NoResult => output.info(messages::NO_RESULT_MESSAGE),
        SearchOutcome::Found { banner, recorded, .. } => {
            output.banner(&banner);
            if !recorded {
                output.warn(messages::NOT_RECORDED_MESSAGE);
            }
        }
    }

    Ok(())
}

/// Spinner on stderr while the catalogs are queried, only for interactive human output
fn search_spinner(query: &str, output: &Output) -> Option<ProgressBar> {
    if !output.is_human() || output.is_quiet() || !std::io::stderr().is_terminal() {
        return None;
    }

    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        spinner.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ "));
    }
    spinner.set_message(format!("Searching for '{}'...", query.trim()));
    spinner.enable_steady_tick(Duration::from_millis(80));
    Some(spinner)
}
