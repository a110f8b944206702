use crate::context;
use crate::output::Output;
use color_eyre::Result;
use comfy_table::{Cell, CellAlignment, Table};
use movie_search_core::messages;
use movie_search_models::StatsRecord;
use serde_json::json;

pub async fn run_stats(requester_id: i64, output: &Output) -> Result<()> {
    let service = context::build_service()?;
    let stats = service.stats(requester_id).await?;

    if !output.is_human() {
        output.json(&json!({
            "type": "stats",
            "requester": requester_id,
            "stats": serde_json::to_value(&stats)?,
        }));
        return Ok(());
    }

    if stats.is_empty() {
        output.info(messages::EMPTY_STATS_MESSAGE);
    } else {
        output.info(stats_table(&stats).to_string());
    }
    Ok(())
}

fn stats_table(stats: &[StatsRecord]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        Cell::new("Title").add_attribute(comfy_table::Attribute::Bold),
        Cell::new("Searches").add_attribute(comfy_table::Attribute::Bold),
    ]);
    for entry in stats {
        table.add_row(vec![
            Cell::new(&entry.title),
            Cell::new(entry.count).set_alignment(CellAlignment::Right),
        ]);
    }
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    table
}
