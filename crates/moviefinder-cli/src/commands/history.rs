use crate::context;
use crate::output::Output;
use color_eyre::Result;
use serde_json::json;

pub async fn run_history(requester_id: i64, output: &Output) -> Result<()> {
    let service = context::build_service()?;

    if output.is_human() {
        output.info(service.history_text(requester_id).await?);
        return Ok(());
    }

    let records = service.history(requester_id).await?;
    output.json(&json!({
        "type": "history",
        "requester": requester_id,
        "records": serde_json::to_value(&records)?,
    }));
    Ok(())
}
