//! Handlers for the local operational commands.

use anyhow::Result;
use comfy_table::{presets, Cell, CellAlignment, ContentArrangement, Table};

use crate::domain::ports::{AppRepository, TaskTracker};
use crate::services::SchedulerEngine;

pub async fn handle_reconcile(engine: &SchedulerEngine) -> Result<()> {
    engine.reconcile_and_scale_tasks().await?;
    println!("reconciliation complete");
    Ok(())
}

pub async fn handle_status(
    app_repository: &dyn AppRepository,
    task_tracker: &dyn TaskTracker,
) -> Result<()> {
    let app_ids = app_repository.app_ids().await?;
    let tracked = task_tracker.list().await?;

    let mut table = Table::new();
    table
        .load_preset(presets::NOTHING)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(["APP", "TARGET", "RUNNING"].map(|h| Cell::new(h).set_alignment(CellAlignment::Left)));

    if app_ids.is_empty() {
        println!("No apps registered.");
        return Ok(());
    }

    for id in &app_ids {
        let target = app_repository
            .current_version(id)
            .await?
            .map(|app| app.instances)
            .unwrap_or(0);
        let running = tracked.get(id).map(Vec::len).unwrap_or(0);
        table.add_row([id.clone(), target.to_string(), running.to_string()]);
    }

    println!("{table}");
    Ok(())
}
