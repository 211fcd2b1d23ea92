use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Result};
use release_calendar::calendar::{DropEvent, ReleaseMove, ReleaseSchedule, ReleaseWriter};
use release_calendar::services::ticket::{SqliteReleaseWriter, TicketService};

use super::AppContext;

const WRITE_TIMEOUT: Duration = Duration::from_secs(10);

pub fn run(ctx: &AppContext, drag_id: &str, from: &str, to: &str) -> Result<()> {
    let db = ctx.open_database()?;
    let items = TicketService::new(db.connection()).scheduled_items()?;
    let writer = Arc::new(SqliteReleaseWriter::new(ctx.database_path_str()?));

    let drop = DropEvent {
        source_cell_id: from.to_string(),
        destination_cell_id: Some(to.to_string()),
        drag_id: drag_id.to_string(),
    };

    let mut schedule = ReleaseSchedule::new(items);
    apply_drop(&mut schedule, &drop, writer, &mut std::io::stdout())
}

/// Run a drop the way the calendar does: apply it, write on a worker, settle.
pub(crate) fn apply_drop<W: Write>(
    schedule: &mut ReleaseSchedule,
    drop: &DropEvent,
    writer: Arc<dyn ReleaseWriter + Send + Sync>,
    out: &mut W,
) -> Result<()> {
    let Some(release) = ReleaseMove::from_drop(drop)? else {
        writeln!(out, "Nothing to move")?;
        return Ok(());
    };

    if schedule.move_item_in_background(release.clone(), writer)?.is_none() {
        writeln!(out, "Nothing to move")?;
        return Ok(());
    }

    let outcomes = schedule.wait_for_pending(WRITE_TIMEOUT);
    let Some(outcome) = outcomes.into_iter().next() else {
        return Err(anyhow!("Timed out waiting for the release date to be saved"));
    };

    if let Err(err) = outcome.result {
        if let Some(notice) = schedule.notices().latest() {
            writeln!(out, "{}", notice)?;
        }
        return Err(err.into());
    }

    writeln!(
        out,
        "Moved {} {} release from {} to {}",
        release.item_id, release.axis, release.from, release.to
    )?;
    Ok(())
}
