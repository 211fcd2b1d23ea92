use std::io::Write;

use anyhow::Result;
use chrono::{Local, NaiveDate};
use release_calendar::calendar::{build_cells, count_by_category, CalendarCell, CategoryCounts, ViewState};
use release_calendar::models::schedule::ScheduledItem;
use release_calendar::models::ui::ViewGranularity;
use release_calendar::services::external_calendar::{
    load_external_items, merge_external_events, HttpEventFetcher,
};
use release_calendar::services::ticket::TicketService;
use release_calendar::utils::date::today;

use super::{parse_date, AppContext};

pub struct CalendarArgs<'a> {
    pub date: Option<&'a str>,
    pub view: Option<ViewGranularity>,
    pub client: Option<&'a str>,
    pub external: bool,
}

pub fn run(ctx: &AppContext, args: CalendarArgs<'_>) -> Result<()> {
    let today = today();
    let reference = args.date.map(parse_date).transpose()?.unwrap_or(today);
    let granularity = args.view.unwrap_or(ctx.config.default_view);

    let db = ctx.open_database()?;
    let mut items = TicketService::new(db.connection()).scheduled_items()?;

    if args.external {
        items = merge_external_events(items, fetch_external(ctx));
    }

    let mut state = ViewState::new(reference, granularity);
    state.set_owner_filter(args.client);

    write_calendar(&state, &items, today, &mut std::io::stdout())
}

fn fetch_external(ctx: &AppContext) -> Vec<ScheduledItem> {
    let external = &ctx.config.external_calendar;
    match HttpEventFetcher::from_config(external) {
        Ok(Some(fetcher)) => load_external_items(&fetcher, external, Local::now()),
        Ok(None) => {
            log::warn!("--external given but no external calendar endpoint is configured");
            Vec::new()
        }
        Err(err) => {
            log::warn!("External calendar unavailable: {:#}", err);
            Vec::new()
        }
    }
}

fn title(state: &ViewState, cells: &[CalendarCell<'_>]) -> String {
    match state.granularity {
        ViewGranularity::Month => state.reference_date.format("%B %Y").to_string(),
        ViewGranularity::Week => match (cells.first(), cells.last()) {
            (Some(first), Some(last)) => format!("Week {} .. {}", first.date, last.date),
            _ => "Week".to_string(),
        },
    }
}

pub(crate) fn write_calendar<W: Write>(
    state: &ViewState,
    items: &[ScheduledItem],
    today: NaiveDate,
    out: &mut W,
) -> Result<()> {
    let cells = build_cells(state, items, today);
    let counts = count_by_category(&cells, state.reference_date, state.granularity);

    writeln!(out, "{}", title(state, &cells))?;
    writeln!(out, "Client: {}", state.owner_filter().unwrap_or("all"))?;
    writeln!(out, "---")?;

    for cell in &cells {
        if cell.is_padding(state.granularity) && cell.entries.is_empty() {
            continue;
        }
        write_cell(cell, state.granularity, out)?;
    }

    writeln!(out, "---")?;
    write_counts(&counts, out)
}

fn write_cell<W: Write>(cell: &CalendarCell<'_>, granularity: ViewGranularity, out: &mut W) -> Result<()> {
    let marker = if cell.is_today { "*" } else { " " };
    let padding = if cell.is_padding(granularity) { " (other month)" } else { "" };
    writeln!(out, "{}{} {}{}", marker, cell.date.format("%a"), cell.date, padding)?;

    for entry in &cell.entries {
        let lock = if entry.is_movable() { "" } else { " [read-only]" };
        writeln!(
            out,
            "    [{}] {} ({}) {}{}",
            entry.axis,
            entry.item.title,
            entry.item.client_label(),
            entry.drag_id(),
            lock
        )?;
    }

    Ok(())
}

fn write_counts<W: Write>(counts: &CategoryCounts, out: &mut W) -> Result<()> {
    writeln!(
        out,
        "PRODUCTION: {}  TEST: {}  TOTAL: {}",
        counts.production,
        counts.test,
        counts.total()
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use release_calendar::models::schedule::{ItemSource, ReleaseAxis};

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn render(state: &ViewState, items: &[ScheduledItem]) -> String {
        let mut out = Vec::new();
        write_calendar(state, items, day(2024, 3, 15), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_week_output_lists_entries_and_counts() {
        let items = vec![
            ScheduledItem::new("t1", "Fix login")
                .with_client("Acme")
                .with_date(ReleaseAxis::Test, day(2024, 3, 12)),
            ScheduledItem::new("t2", "Ship")
                .with_date(ReleaseAxis::Production, day(2024, 3, 14)),
        ];
        let state = ViewState::new(day(2024, 3, 15), ViewGranularity::Week);

        let text = render(&state, &items);

        assert!(text.starts_with("Week 2024-03-11 .. 2024-03-17"));
        assert!(text.contains("[TEST] Fix login (Acme) t1:TEST"));
        assert!(text.contains("[PRODUCTION] Ship (N/A) t2:PRODUCTION"));
        assert!(text.contains("*Fri 2024-03-15"));
        assert!(text.contains("PRODUCTION: 1  TEST: 1  TOTAL: 2"));
    }

    #[test]
    fn test_month_output_skips_empty_padding() {
        let state = ViewState::new(day(2024, 3, 15), ViewGranularity::Month);
        let text = render(&state, &[]);

        assert!(text.starts_with("March 2024"));
        assert!(!text.contains("2024-02-26"));
        assert!(text.contains("2024-03-31"));
    }

    #[test]
    fn test_external_entries_marked_read_only() {
        let mut item = ScheduledItem::new("ev1:TEST", "Partner deploy")
            .with_client("ESSELUNGA")
            .with_date(ReleaseAxis::Test, day(2024, 3, 13));
        item.source = ItemSource::External;
        let state = ViewState::new(day(2024, 3, 15), ViewGranularity::Week);

        assert!(render(&state, &[item]).contains("[read-only]"));
    }

    #[test]
    fn test_client_filter_shown() {
        let mut state = ViewState::new(day(2024, 3, 15), ViewGranularity::Week);
        state.set_owner_filter(Some("Acme"));
        assert!(render(&state, &[]).contains("Client: Acme"));
    }
}
