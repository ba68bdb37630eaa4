use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::RingEventLog;
use crate::errors::AppResult;
use crate::export::parse_range;
use crate::models::filter::RingFilter;
use crate::models::ring_event::RingEvent;
use crate::ui::messages::info;
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List {
        range,
        shifts,
        search,
        limit,
    } = cmd
    {
        let filter = build_filter(range.as_deref(), shifts, search.as_deref())?;

        let log = RingEventLog::open(cfg);
        let mut events = log.query(&filter)?;

        if events.is_empty() {
            info("No rings found.");
            return Ok(());
        }

        let total = events.len();
        newest_first(&mut events);
        events.truncate(*limit);

        println!("{}", render(&events));
        info(format!("Showing {} of {} ring(s).", events.len(), total));
    }
    Ok(())
}

/// Shared by `list` and `export`.
pub(crate) fn build_filter(
    range: Option<&str>,
    shifts: &[String],
    search: Option<&str>,
) -> AppResult<RingFilter> {
    let mut filter = RingFilter::all().with_shifts(shifts.iter().cloned());

    if let Some(r) = range.filter(|r| !r.eq_ignore_ascii_case("all")) {
        let (start, end) = parse_range(r)?;
        filter = filter.with_range(start, end);
    }
    if let Some(q) = search {
        filter = filter.with_search(q);
    }
    Ok(filter)
}

/// Newest first by parsed timestamp; unparsable ones sink to the bottom and
/// ties keep log order reversed.
fn newest_first(events: &mut [RingEvent]) {
    events.reverse();
    events.sort_by(|a, b| b.instant().cmp(&a.instant()));
}

fn render(events: &[RingEvent]) -> String {
    let mut table = Table::new(vec![
        Column::new("TIMESTAMP", 19),
        Column::new("SHIFT", 12),
        Column::new("NAME", 22),
        Column::new("USERNAME", 16),
        Column::new("BADGE", 16),
        Column::new("NOTE", 30),
        Column::new("PHOTO", 3),
    ]);

    for e in events {
        let dash = |s: &str| {
            if s.trim().is_empty() {
                "-".to_string()
            } else {
                s.to_string()
            }
        };
        table.add_row(vec![
            e.timestamp.clone(),
            dash(&e.shift),
            dash(&e.name),
            dash(&e.username),
            dash(&e.badge),
            dash(&e.note),
            if e.photo_ref.is_some() { "yes" } else { "-" }.to_string(),
        ]);
    }

    table.render()
}
