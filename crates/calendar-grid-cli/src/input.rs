//! Parsing of command-line dates and the JSON event file.

use anyhow::{Context, Result};
use calendar_grid::CalendarEvent;
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::Deserialize;

/// Event record as it appears in the input file.
#[derive(Deserialize)]
struct EventInput {
    title: String,
    start: String,
    end: String,
}

pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.parse()
        .map_err(|_| anyhow::anyhow!("Invalid timezone: {}", name))
}

/// Parse an instant.
///
/// RFC 3339 strings keep their own offset. Naive `YYYY-MM-DDTHH:MM:SS` and
/// bare `YYYY-MM-DD` (midnight) are local times in `tz`.
pub fn parse_instant(s: &str, tz: Tz) -> Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    let naive = match NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        Ok(ndt) => ndt,
        Err(_) => parse_day(s)?.and_time(chrono::NaiveTime::MIN),
    };
    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .with_context(|| format!("'{}' does not exist in {}", s, tz))
}

pub fn parse_day(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").with_context(|| format!("Invalid date '{}'", s))
}

/// Parse a JSON array of events, normalizing every endpoint to UTC.
pub fn parse_events(json: &str, tz: Tz) -> Result<Vec<CalendarEvent>> {
    let inputs: Vec<EventInput> = serde_json::from_str(json).context("Expected a JSON array of events")?;
    inputs
        .into_iter()
        .map(|e| {
            let start = parse_instant(&e.start, tz)
                .with_context(|| format!("Invalid start for '{}'", e.title))?;
            let end = parse_instant(&e.end, tz)
                .with_context(|| format!("Invalid end for '{}'", e.title))?;
            Ok(CalendarEvent::new(e.title, start, end))
        })
        .collect()
}
