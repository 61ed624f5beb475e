//! Text and JSON renderings of engine state.
//!
//! Text cells are six columns wide: a `>` selection mark, the day number, a
//! `*` today mark and the event count (`+` past nine).

use anyhow::Result;
use calendar_grid::math::{month_title, DAYS_IN_WEEK};
use calendar_grid::scroll::page_offset;
use calendar_grid::{CalendarEngine, CellContent, GridCoordinate, MonthLayout, SelectedDate};
use chrono::NaiveDate;
use serde::Serialize;

const WEEKDAY_HEADER: [&str; DAYS_IN_WEEK] = ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"];

#[derive(Serialize)]
struct SectionDto {
    section: usize,
    month: NaiveDate,
    title: String,
    layout: MonthLayout,
    cells: Vec<CellContent>,
}

#[derive(Serialize)]
struct SelectedDto {
    date: NaiveDate,
    coordinate: GridCoordinate,
    events: Vec<String>,
}

#[derive(Serialize)]
struct CalendarDto {
    sections: Vec<SectionDto>,
    today: Option<GridCoordinate>,
    selected: Vec<SelectedDto>,
    rejected: Vec<String>,
}

#[derive(Serialize)]
struct ScrollDto {
    page: usize,
    month: Option<NaiveDate>,
    title: Option<String>,
    offset: f64,
}

pub fn text(engine: &CalendarEngine, sections: &[usize]) -> String {
    let mut out = String::new();

    for &section in sections {
        let Some(month) = engine.month_for_section(section) else {
            continue;
        };
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(&month_title(month));
        out.push('\n');
        let header: String = WEEKDAY_HEADER.iter().map(|d| format!(" {:<5}", d)).collect();
        out.push_str(header.trim_end());
        out.push('\n');

        for row in engine.section_cells(section).chunks(DAYS_IN_WEEK) {
            if row.iter().all(CellContent::is_blank) {
                continue;
            }
            let line: String = row.iter().map(cell_text).collect();
            out.push_str(line.trim_end());
            out.push('\n');
        }
    }

    if !engine.selection().is_empty() {
        out.push('\n');
        for entry in engine.selection() {
            out.push_str(&selected_line(engine, entry));
        }
    }
    out
}

fn cell_text(cell: &CellContent) -> String {
    let Some(day) = cell.day else {
        return " ".repeat(6);
    };
    let selected = if cell.is_selected { '>' } else { ' ' };
    let today = if cell.is_today { '*' } else { ' ' };
    let events = match cell.event_count {
        0 => ' ',
        n @ 1..=9 => char::from_digit(n as u32, 10).unwrap_or('+'),
        _ => '+',
    };
    format!("{}{:>2}{}{} ", selected, day, today, events)
}

fn selected_line(engine: &CalendarEngine, entry: &SelectedDate) -> String {
    let events = engine.events_at(entry.coordinate);
    let mut line = format!("selected {} ({} events)", entry.date, events.len());
    if !events.is_empty() {
        let titles: Vec<&str> = events.iter().map(|e| e.title.as_str()).collect();
        line.push_str(": ");
        line.push_str(&titles.join(", "));
    }
    line.push('\n');
    line
}

pub fn json(engine: &CalendarEngine, sections: &[usize]) -> Result<String> {
    let sections = sections
        .iter()
        .filter_map(|&section| {
            let month = engine.month_for_section(section)?;
            Some(SectionDto {
                section,
                month,
                title: month_title(month),
                layout: engine.layout_for(section)?,
                cells: engine.section_cells(section),
            })
        })
        .collect();

    let selected = engine
        .selection()
        .iter()
        .map(|entry| SelectedDto {
            date: entry.date,
            coordinate: entry.coordinate,
            events: engine
                .events_at(entry.coordinate)
                .iter()
                .map(|e| e.title.clone())
                .collect(),
        })
        .collect();

    let dto = CalendarDto {
        sections,
        today: engine.today_coordinate(),
        selected,
        rejected: engine.rejected_events().iter().map(ToString::to_string).collect(),
    };
    let mut json = serde_json::to_string_pretty(&dto)?;
    json.push('\n');
    Ok(json)
}

pub fn scroll_json(engine: &CalendarEngine, page: usize, page_size: f64) -> Result<String> {
    let dto = ScrollDto {
        page,
        month: engine.displayed_month(),
        title: engine.displayed_title(),
        offset: page_offset(page, page_size),
    };
    let mut json = serde_json::to_string_pretty(&dto)?;
    json.push('\n');
    Ok(json)
}
