//! The calendar engine: one owner for range, layouts, events, selection and
//! the displayed month.
//!
//! Every mutating call leaves the engine fully consistent before it returns
//! and hands back the [`Notification`]s it produced, in the order they
//! happened. The caller decides when to re-render and how to deliver them.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::GridError;
use crate::events::{CalendarEvent, EventBucketer, RebuildReport};
use crate::grid::{DateRange, GridCoordinate, GridIndex};
use crate::layout::{CellKind, MonthLayout};
use crate::math::{self, CELLS_PER_MONTH};
use crate::scroll::{self, Orientation, ScrollReport};
use crate::selection::{SelectedDate, SelectionChange, SelectionTracker};

/// Supplies the range to display. Polled once per [`CalendarEngine::reload`].
pub trait DateRangeSource {
    fn start_date(&self) -> Option<DateTime<Utc>>;
    fn end_date(&self) -> Option<DateTime<Utc>>;
}

impl DateRangeSource for DateRange {
    fn start_date(&self) -> Option<DateTime<Utc>> {
        Some(self.start)
    }

    fn end_date(&self) -> Option<DateTime<Utc>> {
        Some(self.end)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    /// When false, selecting a date deselects the previous one.
    pub allow_multiple_selection: bool,
    pub orientation: Orientation,
}

/// What the rendering surface needs to paint one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellContent {
    /// 1-based day of month, `None` for blank cells.
    pub day: Option<u32>,
    pub is_today: bool,
    pub event_count: usize,
    pub is_selected: bool,
}

impl CellContent {
    pub fn is_blank(&self) -> bool {
        self.day.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// The displayed month changed; carries day 1 of that month.
    MonthChanged(NaiveDate),
    /// A date was selected; carries the events bucketed on it.
    DateSelected {
        date: NaiveDate,
        events: Vec<CalendarEvent>,
    },
    DateDeselected(NaiveDate),
}

type SelectionFilter = Box<dyn Fn(NaiveDate) -> bool>;

pub struct CalendarEngine {
    config: EngineConfig,
    index: GridIndex,
    today: Option<GridCoordinate>,
    events: Vec<CalendarEvent>,
    buckets: EventBucketer,
    rejected: Vec<GridError>,
    selection: SelectionTracker,
    displayed_month: Option<NaiveDate>,
    can_select: Option<SelectionFilter>,
}

impl fmt::Debug for CalendarEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CalendarEngine")
            .field("config", &self.config)
            .field("range", &self.index.range())
            .field("sections", &self.index.section_count())
            .field("today", &self.today)
            .field("events", &self.events.len())
            .field("selection", &self.selection.entries())
            .field("displayed_month", &self.displayed_month)
            .field("can_select", &self.can_select.is_some())
            .finish_non_exhaustive()
    }
}

impl Default for CalendarEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl CalendarEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            index: GridIndex::default(),
            today: None,
            events: Vec::new(),
            buckets: EventBucketer::default(),
            rejected: Vec::new(),
            selection: SelectionTracker::new(config.allow_multiple_selection),
            displayed_month: None,
            can_select: None,
        }
    }

    pub fn config(&self) -> EngineConfig {
        self.config
    }

    // -----------------------------------------------------------------------
    // Range
    // -----------------------------------------------------------------------

    /// Poll `source` once and apply the range it reports. A missing start or
    /// end clears the range.
    pub fn reload(&mut self, source: &impl DateRangeSource, now: DateTime<Utc>) -> Vec<Notification> {
        let range = match (source.start_date(), source.end_date()) {
            (Some(start), Some(end)) => Some(DateRange::new(start, end)),
            _ => None,
        };
        self.set_range(range, now)
    }

    /// Replace the displayed range.
    ///
    /// Drops every cached layout, snapshots the today cell from `now`,
    /// re-resolves selected dates (those outside the new range are
    /// deselected), rebuilds event buckets and moves the displayed month to
    /// the first section.
    pub fn set_range(&mut self, range: Option<DateRange>, now: DateTime<Utc>) -> Vec<Notification> {
        if let Some(Err(err)) = range.map(|r| r.validate()) {
            tracing::debug!(%err, "range shows no sections");
        }
        self.index.set_range(range);

        self.today = self
            .index
            .range()
            .filter(|r| r.is_valid() && r.contains_instant(now))
            .and_then(|_| self.index.coordinate_for(now.date_naive()));

        let index = &self.index;
        let mut notifications: Vec<Notification> = self
            .selection
            .reresolve(|date| index.coordinate_for(date))
            .into_iter()
            .map(|change| self.to_notification(change))
            .collect();

        self.rebuild_buckets();

        self.displayed_month = self.index.anchor();
        if let Some(month) = self.displayed_month {
            notifications.push(Notification::MonthChanged(month));
        }

        tracing::debug!(
            sections = self.index.section_count(),
            anchor = ?self.index.anchor(),
            today = ?self.today,
            "range changed"
        );
        notifications
    }

    pub fn range(&self) -> Option<DateRange> {
        self.index.range()
    }

    /// Day 1 of the first section's month.
    pub fn anchor(&self) -> Option<NaiveDate> {
        self.index.anchor()
    }

    pub fn section_count(&self) -> usize {
        self.index.section_count()
    }

    /// Always 42: six week rows of seven days.
    pub fn item_count(&self, _section: usize) -> usize {
        CELLS_PER_MONTH
    }

    pub fn layout_for(&self, section: usize) -> Option<MonthLayout> {
        self.index.layout_for(section)
    }

    pub fn month_for_section(&self, section: usize) -> Option<NaiveDate> {
        self.index.month_for_section(section)
    }

    pub fn coordinate_for(&self, date: NaiveDate) -> Option<GridCoordinate> {
        self.index.coordinate_for(date)
    }

    pub fn date_for(&self, coordinate: GridCoordinate) -> Option<NaiveDate> {
        self.index.date_for(coordinate)
    }

    /// Cell of "now" as of the last range change.
    pub fn today_coordinate(&self) -> Option<GridCoordinate> {
        self.today
    }

    // -----------------------------------------------------------------------
    // Events
    // -----------------------------------------------------------------------

    /// Replace the event list and rebuild every bucket.
    pub fn set_events(&mut self, events: Vec<CalendarEvent>) -> RebuildReport {
        self.events = events;
        self.rebuild_buckets()
    }

    fn rebuild_buckets(&mut self) -> RebuildReport {
        let report = self.buckets.rebuild(&self.events, &self.index);
        self.rejected.clone_from(&report.rejected);
        report
    }

    pub fn events(&self) -> &[CalendarEvent] {
        &self.events
    }

    pub fn events_at(&self, coordinate: GridCoordinate) -> &[CalendarEvent] {
        self.buckets.events_at(coordinate)
    }

    pub fn buckets(&self) -> &EventBucketer {
        &self.buckets
    }

    /// Events rejected by the last rebuild.
    pub fn rejected_events(&self) -> &[GridError] {
        &self.rejected
    }

    // -----------------------------------------------------------------------
    // Rendering
    // -----------------------------------------------------------------------

    /// Content for the cell at `coordinate`, or `None` outside the grid.
    pub fn cell_content(&self, coordinate: GridCoordinate) -> Option<CellContent> {
        if coordinate.item >= CELLS_PER_MONTH {
            return None;
        }
        let layout = self.index.layout_for(coordinate.section)?;
        let day = match layout.cell(coordinate.item) {
            CellKind::Day(day) => Some(day),
            CellKind::LeadingBlank | CellKind::TrailingBlank => None,
        };
        Some(CellContent {
            day,
            is_today: day.is_some() && self.today == Some(coordinate),
            event_count: self.buckets.event_count(coordinate),
            is_selected: self.selection.contains_coordinate(coordinate),
        })
    }

    /// All 42 cells of `section` in item order.
    pub fn section_cells(&self, section: usize) -> Vec<CellContent> {
        (0..CELLS_PER_MONTH)
            .filter_map(|item| self.cell_content(GridCoordinate::new(section, item)))
            .collect()
    }

    // -----------------------------------------------------------------------
    // Selection
    // -----------------------------------------------------------------------

    /// Install a predicate that may veto selections.
    pub fn set_selection_filter(&mut self, filter: impl Fn(NaiveDate) -> bool + 'static) {
        self.can_select = Some(Box::new(filter));
    }

    pub fn clear_selection_filter(&mut self) {
        self.can_select = None;
    }

    pub fn can_select(&self, date: NaiveDate) -> bool {
        self.can_select.as_ref().is_none_or(|filter| filter(date))
    }

    pub fn allow_multiple_selection(&self) -> bool {
        self.selection.allow_multiple()
    }

    pub fn set_allow_multiple_selection(&mut self, allow: bool) -> Vec<Notification> {
        self.config.allow_multiple_selection = allow;
        let changes = self.selection.set_allow_multiple(allow);
        self.notifications(changes)
    }

    /// Select `date`. No-op when it is outside the range, already selected,
    /// or vetoed by the selection filter.
    pub fn select_date(&mut self, date: NaiveDate) -> Vec<Notification> {
        let Some(coordinate) = self.index.coordinate_for(date) else {
            return Vec::new();
        };
        if self.selection.is_selected(date) {
            return Vec::new();
        }
        if !self.can_select(date) {
            tracing::debug!(%date, "selection vetoed");
            return Vec::new();
        }
        let changes = self.selection.select(date, coordinate);
        self.notifications(changes)
    }

    /// Deselect `date`. No-op when it is not selected.
    pub fn deselect_date(&mut self, date: NaiveDate) -> Vec<Notification> {
        let changes: Vec<SelectionChange> = self.selection.deselect(date).into_iter().collect();
        self.notifications(changes)
    }

    /// Toggle the day shown at `coordinate`. Blank cells do nothing.
    pub fn tap(&mut self, coordinate: GridCoordinate) -> Vec<Notification> {
        let Some(date) = self.index.date_for(coordinate) else {
            return Vec::new();
        };
        if self.selection.is_selected(date) {
            self.deselect_date(date)
        } else {
            self.select_date(date)
        }
    }

    /// Explicit reset: deselect everything, oldest first.
    pub fn clear_selection(&mut self) -> Vec<Notification> {
        let changes = self.selection.clear();
        self.notifications(changes)
    }

    pub fn is_selected(&self, date: NaiveDate) -> bool {
        self.selection.is_selected(date)
    }

    /// Selected entries in selection order.
    pub fn selection(&self) -> &[SelectedDate] {
        self.selection.entries()
    }

    pub fn selected_dates(&self) -> Vec<NaiveDate> {
        self.selection.dates().collect()
    }

    pub fn selected_coordinates(&self) -> Vec<GridCoordinate> {
        self.selection.coordinates().collect()
    }

    fn notifications(&self, changes: Vec<SelectionChange>) -> Vec<Notification> {
        changes
            .into_iter()
            .map(|change| self.to_notification(change))
            .collect()
    }

    fn to_notification(&self, change: SelectionChange) -> Notification {
        match change {
            SelectionChange::Selected(entry) => Notification::DateSelected {
                date: entry.date,
                events: self.buckets.events_at(entry.coordinate).to_vec(),
            },
            SelectionChange::Deselected(entry) => Notification::DateDeselected(entry.date),
        }
    }

    // -----------------------------------------------------------------------
    // Scrolling and month navigation
    // -----------------------------------------------------------------------

    pub fn orientation(&self) -> Orientation {
        self.config.orientation
    }

    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.config.orientation = orientation;
    }

    /// Day 1 of the month currently on screen.
    pub fn displayed_month(&self) -> Option<NaiveDate> {
        self.displayed_month
    }

    /// Section of the displayed month.
    pub fn displayed_page(&self) -> Option<usize> {
        self.index.section_for_month(self.displayed_month?)
    }

    /// Header text for the displayed month, e.g. `"February 2021"`.
    pub fn displayed_title(&self) -> Option<String> {
        self.displayed_month.map(math::month_title)
    }

    /// Resolve a scroll report to a month page and announce it.
    ///
    /// Fires exactly one `MonthChanged` per call while a range is set. Never
    /// touches the selection.
    pub fn scrolled(&mut self, report: &ScrollReport) -> Vec<Notification> {
        let Some(anchor) = self.index.anchor() else {
            return Vec::new();
        };
        let page = scroll::resolve_page(report, self.config.orientation);
        let Some(month) = i32::try_from(page)
            .ok()
            .and_then(|page| math::add_months(anchor, page))
        else {
            return Vec::new();
        };
        self.displayed_month = Some(month);
        vec![Notification::MonthChanged(month)]
    }

    /// Show the month containing `date` and return its page index, which
    /// the surface scrolls to with [`scroll::page_offset`].
    ///
    /// `None` (and no change) when `date` is outside the range or its month is
    /// already displayed. A `Some` is the month-changed signal.
    pub fn set_display_date(&mut self, date: NaiveDate) -> Option<usize> {
        let range = self.index.range()?;
        if !range.contains_day(date) {
            return None;
        }
        let month = math::first_of_month(date);
        if self.displayed_month == Some(month) {
            return None;
        }
        let page = self.index.section_for_month(month)?;
        self.displayed_month = Some(month);
        tracing::debug!(%month, page, "display date set");
        Some(page)
    }

    /// Move the displayed month by `offset` months and return the new page.
    ///
    /// The target day is clamped into the range, so the first and last
    /// sections are reachable even when the range starts or ends mid-month.
    pub fn go_to_month_offset(&mut self, offset: i32) -> Option<usize> {
        let range = self.index.range()?;
        let target = math::add_months(self.displayed_month?, offset)?;
        let first = range.start.date_naive();
        let last = range.end.date_naive();
        let clamped = target.clamp(first, last);
        if math::first_of_month(clamped) != target {
            return None;
        }
        self.set_display_date(clamped)
    }

    pub fn go_to_next_month(&mut self) -> Option<usize> {
        self.go_to_month_offset(1)
    }

    pub fn go_to_previous_month(&mut self) -> Option<usize> {
        self.go_to_month_offset(-1)
    }
}
