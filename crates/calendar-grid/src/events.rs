//! Bucket single-day events by the grid cell of the day they occur on.
//!
//! Endpoints are normalized to UTC before any day comparison. Events whose
//! endpoints fall on different UTC days are rejected and reported; events on a
//! day outside the displayed range are dropped without a diagnostic.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{GridError, Result};
use crate::grid::{GridCoordinate, GridIndex};

/// An event already resolved to concrete instants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl CalendarEvent {
    /// Build an event from endpoints in any time zone. Both are stored in UTC.
    pub fn new<Tz: TimeZone>(title: impl Into<String>, start: DateTime<Tz>, end: DateTime<Tz>) -> Self {
        Self {
            title: title.into(),
            start: start.with_timezone(&Utc),
            end: end.with_timezone(&Utc),
        }
    }

    /// The UTC day of the event.
    ///
    /// # Errors
    /// `GridError::EndBeforeStart` if `end < start`, `GridError::MultiDayEvent`
    /// if the endpoints fall on different UTC days.
    pub fn single_day(&self) -> Result<NaiveDate> {
        if self.end < self.start {
            return Err(GridError::EndBeforeStart {
                title: self.title.clone(),
                start: self.start,
                end: self.end,
            });
        }
        let day = self.start.date_naive();
        if self.end.date_naive() != day {
            return Err(GridError::MultiDayEvent {
                title: self.title.clone(),
                start: self.start,
                end: self.end,
            });
        }
        Ok(day)
    }
}

/// Outcome of one [`EventBucketer::rebuild`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RebuildReport {
    /// Events placed into a bucket.
    pub placed: usize,
    /// Single-day events on a day outside the range.
    pub outside_range: usize,
    /// One entry per rejected event, in input order.
    pub rejected: Vec<GridError>,
}

/// Map from grid coordinate to the events on that day, in input order.
#[derive(Debug, Clone, Default)]
pub struct EventBucketer {
    buckets: HashMap<GridCoordinate, Vec<CalendarEvent>>,
}

impl EventBucketer {
    /// Bucket `events` against `index` into a fresh map.
    pub fn build(events: &[CalendarEvent], index: &GridIndex) -> (Self, RebuildReport) {
        let mut buckets: HashMap<GridCoordinate, Vec<CalendarEvent>> = HashMap::new();
        let mut report = RebuildReport::default();

        for event in events {
            let day = match event.single_day() {
                Ok(day) => day,
                Err(err) => {
                    tracing::warn!(%err, "event rejected");
                    report.rejected.push(err);
                    continue;
                }
            };
            match index.coordinate_for(day) {
                Some(coordinate) => {
                    buckets.entry(coordinate).or_default().push(event.clone());
                    report.placed += 1;
                }
                None => report.outside_range += 1,
            }
        }

        (Self { buckets }, report)
    }

    /// Replace every bucket with the result of bucketing `events`.
    ///
    /// The new map is fully built before it replaces the old one.
    pub fn rebuild(&mut self, events: &[CalendarEvent], index: &GridIndex) -> RebuildReport {
        let (next, report) = Self::build(events, index);
        *self = next;
        tracing::debug!(
            placed = report.placed,
            outside_range = report.outside_range,
            rejected = report.rejected.len(),
            buckets = self.buckets.len(),
            "event buckets rebuilt"
        );
        report
    }

    /// Events at `coordinate`; empty when there are none.
    pub fn events_at(&self, coordinate: GridCoordinate) -> &[CalendarEvent] {
        self.buckets.get(&coordinate).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn event_count(&self, coordinate: GridCoordinate) -> usize {
        self.events_at(coordinate).len()
    }

    /// Number of non-empty buckets.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&GridCoordinate, &[CalendarEvent])> {
        self.buckets.iter().map(|(c, events)| (c, events.as_slice()))
    }
}
