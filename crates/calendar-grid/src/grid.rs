//! Bidirectional mapping between calendar days and grid coordinates.
//!
//! Sections are months counted from the range anchor (day 1 of the month that
//! contains the range start). Items are cells within a section's 42-cell page.

use std::cell::OnceCell;

use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{GridError, Result};
use crate::layout::{CellKind, MonthLayout};
use crate::math::{self, CELLS_PER_MONTH};

/// The displayed span of time. Valid only when `start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    pub fn is_valid(&self) -> bool {
        self.start < self.end
    }

    /// # Errors
    /// Returns `GridError::InvalidRange` unless `start < end`.
    pub fn validate(&self) -> Result<()> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(GridError::InvalidRange {
                start: self.start,
                end: self.end,
            })
        }
    }

    /// Day 1 of the month containing `start`.
    pub fn anchor(&self) -> NaiveDate {
        math::first_of_month(self.start.date_naive())
    }

    /// Whether `day` is between the start and end days, both inclusive.
    pub fn contains_day(&self, day: NaiveDate) -> bool {
        self.start.date_naive() <= day && day <= self.end.date_naive()
    }

    /// Whether `instant` is in `[start, end)`.
    pub fn contains_instant(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.end
    }
}

/// A cell address: `section` is the month page, `item` the cell (0..42).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridCoordinate {
    pub section: usize,
    pub item: usize,
}

impl GridCoordinate {
    pub fn new(section: usize, item: usize) -> Self {
        Self { section, item }
    }
}

/// Date <-> coordinate index over one [`DateRange`].
///
/// Month layouts are computed on first access and cached per section. The
/// cache is dropped in full by [`GridIndex::set_range`].
#[derive(Debug, Clone, Default)]
pub struct GridIndex {
    range: Option<DateRange>,
    anchor: Option<NaiveDate>,
    layouts: Vec<OnceCell<MonthLayout>>,
}

impl GridIndex {
    pub fn new(range: Option<DateRange>) -> Self {
        let mut index = Self::default();
        index.set_range(range);
        index
    }

    /// Replace the range. An invalid range leaves the index with zero sections.
    pub fn set_range(&mut self, range: Option<DateRange>) {
        self.range = range;
        self.anchor = range.filter(DateRange::is_valid).map(|r| r.anchor());
        let sections = match (range, self.anchor) {
            (Some(r), Some(_)) => section_count_for(&r),
            _ => 0,
        };
        self.layouts = (0..sections).map(|_| OnceCell::new()).collect();
    }

    /// The range as last supplied, valid or not.
    pub fn range(&self) -> Option<DateRange> {
        self.range
    }

    /// Day 1 of the first section's month, when the range is valid.
    pub fn anchor(&self) -> Option<NaiveDate> {
        self.anchor
    }

    pub fn section_count(&self) -> usize {
        self.layouts.len()
    }

    /// Day 1 of the month shown in `section`.
    pub fn month_for_section(&self, section: usize) -> Option<NaiveDate> {
        if section >= self.section_count() {
            return None;
        }
        math::add_months(self.anchor?, i32::try_from(section).ok()?)
    }

    pub fn layout_for(&self, section: usize) -> Option<MonthLayout> {
        let cell = self.layouts.get(section)?;
        if let Some(layout) = cell.get() {
            return Some(*layout);
        }
        let layout = MonthLayout::for_month(self.month_for_section(section)?);
        Some(*cell.get_or_init(|| layout))
    }

    /// Coordinate of `date`, or `None` when the date is outside the range.
    pub fn coordinate_for(&self, date: NaiveDate) -> Option<GridCoordinate> {
        let range = self.range?;
        if !range.contains_day(date) {
            return None;
        }
        let distance = math::month_day_distance(self.anchor?, date)?;
        let section = usize::try_from(distance.months).ok()?;
        let layout = self.layout_for(section)?;
        let item = layout.leading_blank as usize + usize::try_from(distance.days).ok()?;
        Some(GridCoordinate { section, item })
    }

    /// Day at `coordinate`, or `None` for blank cells, coordinates outside
    /// the grid, and days drawn in the first or last month but outside the
    /// range. Every `Some` result maps back to `coordinate`.
    pub fn date_for(&self, coordinate: GridCoordinate) -> Option<NaiveDate> {
        if coordinate.item >= CELLS_PER_MONTH {
            return None;
        }
        let layout = self.layout_for(coordinate.section)?;
        let date = match layout.cell(coordinate.item) {
            CellKind::Day(day) => self
                .month_for_section(coordinate.section)?
                .checked_add_days(Days::new(u64::from(day - 1)))?,
            CellKind::LeadingBlank | CellKind::TrailingBlank => return None,
        };
        self.range?.contains_day(date).then_some(date)
    }

    /// Section showing the month that contains `date`, ignoring day bounds.
    pub fn section_for_month(&self, date: NaiveDate) -> Option<usize> {
        let section = usize::try_from(math::months_between(self.anchor?, date)).ok()?;
        (section < self.section_count()).then_some(section)
    }
}

/// `months_between(start, end) + 1` for a valid range, else 0.
pub fn section_count_for(range: &DateRange) -> usize {
    if !range.is_valid() {
        return 0;
    }
    let months = math::months_between(range.start.date_naive(), range.end.date_naive());
    usize::try_from(months).map_or(0, |m| m + 1)
}
