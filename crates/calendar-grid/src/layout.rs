//! Per-month grid layout: how many blank cells precede day 1 and how many days
//! follow.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::math::{self, CELLS_PER_MONTH};

/// Shape of one month page inside the fixed 42-cell grid.
///
/// `leading_blank` is 0..=6 and `day_count` is 28..=31, so
/// `leading_blank + day_count <= 37 < 42` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthLayout {
    pub leading_blank: u32,
    pub day_count: u32,
}

/// Classification of a single cell within a month page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    /// Before day 1.
    LeadingBlank,
    /// A real day, carrying its 1-based day number.
    Day(u32),
    /// After the last day of the month.
    TrailingBlank,
}

impl MonthLayout {
    /// Layout of the month containing `month`.
    pub fn for_month(month: NaiveDate) -> Self {
        let first = math::first_of_month(month);
        Self {
            leading_blank: math::weekday_index_monday_based(first),
            day_count: math::days_in_month(first),
        }
    }

    /// Classify the cell at `item`. Items past the grid are trailing blanks.
    pub fn cell(&self, item: usize) -> CellKind {
        let leading = self.leading_blank as usize;
        if item < leading {
            CellKind::LeadingBlank
        } else if item >= leading + self.day_count as usize {
            CellKind::TrailingBlank
        } else {
            CellKind::Day((item - leading) as u32 + 1)
        }
    }

    /// Item index of the 1-based `day`, or `None` if the month has no such day.
    pub fn item_for_day(&self, day: u32) -> Option<usize> {
        (1..=self.day_count)
            .contains(&day)
            .then(|| (self.leading_blank + day - 1) as usize)
    }

    /// Blank cells after the last day.
    pub fn trailing_blank(&self) -> u32 {
        CELLS_PER_MONTH as u32 - self.leading_blank - self.day_count
    }
}
