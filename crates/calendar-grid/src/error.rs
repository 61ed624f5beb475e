//! Error and diagnostic types for calendar-grid operations.
//!
//! None of these abort the engine. Expected conditions (a date outside the
//! range, a vetoed selection) are modelled as `Option` or empty results; the
//! variants here are what the engine *reports* back to its caller.

use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GridError {
    /// The range start is not strictly before its end. The engine shows an
    /// empty calendar for such a range.
    #[error("Invalid range: start {start} is not before end {end}")]
    InvalidRange {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    /// The event starts and ends on different UTC calendar days.
    #[error("Multi-day event rejected: '{title}' ({start} .. {end})")]
    MultiDayEvent {
        title: String,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    /// The event ends before it starts.
    #[error("Event ends before it starts: '{title}' ({start} .. {end})")]
    EndBeforeStart {
        title: String,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
}

pub type Result<T> = std::result::Result<T, GridError>;
