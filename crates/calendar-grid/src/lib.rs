//! # calendar-grid
//!
//! Month-paged calendar grid engine.
//!
//! Turns a `[start, end]` range into a sequence of fixed 42-cell month pages,
//! maps days to `(section, item)` cells and back, buckets single-day events
//! into cells, and tracks an ordered multi-date selection alongside the
//! currently displayed month. Rendering, gestures and event storage belong to
//! the caller; the engine only consumes resolved values and returns what to
//! draw and what happened.
//!
//! All arithmetic uses the proleptic Gregorian calendar in UTC, and weeks
//! start on Monday.
//!
//! ## Quick start
//!
//! ```rust
//! use calendar_grid::{CalendarEngine, DateRange, EngineConfig};
//! use chrono::{NaiveDate, TimeZone, Utc};
//!
//! let mut engine = CalendarEngine::new(EngineConfig::default());
//! let range = DateRange::new(
//!     Utc.with_ymd_and_hms(2021, 1, 15, 0, 0, 0).unwrap(),
//!     Utc.with_ymd_and_hms(2021, 3, 10, 0, 0, 0).unwrap(),
//! );
//! engine.set_range(Some(range), Utc.with_ymd_and_hms(2020, 6, 1, 0, 0, 0).unwrap());
//! assert_eq!(engine.section_count(), 3);
//!
//! let day = NaiveDate::from_ymd_opt(2021, 2, 1).unwrap();
//! let cell = engine.coordinate_for(day).unwrap();
//! assert_eq!((cell.section, cell.item), (1, 0)); // 2021-02-01 is a Monday
//! assert_eq!(engine.date_for(cell), Some(day));
//! ```
//!
//! ## Modules
//!
//! - [`math`] — month/day arithmetic and the Monday-first weekday index
//! - [`layout`] — leading blanks and day count of one month page
//! - [`grid`] — `DateRange`, `GridCoordinate` and the date <-> cell index
//! - [`events`] — single-day event validation and per-cell buckets
//! - [`selection`] — ordered selection state
//! - [`scroll`] — scroll offset -> month page
//! - [`engine`] — `CalendarEngine`, cell content and notifications
//! - [`error`] — Error types

pub mod engine;
pub mod error;
pub mod events;
pub mod grid;
pub mod layout;
pub mod math;
pub mod scroll;
pub mod selection;

pub use engine::{CalendarEngine, CellContent, DateRangeSource, EngineConfig, Notification};
pub use error::GridError;
pub use events::{CalendarEvent, EventBucketer, RebuildReport};
pub use grid::{DateRange, GridCoordinate, GridIndex};
pub use layout::{CellKind, MonthLayout};
pub use scroll::{Orientation, ScrollReport};
pub use selection::{SelectedDate, SelectionChange, SelectionTracker};
