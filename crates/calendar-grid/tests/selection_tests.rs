//! Tests for selection state: ordering, single/multi mode, vetoes, taps.

use calendar_grid::{
    CalendarEngine, CalendarEvent, DateRange, EngineConfig, GridCoordinate, Notification,
    SelectionChange, SelectionTracker,
};
use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn utc(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
}

/// Engine over 2021-01-15 .. 2021-03-10 with "now" outside the range.
fn engine(allow_multiple_selection: bool) -> CalendarEngine {
    let mut engine = CalendarEngine::new(EngineConfig {
        allow_multiple_selection,
        ..EngineConfig::default()
    });
    engine.set_range(
        Some(DateRange::new(utc(2021, 1, 15), utc(2021, 3, 10))),
        utc(2019, 1, 1),
    );
    engine
}

// ---------------------------------------------------------------------------
// SelectionTracker
// ---------------------------------------------------------------------------

#[test]
fn tracker_keeps_selection_order() {
    let mut tracker = SelectionTracker::new(true);
    tracker.select(date(2021, 2, 12), GridCoordinate::new(1, 11));
    tracker.select(date(2021, 2, 3), GridCoordinate::new(1, 2));
    tracker.select(date(2021, 2, 20), GridCoordinate::new(1, 19));

    let dates: Vec<NaiveDate> = tracker.dates().collect();
    assert_eq!(dates, vec![date(2021, 2, 12), date(2021, 2, 3), date(2021, 2, 20)]);
}

#[test]
fn tracker_select_is_idempotent() {
    let mut tracker = SelectionTracker::new(true);
    let first = tracker.select(date(2021, 2, 3), GridCoordinate::new(1, 2));
    let second = tracker.select(date(2021, 2, 3), GridCoordinate::new(1, 2));
    assert_eq!(first.len(), 1);
    assert!(second.is_empty());
    assert_eq!(tracker.len(), 1);
}

#[test]
fn tracker_deselect_preserves_remaining_order() {
    let mut tracker = SelectionTracker::new(true);
    tracker.select(date(2021, 2, 1), GridCoordinate::new(1, 0));
    tracker.select(date(2021, 2, 2), GridCoordinate::new(1, 1));
    tracker.select(date(2021, 2, 3), GridCoordinate::new(1, 2));

    assert!(tracker.deselect(date(2021, 2, 2)).is_some());
    assert!(!tracker.is_selected(date(2021, 2, 2)));
    let dates: Vec<NaiveDate> = tracker.dates().collect();
    assert_eq!(dates, vec![date(2021, 2, 1), date(2021, 2, 3)]);
}

#[test]
fn tracker_deselect_unknown_is_noop() {
    let mut tracker = SelectionTracker::new(true);
    assert_eq!(tracker.deselect(date(2021, 2, 2)), None);
}

#[test]
fn tracker_single_mode_reports_deselect_then_select() {
    let mut tracker = SelectionTracker::new(false);
    tracker.select(date(2021, 2, 10), GridCoordinate::new(1, 9));

    let changes = tracker.select(date(2021, 2, 11), GridCoordinate::new(1, 10));

    assert_eq!(changes.len(), 2);
    assert!(matches!(changes[0], SelectionChange::Deselected(e) if e.date == date(2021, 2, 10)));
    assert!(matches!(changes[1], SelectionChange::Selected(e) if e.date == date(2021, 2, 11)));
    assert_eq!(tracker.len(), 1);
}

#[test]
fn tracker_switch_to_single_keeps_newest() {
    let mut tracker = SelectionTracker::new(true);
    tracker.select(date(2021, 2, 1), GridCoordinate::new(1, 0));
    tracker.select(date(2021, 2, 2), GridCoordinate::new(1, 1));
    tracker.select(date(2021, 2, 3), GridCoordinate::new(1, 2));

    let changes = tracker.set_allow_multiple(false);

    assert_eq!(changes.len(), 2);
    let dates: Vec<NaiveDate> = tracker.dates().collect();
    assert_eq!(dates, vec![date(2021, 2, 3)]);
}

#[test]
fn tracker_reresolve_drops_unresolvable_entries() {
    let mut tracker = SelectionTracker::new(true);
    tracker.select(date(2021, 2, 1), GridCoordinate::new(1, 0));
    tracker.select(date(2021, 3, 1), GridCoordinate::new(2, 0));

    let dropped = tracker.reresolve(|d| (d.month() == 3).then(|| GridCoordinate::new(0, 0)));

    assert_eq!(dropped.len(), 1);
    assert_eq!(tracker.entries()[0].date, date(2021, 3, 1));
    assert_eq!(tracker.entries()[0].coordinate, GridCoordinate::new(0, 0));
}

// ---------------------------------------------------------------------------
// Engine selection
// ---------------------------------------------------------------------------

#[test]
fn single_select_replaces_with_two_notifications() {
    let mut engine = engine(false);
    engine.select_date(date(2021, 2, 10));

    let notes = engine.select_date(date(2021, 2, 11));

    assert_eq!(
        notes,
        vec![
            Notification::DateDeselected(date(2021, 2, 10)),
            Notification::DateSelected {
                date: date(2021, 2, 11),
                events: vec![]
            },
        ]
    );
    assert_eq!(engine.selected_dates(), vec![date(2021, 2, 11)]);
}

#[test]
fn multi_select_accumulates() {
    let mut engine = engine(true);
    engine.select_date(date(2021, 2, 10));
    engine.select_date(date(2021, 1, 20));

    assert_eq!(engine.selected_dates(), vec![date(2021, 2, 10), date(2021, 1, 20)]);
    assert_eq!(
        engine.selected_coordinates(),
        vec![GridCoordinate::new(1, 9), GridCoordinate::new(0, 23)]
    );
}

#[test]
fn select_then_deselect_restores_state() {
    let mut engine = engine(true);
    engine.select_date(date(2021, 2, 1));
    engine.select_date(date(2021, 2, 10));
    engine.select_date(date(2021, 2, 20));

    let notes = engine.deselect_date(date(2021, 2, 10));

    assert_eq!(notes, vec![Notification::DateDeselected(date(2021, 2, 10))]);
    assert!(!engine.is_selected(date(2021, 2, 10)));
    assert_eq!(engine.selected_dates(), vec![date(2021, 2, 1), date(2021, 2, 20)]);
}

#[test]
fn select_out_of_range_is_noop() {
    let mut engine = engine(true);
    assert!(engine.select_date(date(2021, 1, 14)).is_empty());
    assert!(engine.select_date(date(2021, 3, 11)).is_empty());
    assert!(engine.selection().is_empty());
}

#[test]
fn select_already_selected_is_noop() {
    let mut engine = engine(false);
    engine.select_date(date(2021, 2, 10));
    assert!(engine.select_date(date(2021, 2, 10)).is_empty());
    assert_eq!(engine.selection().len(), 1);
}

#[test]
fn deselect_unselected_is_noop() {
    let mut engine = engine(true);
    assert!(engine.deselect_date(date(2021, 2, 10)).is_empty());
}

#[test]
fn selection_filter_vetoes() {
    let mut engine = engine(true);
    engine.set_selection_filter(|d| d.weekday().number_from_monday() <= 5);

    // 2021-02-13 is a Saturday.
    assert!(engine.select_date(date(2021, 2, 13)).is_empty());
    assert!(!engine.is_selected(date(2021, 2, 13)));
    assert_eq!(engine.select_date(date(2021, 2, 12)).len(), 1);

    engine.clear_selection_filter();
    assert_eq!(engine.select_date(date(2021, 2, 13)).len(), 1);
}

#[test]
fn veto_in_single_mode_keeps_previous_selection() {
    let mut engine = engine(false);
    engine.select_date(date(2021, 2, 10));
    engine.set_selection_filter(|_| false);

    assert!(engine.select_date(date(2021, 2, 11)).is_empty());
    assert_eq!(engine.selected_dates(), vec![date(2021, 2, 10)]);
}

#[test]
fn selected_notification_carries_day_events() {
    let mut engine = engine(false);
    let standup = CalendarEvent::new(
        "Standup",
        Utc.with_ymd_and_hms(2021, 2, 10, 9, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2021, 2, 10, 9, 15, 0).unwrap(),
    );
    engine.set_events(vec![standup.clone()]);

    let notes = engine.select_date(date(2021, 2, 10));

    assert_eq!(
        notes,
        vec![Notification::DateSelected {
            date: date(2021, 2, 10),
            events: vec![standup]
        }]
    );
}

#[test]
fn tap_toggles_day_cells() {
    let mut engine = engine(true);
    let cell = GridCoordinate::new(1, 9);

    let on = engine.tap(cell);
    assert!(matches!(on.as_slice(), [Notification::DateSelected { date: d, .. }] if *d == date(2021, 2, 10)));
    assert!(engine.is_selected(date(2021, 2, 10)));

    let off = engine.tap(cell);
    assert_eq!(off, vec![Notification::DateDeselected(date(2021, 2, 10))]);
    assert!(engine.selection().is_empty());
}

#[test]
fn tap_on_blank_or_out_of_range_day_is_noop() {
    let mut engine = engine(true);
    // Leading blank in January.
    assert!(engine.tap(GridCoordinate::new(0, 0)).is_empty());
    // Jan 1 is drawn but precedes the range start.
    assert!(engine.tap(GridCoordinate::new(0, 4)).is_empty());
    assert!(engine.selection().is_empty());
}

#[test]
fn clear_selection_deselects_oldest_first() {
    let mut engine = engine(true);
    engine.select_date(date(2021, 2, 3));
    engine.select_date(date(2021, 2, 1));

    let notes = engine.clear_selection();

    assert_eq!(
        notes,
        vec![
            Notification::DateDeselected(date(2021, 2, 3)),
            Notification::DateDeselected(date(2021, 2, 1)),
        ]
    );
    assert!(engine.selection().is_empty());
}

#[test]
fn switching_engine_to_single_select_trims_selection() {
    let mut engine = engine(true);
    engine.select_date(date(2021, 2, 3));
    engine.select_date(date(2021, 2, 1));

    let notes = engine.set_allow_multiple_selection(false);

    assert_eq!(notes, vec![Notification::DateDeselected(date(2021, 2, 3))]);
    assert!(!engine.allow_multiple_selection());
    assert_eq!(engine.selected_dates(), vec![date(2021, 2, 1)]);
}
