//! Ordered multi-date selection.
//!
//! Each date is either selected or not. The entry list keeps selection order
//! and holds at most one entry per date. In single-select mode it holds at
//! most one entry overall.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::grid::GridCoordinate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedDate {
    pub date: NaiveDate,
    pub coordinate: GridCoordinate,
}

/// A single state transition produced by a selection mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionChange {
    Selected(SelectedDate),
    Deselected(SelectedDate),
}

#[derive(Debug, Clone, Default)]
pub struct SelectionTracker {
    entries: Vec<SelectedDate>,
    allow_multiple: bool,
}

impl SelectionTracker {
    pub fn new(allow_multiple: bool) -> Self {
        Self {
            entries: Vec::new(),
            allow_multiple,
        }
    }

    pub fn allow_multiple(&self) -> bool {
        self.allow_multiple
    }

    /// Switch modes. Going to single-select keeps only the newest entry.
    pub fn set_allow_multiple(&mut self, allow_multiple: bool) -> Vec<SelectionChange> {
        self.allow_multiple = allow_multiple;
        if allow_multiple || self.entries.len() <= 1 {
            return Vec::new();
        }
        let keep_from = self.entries.len() - 1;
        self.entries
            .drain(..keep_from)
            .map(SelectionChange::Deselected)
            .collect()
    }

    pub fn is_selected(&self, date: NaiveDate) -> bool {
        self.position(date).is_some()
    }

    pub fn contains_coordinate(&self, coordinate: GridCoordinate) -> bool {
        self.entries.iter().any(|e| e.coordinate == coordinate)
    }

    /// Select `date` at `coordinate`.
    ///
    /// No-op if the date is already selected. In single-select mode the
    /// previous entry is deselected first; the returned changes list that
    /// deselection before the new selection.
    pub fn select(&mut self, date: NaiveDate, coordinate: GridCoordinate) -> Vec<SelectionChange> {
        if self.is_selected(date) {
            return Vec::new();
        }
        let mut changes = Vec::with_capacity(2);
        if !self.allow_multiple {
            changes.extend(self.entries.drain(..).map(SelectionChange::Deselected));
        }
        let entry = SelectedDate { date, coordinate };
        self.entries.push(entry);
        changes.push(SelectionChange::Selected(entry));
        changes
    }

    /// Remove `date`, keeping the order of the remaining entries.
    pub fn deselect(&mut self, date: NaiveDate) -> Option<SelectionChange> {
        let index = self.position(date)?;
        Some(SelectionChange::Deselected(self.entries.remove(index)))
    }

    /// Remove every entry, oldest first.
    pub fn clear(&mut self) -> Vec<SelectionChange> {
        self.entries
            .drain(..)
            .map(SelectionChange::Deselected)
            .collect()
    }

    /// Recompute each entry's coordinate with `resolve`. Entries that no longer
    /// resolve are removed and returned as deselections.
    pub fn reresolve<F>(&mut self, mut resolve: F) -> Vec<SelectionChange>
    where
        F: FnMut(NaiveDate) -> Option<GridCoordinate>,
    {
        let mut dropped = Vec::new();
        self.entries.retain_mut(|entry| match resolve(entry.date) {
            Some(coordinate) => {
                entry.coordinate = coordinate;
                true
            }
            None => {
                dropped.push(SelectionChange::Deselected(*entry));
                false
            }
        });
        dropped
    }

    /// Entries in selection order.
    pub fn entries(&self) -> &[SelectedDate] {
        &self.entries
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.entries.iter().map(|e| e.date)
    }

    pub fn coordinates(&self) -> impl Iterator<Item = GridCoordinate> + '_ {
        self.entries.iter().map(|e| e.coordinate)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, date: NaiveDate) -> Option<usize> {
        self.entries.iter().position(|e| e.date == date)
    }
}
